// Copyright 2025 Lablup Inc. and Jeongkyu Shin
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Interactive result table
//!
//! Large result sets open in a full-screen, scrollable table built with
//! ratatui. Navigation: `j`/`k` or arrows, PgUp/PgDn, `g`/`G`, `q` to close.

pub mod app;
pub mod event;
pub mod terminal_guard;
mod view;

use crate::report::ReportTable;
use anyhow::Result;
use app::TableApp;
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io;
use std::time::Duration;
use terminal_guard::TerminalGuard;

/// Minimum terminal dimensions for the table view
const MIN_TERMINAL_WIDTH: u16 = 40;
const MIN_TERMINAL_HEIGHT: u16 = 8;

/// Show `table` until the user quits.
///
/// Blocks the calling thread. Terminal state is restored by [`TerminalGuard`]
/// on every exit path.
pub fn run_table_view(table: &ReportTable, title: &str) -> Result<()> {
    let _terminal_guard = TerminalGuard::new()?;
    let backend = CrosstermBackend::new(io::stdout());
    let mut terminal = Terminal::new(backend)?;

    let mut app = TableApp::new(table.len());

    loop {
        let size = terminal.size()?;
        if size.width < MIN_TERMINAL_WIDTH || size.height < MIN_TERMINAL_HEIGHT {
            terminal.draw(|f| view::render_size_error(f, MIN_TERMINAL_WIDTH, MIN_TERMINAL_HEIGHT))?;
        } else {
            terminal.draw(|f| view::render(f, &mut app, table, title))?;
        }

        if let Some(key) = event::poll_event(Duration::from_millis(250))? {
            event::handle_key_event(&mut app, key);
        }

        if app.should_quit {
            break;
        }
    }

    Ok(())
}
