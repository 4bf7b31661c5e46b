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

//! Restores the terminal when the table view exits, errors or panics.

use crossterm::{
    cursor, execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use std::io::{self, Write};

/// Raw mode plus alternate screen, undone on drop in reverse order.
pub struct TerminalGuard {
    raw_mode: bool,
    alternate_screen: bool,
}

impl TerminalGuard {
    pub fn new() -> io::Result<Self> {
        let mut guard = Self {
            raw_mode: false,
            alternate_screen: false,
        };

        enable_raw_mode()?;
        guard.raw_mode = true;

        // On failure here the partially built guard drops and leaves raw mode.
        execute!(io::stdout(), EnterAlternateScreen, cursor::Hide)?;
        guard.alternate_screen = true;

        Ok(guard)
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        if self.alternate_screen {
            if let Err(e) = execute!(io::stdout(), LeaveAlternateScreen, cursor::Show) {
                tracing::error!("Failed to leave alternate screen: {}", e);
                let _ = writeln!(io::stderr(), "\r\nWarning: Failed to restore screen");
            }
        }
        if self.raw_mode {
            if let Err(e) = disable_raw_mode() {
                tracing::error!("Failed to disable raw mode: {}", e);
                let _ = writeln!(io::stderr(), "\r\nWarning: Failed to restore terminal mode");
            }
        }
        if std::thread::panicking() {
            let _ = write!(io::stderr(), "\x1b[0m\x1b[?25h");
            let _ = io::stderr().flush();
        }
    }
}
