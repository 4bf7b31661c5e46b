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

//! Result table view state
//!
//! Cursor movement is kept separate from rendering so it can be tested
//! without a terminal.

/// Rows moved by PgUp/PgDn before the first render sets the real page size
const DEFAULT_PAGE_SIZE: usize = 10;

/// State of the scrollable result table
#[derive(Debug, Clone)]
pub struct TableApp {
    /// Index of the highlighted row
    pub selected: usize,
    /// Number of rows in the table
    pub row_count: usize,
    /// Rows visible at once; updated on every draw
    pub page_size: usize,
    /// Whether the view should close
    pub should_quit: bool,
    /// Whether to show the key help line
    pub show_help: bool,
}

impl TableApp {
    pub fn new(row_count: usize) -> Self {
        Self {
            selected: 0,
            row_count,
            page_size: DEFAULT_PAGE_SIZE,
            should_quit: false,
            show_help: false,
        }
    }

    pub fn quit(&mut self) {
        self.should_quit = true;
    }

    pub fn toggle_help(&mut self) {
        self.show_help = !self.show_help;
    }

    fn last_index(&self) -> usize {
        self.row_count.saturating_sub(1)
    }

    pub fn next(&mut self) {
        self.selected = (self.selected + 1).min(self.last_index());
    }

    pub fn previous(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }

    pub fn page_down(&mut self) {
        self.selected = (self.selected + self.page_size.max(1)).min(self.last_index());
    }

    pub fn page_up(&mut self) {
        self.selected = self.selected.saturating_sub(self.page_size.max(1));
    }

    pub fn first(&mut self) {
        self.selected = 0;
    }

    pub fn last(&mut self) {
        self.selected = self.last_index();
    }

    /// Rows fitting in a body of `height` lines (minus borders and header).
    pub fn set_viewport_height(&mut self, height: u16) {
        self.page_size = usize::from(height.saturating_sub(3)).max(1);
    }

    /// `current/total` position indicator.
    pub fn position(&self) -> String {
        if self.row_count == 0 {
            "0/0".to_string()
        } else {
            format!("{}/{}", self.selected + 1, self.row_count)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_navigation_clamps() {
        let mut app = TableApp::new(3);
        app.previous();
        assert_eq!(app.selected, 0);
        app.next();
        app.next();
        app.next();
        assert_eq!(app.selected, 2);
        assert_eq!(app.position(), "3/3");
        app.first();
        assert_eq!(app.selected, 0);
    }

    #[test]
    fn test_paging() {
        let mut app = TableApp::new(100);
        app.set_viewport_height(23);
        assert_eq!(app.page_size, 20);
        app.page_down();
        assert_eq!(app.selected, 20);
        app.last();
        assert_eq!(app.selected, 99);
        app.page_up();
        assert_eq!(app.selected, 79);
    }

    #[test]
    fn test_empty_table() {
        let mut app = TableApp::new(0);
        app.next();
        app.last();
        assert_eq!(app.selected, 0);
        assert_eq!(app.position(), "0/0");
    }
}
