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

//! Plain-text renderings of a report for the terminal.

use owo_colors::OwoColorize;
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use super::table::{ReportTable, ERROR_COLUMN, HOST_COLUMN};

/// Widest a single cell may be in the aligned table.
const MAX_CELL_WIDTH: usize = 48;

/// How a terminal report was shown.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TerminalMode {
    /// One block per host
    Listing,
    /// Aligned columns on stdout
    Table,
    /// Scrollable full-screen table
    Interactive,
}

/// One block per host; blank cells are skipped.
pub fn render_listing(table: &ReportTable) -> String {
    let host_idx = table.columns.iter().position(|c| c == HOST_COLUMN);
    let error_idx = table.columns.iter().position(|c| c == ERROR_COLUMN);

    let mut output = String::new();
    for row in &table.rows {
        let host = host_idx.and_then(|i| row.get(i)).map_or("", String::as_str);
        let failed = error_idx
            .and_then(|i| row.get(i))
            .is_some_and(|cell| !cell.is_empty());

        let bullet = if failed {
            "●".red().to_string()
        } else {
            "●".green().to_string()
        };
        output.push_str(&format!("{} {}\n", bullet, host.bold()));

        for (idx, (column, cell)) in table.columns.iter().zip(row).enumerate() {
            if Some(idx) == host_idx || cell.is_empty() {
                continue;
            }
            if Some(idx) == error_idx {
                output.push_str(&format!("    {}: {}\n", column.red(), cell));
            } else {
                output.push_str(&format!("    {column}: {cell}\n"));
            }
        }
    }
    output
}

/// Aligned columns with a header rule. No color, so it is safe to pipe.
pub fn render_table(table: &ReportTable) -> String {
    let mut widths: Vec<usize> = table
        .columns
        .iter()
        .map(|c| c.width().min(MAX_CELL_WIDTH))
        .collect();
    for row in &table.rows {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.width().min(MAX_CELL_WIDTH));
        }
    }

    let mut output = String::new();
    output.push_str(&format_row(&table.columns, &widths));
    let rule: Vec<String> = widths.iter().map(|w| "─".repeat(*w)).collect();
    output.push_str(&format_row(&rule, &widths));
    for row in &table.rows {
        output.push_str(&format_row(row, &widths));
    }
    output
}

fn format_row(cells: &[String], widths: &[usize]) -> String {
    let line = cells
        .iter()
        .zip(widths)
        .map(|(cell, width)| pad_to_width(&truncate_to_width(cell, *width), *width))
        .collect::<Vec<_>>()
        .join("  ");
    format!("{}\n", line.trim_end())
}

/// Cut `s` to `max_width` display columns, marking the cut with `...`.
pub(crate) fn truncate_to_width(s: &str, max_width: usize) -> String {
    let s = s.lines().next().unwrap_or("");
    if s.width() <= max_width {
        return s.to_string();
    }

    let budget = max_width.saturating_sub(3);
    let mut width = 0;
    let mut out = String::new();
    for ch in s.chars() {
        let ch_width = ch.width().unwrap_or(0);
        if width + ch_width > budget {
            break;
        }
        width += ch_width;
        out.push(ch);
    }
    out.push_str("...");
    out
}

fn pad_to_width(s: &str, width: usize) -> String {
    let pad = width.saturating_sub(s.width());
    format!("{s}{}", " ".repeat(pad))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table() -> ReportTable {
        ReportTable {
            columns: vec!["Host".into(), "Version".into(), "Error".into()],
            rows: vec![
                vec!["ws-01".into(), "4.8".into(), "".into()],
                vec!["ws-02".into(), "".into(), "timeout: timed out after 30s".into()],
            ],
        }
    }

    #[test]
    fn test_render_listing_skips_blank_cells() {
        let out = render_listing(&table());
        assert!(out.contains("ws-01"));
        assert!(out.contains("    Version: 4.8"));
        assert!(out.contains("timed out after 30s"));
        assert_eq!(out.matches("Version").count(), 1);
    }

    #[test]
    fn test_render_table_alignment() {
        let out = render_table(&table());
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines.len(), 4);
        assert!(lines[0].starts_with("Host   Version  Error"));
        assert!(lines[1].starts_with("─────"));
        assert!(lines[2].starts_with("ws-01  4.8"));
        assert!(lines[3].starts_with("ws-02           timeout"));
    }

    #[test]
    fn test_truncate_to_width() {
        assert_eq!(truncate_to_width("short", 10), "short");
        assert_eq!(truncate_to_width("abcdefghijkl", 8), "abcde...");
        assert_eq!(truncate_to_width("first\nsecond", 20), "first");
    }
}
