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

pub mod tui;

pub use tui::run_table_view;

use crate::liveness::LivenessResult;
use crate::report::WriteResult;
use owo_colors::OwoColorize;
use std::time::Duration;
use unicode_width::UnicodeWidthStr;

fn terminal_width() -> usize {
    terminal_size::terminal_size()
        .map(|(w, _)| w.0 as usize)
        .unwrap_or(80)
}

pub struct OutputFormatter;

impl OutputFormatter {
    pub fn format_header(title: &str) -> String {
        let width = terminal_width();
        let border = "─".repeat(width);
        let padding = width.saturating_sub(title.width() + 2) / 2;

        format!(
            "{}\n{}{}\n{}",
            border.dimmed(),
            " ".repeat(padding),
            format!(" {title} ").cyan().bold(),
            border.dimmed()
        )
    }

    pub fn format_batch_header(command: &str, host_count: usize) -> String {
        format!(
            "\n{} {} on {} {}:\n{}\n",
            "►".cyan().bold(),
            "Executing".cyan(),
            host_count.to_string().bold(),
            if host_count == 1 { "host" } else { "hosts" },
            format!("  {command}").dimmed()
        )
    }

    /// One colored line per probed host.
    pub fn format_liveness(results: &[LivenessResult]) -> String {
        let mut output = String::new();
        for result in results {
            if result.reachable {
                output.push_str(&format!(
                    "{} {}: {}\n",
                    "●".green(),
                    result.host.to_string().bold(),
                    "Reachable".green()
                ));
            } else {
                output.push_str(&format!(
                    "{} {}: {}\n",
                    "●".red(),
                    result.host.to_string().bold(),
                    "Unreachable".red()
                ));
            }
        }
        output
    }

    pub fn format_summary(total: usize, success: usize, failed: usize) -> String {
        let mut parts = vec![format!(
            "{} {}",
            total.to_string().bold(),
            if total == 1 { "host" } else { "hosts" }
        )];

        if success > 0 {
            parts.push(format!(
                "{} {}",
                success.to_string().green().bold(),
                "succeeded".green()
            ));
        }

        if failed > 0 {
            parts.push(format!(
                "{} {}",
                failed.to_string().red().bold(),
                "failed".red()
            ));
        }

        let rule = "═".repeat(terminal_width());
        format!(
            "\n{}\n{}\n{}\n",
            rule.dimmed(),
            format!(" Summary: {} ", parts.join(" • ")).bold(),
            rule.dimmed()
        )
    }

    /// Where the report files went, with degraded artifacts called out.
    pub fn format_write_result(result: &WriteResult) -> String {
        let mut lines = Vec::new();
        if let Some(path) = result.csv.path() {
            lines.push(format!("{} CSV report: {}", "●".green(), path.display()));
        } else if result.csv.is_failed() {
            lines.push(format!("{} CSV report could not be written", "●".red()));
        }
        if let Some(path) = result.spreadsheet.path() {
            lines.push(format!("{} Spreadsheet: {}", "●".green(), path.display()));
        } else if result.spreadsheet.is_failed() {
            lines.push(format!(
                "{} Spreadsheet not written; the CSV is the report",
                "●".yellow()
            ));
        }
        lines.join("\n")
    }
}

/// Format a Duration into a human-readable string
pub fn format_duration(duration: Duration) -> String {
    let total_seconds = duration.as_secs_f64();

    if total_seconds < 1.0 {
        format!("{:.1} ms", duration.as_secs_f64() * 1000.0)
    } else if total_seconds < 60.0 {
        format!("{total_seconds:.2} s")
    } else {
        let minutes = duration.as_secs() / 60;
        let seconds = duration.as_secs() % 60;
        format!("{minutes}m {seconds}s")
    }
}
