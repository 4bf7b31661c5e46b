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

//! Layered report writing.
//!
//! The CSV file is the canonical artifact. The spreadsheet is attempted after
//! it and a spreadsheet failure only downgrades the [`WriteResult`].

use std::fmt;
use std::io::{IsTerminal, Write};
use std::path::{Path, PathBuf};

use super::batch::ReportBatch;
use super::csv_writer::write_csv;
use super::record::Tabular;
use super::spreadsheet::{default_backend, SpreadsheetBackend};
use super::table::ReportTable;
use super::terminal::{render_listing, render_table, TerminalMode};

/// Default row count above which the terminal shows a table instead of a listing.
pub const DEFAULT_LARGE_RESULT_THRESHOLD: usize = 20;

/// Where a report goes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Destination {
    Terminal,
    FilePair { csv: PathBuf, spreadsheet: PathBuf },
}

#[derive(Debug, Clone)]
pub struct SinkConfig {
    pub destination: Destination,
    /// Attempt the spreadsheet half of a file pair
    pub spreadsheet: bool,
    /// Rows above this count are a "large" result set
    pub large_result_threshold: usize,
    /// Allow the full-screen table for large terminal results
    pub interactive: bool,
    pub title: String,
}

impl SinkConfig {
    pub fn terminal() -> Self {
        Self {
            destination: Destination::Terminal,
            spreadsheet: true,
            large_result_threshold: DEFAULT_LARGE_RESULT_THRESHOLD,
            interactive: true,
            title: "Results".to_string(),
        }
    }

    pub fn file_pair(csv: impl Into<PathBuf>, spreadsheet: impl Into<PathBuf>) -> Self {
        Self {
            destination: Destination::FilePair {
                csv: csv.into(),
                spreadsheet: spreadsheet.into(),
            },
            ..Self::terminal()
        }
    }

    pub fn with_spreadsheet(mut self, enabled: bool) -> Self {
        self.spreadsheet = enabled;
        self
    }

    pub fn with_large_result_threshold(mut self, rows: usize) -> Self {
        self.large_result_threshold = rows;
        self
    }

    pub fn with_interactive(mut self, interactive: bool) -> Self {
        self.interactive = interactive;
        self
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }
}

/// What happened to one artifact.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ArtifactStatus {
    Written(PathBuf),
    Failed(String),
    Skipped,
}

impl ArtifactStatus {
    pub fn is_written(&self) -> bool {
        matches!(self, ArtifactStatus::Written(_))
    }

    pub fn is_failed(&self) -> bool {
        matches!(self, ArtifactStatus::Failed(_))
    }

    pub fn path(&self) -> Option<&Path> {
        match self {
            ArtifactStatus::Written(path) => Some(path),
            _ => None,
        }
    }

    fn label(&self) -> &'static str {
        match self {
            ArtifactStatus::Written(_) => "ok",
            ArtifactStatus::Failed(_) => "failed",
            ArtifactStatus::Skipped => "skipped",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WriteResult {
    pub csv: ArtifactStatus,
    pub spreadsheet: ArtifactStatus,
    /// Set when the report went to the terminal
    pub terminal: Option<TerminalMode>,
}

impl WriteResult {
    /// The CSV path, when it was written.
    pub fn canonical_artifact(&self) -> Option<&Path> {
        self.csv.path()
    }
}

impl fmt::Display for WriteResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "csv {}, spreadsheet {}",
            self.csv.label(),
            self.spreadsheet.label()
        )
    }
}

/// Pick how to show `rows` rows on the terminal.
pub fn select_terminal_mode(rows: usize, config: &SinkConfig, is_tty: bool) -> TerminalMode {
    if rows <= config.large_result_threshold {
        TerminalMode::Listing
    } else if config.interactive && is_tty {
        TerminalMode::Interactive
    } else {
        TerminalMode::Table
    }
}

/// Writes a [`ReportBatch`] to its configured destination.
pub struct ReportSink {
    spreadsheet: Box<dyn SpreadsheetBackend>,
}

impl Default for ReportSink {
    fn default() -> Self {
        Self::new()
    }
}

impl ReportSink {
    pub fn new() -> Self {
        Self {
            spreadsheet: default_backend(),
        }
    }

    /// Swap the spreadsheet backend.
    pub fn with_spreadsheet_backend(mut self, backend: Box<dyn SpreadsheetBackend>) -> Self {
        self.spreadsheet = backend;
        self
    }

    /// Write the batch. Never fails; failures are reported per artifact.
    ///
    /// An error-only batch still produces a report.
    pub fn write<T: Tabular>(&self, batch: &ReportBatch<T>, config: &SinkConfig) -> WriteResult {
        match &config.destination {
            Destination::Terminal => {
                let mode = self.write_terminal(&ReportTable::combined(batch), config);
                WriteResult {
                    csv: ArtifactStatus::Skipped,
                    spreadsheet: ArtifactStatus::Skipped,
                    terminal: Some(mode),
                }
            }
            Destination::FilePair { csv, spreadsheet } => {
                self.write_files(batch, config, csv, spreadsheet)
            }
        }
    }

    fn write_files<T: Tabular>(
        &self,
        batch: &ReportBatch<T>,
        config: &SinkConfig,
        csv_path: &Path,
        spreadsheet_path: &Path,
    ) -> WriteResult {
        let csv = match write_csv(&ReportTable::combined(batch), csv_path) {
            Ok(()) => ArtifactStatus::Written(csv_path.to_path_buf()),
            Err(e) => {
                tracing::error!("{}", e);
                ArtifactStatus::Failed(e.to_string())
            }
        };

        let spreadsheet = if !config.spreadsheet {
            ArtifactStatus::Skipped
        } else {
            let successes = ReportTable::successes(batch);
            let errors = ReportTable::errors(batch);
            match self.spreadsheet.write(&successes, &errors, spreadsheet_path) {
                Ok(()) => ArtifactStatus::Written(spreadsheet_path.to_path_buf()),
                Err(e) => {
                    tracing::warn!(
                        "Spreadsheet backend '{}' failed, CSV is the report: {}",
                        self.spreadsheet.name(),
                        e
                    );
                    ArtifactStatus::Failed(e.to_string())
                }
            }
        };

        WriteResult {
            csv,
            spreadsheet,
            terminal: None,
        }
    }

    fn write_terminal(&self, table: &ReportTable, config: &SinkConfig) -> TerminalMode {
        let stdout = std::io::stdout();
        let mode = select_terminal_mode(table.len(), config, stdout.is_terminal());

        if table.is_empty() {
            print_stdout("No results.\n");
            return TerminalMode::Listing;
        }

        match mode {
            TerminalMode::Listing => print_stdout(&render_listing(table)),
            TerminalMode::Table => print_stdout(&render_table(table)),
            TerminalMode::Interactive => {
                if let Err(e) = crate::ui::run_table_view(table, &config.title) {
                    tracing::warn!("Interactive table unavailable, printing instead: {:#}", e);
                    print_stdout(&render_table(table));
                    return TerminalMode::Table;
                }
            }
        }
        mode
    }
}

fn print_stdout(text: &str) {
    let mut stdout = std::io::stdout().lock();
    if let Err(e) = stdout.write_all(text.as_bytes()).and_then(|_| stdout.flush()) {
        tracing::debug!("Failed to write report to stdout: {}", e);
    }
}
