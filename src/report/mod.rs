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

//! Result aggregation and report output.
//!
//! Outcomes are aggregated into a [`ReportBatch`] sorted by host, then handed
//! to a [`ReportSink`] that writes either to the terminal or to a CSV file
//! plus an optional spreadsheet.
//!
//! ```rust
//! use fleetrun::executor::{ErrorDescriptor, ErrorKind, ExecutionOutcome};
//! use fleetrun::host::HostRecord;
//! use fleetrun::report::{Record, ReportBatch};
//!
//! let batch = ReportBatch::aggregate(vec![
//!     ExecutionOutcome::success(HostRecord::new("ws-02"), Record::new().with("Ram", "16")),
//!     ExecutionOutcome::failure(
//!         HostRecord::new("ws-01"),
//!         ErrorDescriptor::new(ErrorKind::Timeout, "timed out after 30s"),
//!     ),
//! ]);
//! assert_eq!(batch.success_count(), 1);
//! assert_eq!(batch.error_count(), 1);
//! ```

mod batch;
mod csv_writer;
mod error;
mod path;
mod record;
mod sink;
mod spreadsheet;
mod table;
mod terminal;

pub use batch::{aggregate, ReportBatch};
pub use csv_writer::write_csv;
pub use error::SinkError;
pub use path::OutputPathBuilder;
pub use record::{Record, Tabular, VALUE_COLUMN};
pub use sink::{
    select_terminal_mode, ArtifactStatus, Destination, ReportSink, SinkConfig, WriteResult,
    DEFAULT_LARGE_RESULT_THRESHOLD,
};
#[cfg(feature = "xlsx")]
pub use spreadsheet::XlsxSpreadsheet;
pub use spreadsheet::{default_backend, SpreadsheetBackend, UnavailableSpreadsheet};
pub use table::{ReportTable, ERROR_COLUMN, HOST_COLUMN, KIND_COLUMN};
pub use terminal::{render_listing, render_table, TerminalMode};
