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

//! Flattening a batch into rows and columns.

use super::batch::ReportBatch;
use super::record::Tabular;

pub const HOST_COLUMN: &str = "Host";
pub const ERROR_COLUMN: &str = "Error";
pub const KIND_COLUMN: &str = "Kind";

/// A rectangular string table; every row has one cell per column.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReportTable {
    pub columns: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl ReportTable {
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// `Host`, the union of payload columns, then `Error`.
    ///
    /// Successes come first; error rows leave payload cells blank. A payload
    /// column literally named `Host` or `Error` is ignored in favour of the tag.
    pub fn combined<T: Tabular>(batch: &ReportBatch<T>) -> Self {
        let payload_columns = payload_columns(batch);

        let mut columns = Vec::with_capacity(payload_columns.len() + 2);
        columns.push(HOST_COLUMN.to_string());
        columns.extend(payload_columns.iter().cloned());
        columns.push(ERROR_COLUMN.to_string());

        let mut rows = Vec::with_capacity(batch.total());
        for (host, value) in &batch.successes {
            let mut row = Vec::with_capacity(columns.len());
            row.push(host.name().to_string());
            row.extend(cells(&payload_columns, &value.fields()));
            row.push(String::new());
            rows.push(row);
        }
        for (host, error) in &batch.errors {
            let mut row = vec![host.name().to_string()];
            row.extend(std::iter::repeat(String::new()).take(payload_columns.len()));
            row.push(error.to_string());
            rows.push(row);
        }

        Self { columns, rows }
    }

    /// `Host` plus payload columns, successes only.
    pub fn successes<T: Tabular>(batch: &ReportBatch<T>) -> Self {
        let payload_columns = payload_columns(batch);

        let mut columns = vec![HOST_COLUMN.to_string()];
        columns.extend(payload_columns.iter().cloned());

        let rows = batch
            .successes
            .iter()
            .map(|(host, value)| {
                let mut row = vec![host.name().to_string()];
                row.extend(cells(&payload_columns, &value.fields()));
                row
            })
            .collect();

        Self { columns, rows }
    }

    /// `Host`, `Kind`, `Error` for every failed host.
    pub fn errors<T>(batch: &ReportBatch<T>) -> Self {
        let columns = vec![
            HOST_COLUMN.to_string(),
            KIND_COLUMN.to_string(),
            ERROR_COLUMN.to_string(),
        ];
        let rows = batch
            .errors
            .iter()
            .map(|(host, error)| {
                vec![
                    host.name().to_string(),
                    error.kind.to_string(),
                    error.message.clone(),
                ]
            })
            .collect();

        Self { columns, rows }
    }
}

/// Union of payload columns in first-seen order.
fn payload_columns<T: Tabular>(batch: &ReportBatch<T>) -> Vec<String> {
    let mut columns: Vec<String> = Vec::new();
    for (_, value) in &batch.successes {
        for (column, _) in value.fields() {
            if column == HOST_COLUMN || column == ERROR_COLUMN {
                continue;
            }
            if !columns.contains(&column) {
                columns.push(column);
            }
        }
    }
    columns
}

fn cells(columns: &[String], fields: &[(String, String)]) -> Vec<String> {
    columns
        .iter()
        .map(|column| {
            fields
                .iter()
                .find(|(c, _)| c == column)
                .map(|(_, v)| v.clone())
                .unwrap_or_default()
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::executor::{ErrorDescriptor, ErrorKind, ExecutionOutcome};
    use crate::host::HostRecord;
    use crate::report::Record;

    fn sample() -> ReportBatch<Record> {
        ReportBatch::aggregate(vec![
            ExecutionOutcome::success(
                HostRecord::new("ws-02"),
                Record::new().with("Version", "4.8").with("Host", "WS-02"),
            ),
            ExecutionOutcome::success(
                HostRecord::new("ws-01"),
                Record::new().with("Release", "528040").with("Version", "4.7.2"),
            ),
            ExecutionOutcome::failure(
                HostRecord::new("ws-03"),
                ErrorDescriptor::new(ErrorKind::Timeout, "timed out after 30s"),
            ),
        ])
    }

    #[test]
    fn test_combined_layout() {
        let table = ReportTable::combined(&sample());
        assert_eq!(table.columns, vec!["Host", "Release", "Version", "Error"]);
        assert_eq!(table.rows[0], vec!["ws-01", "528040", "4.7.2", ""]);
        assert_eq!(table.rows[1], vec!["ws-02", "", "4.8", ""]);
        assert_eq!(table.rows[2], vec!["ws-03", "", "", "timeout: timed out after 30s"]);
    }

    #[test]
    fn test_error_only_table_still_has_rows() {
        let batch: ReportBatch<Record> = ReportBatch::aggregate(vec![ExecutionOutcome::failure(
            HostRecord::new("ws-09"),
            ErrorDescriptor::unreachable(),
        )]);
        let table = ReportTable::combined(&batch);
        assert_eq!(table.columns, vec!["Host", "Error"]);
        assert_eq!(table.len(), 1);
        assert!(ReportTable::successes(&batch).is_empty());
        assert_eq!(ReportTable::errors(&batch).rows[0][1], "unreachable");
    }
}
