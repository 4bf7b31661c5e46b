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

//! CSV backend, the report format that must always succeed.

use std::path::Path;

use super::error::SinkError;
use super::table::ReportTable;

/// Create the parent directory of a report artifact if needed.
pub(crate) fn ensure_parent(path: &Path) -> Result<(), SinkError> {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() && !parent.exists() => {
            std::fs::create_dir_all(parent).map_err(|source| SinkError::CreateDir {
                path: parent.to_path_buf(),
                source,
            })
        }
        _ => Ok(()),
    }
}

/// Write `table` to `path`, header row first.
pub fn write_csv(table: &ReportTable, path: &Path) -> Result<(), SinkError> {
    ensure_parent(path)?;

    let csv_err = |source: csv::Error| SinkError::Csv {
        path: path.to_path_buf(),
        source,
    };

    let mut writer = csv::Writer::from_path(path).map_err(csv_err)?;
    writer.write_record(&table.columns).map_err(csv_err)?;
    for row in &table.rows {
        writer.write_record(row).map_err(csv_err)?;
    }
    writer
        .flush()
        .map_err(|e| csv_err(csv::Error::from(e)))?;

    tracing::debug!("Wrote {} row(s) to {}", table.len(), path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_write_csv_quotes_and_creates_dirs() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("report.csv");
        let table = ReportTable {
            columns: vec!["Host".to_string(), "Output".to_string()],
            rows: vec![vec!["ws-01".to_string(), "a, b".to_string()]],
        };

        write_csv(&table, &path).unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        assert_eq!(content, "Host,Output\nws-01,\"a, b\"\n");
    }

    #[test]
    fn test_write_csv_to_directory_fails() {
        let dir = TempDir::new().unwrap();
        let table = ReportTable::default();
        let err = write_csv(&table, dir.path()).unwrap_err();
        assert!(matches!(err, SinkError::Csv { .. }));
    }
}
