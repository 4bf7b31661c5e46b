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

use chrono::NaiveDate;
use std::path::{Path, PathBuf};

use super::sink::Destination;

const CSV_EXTENSION: &str = "csv";
const SPREADSHEET_EXTENSION: &str = "xlsx";

/// Builds date-stamped, collision-free report paths.
///
/// `<root>/<name>_<YYYY-MM-DD>.csv` and `.xlsx`; when either file of the pair
/// already exists, `_1`, `_2`, ... is appended until both names are free.
#[derive(Debug, Clone)]
pub struct OutputPathBuilder {
    root: PathBuf,
    date: NaiveDate,
}

impl OutputPathBuilder {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            date: chrono::Local::now().date_naive(),
        }
    }

    /// Fix the date stamp instead of using today.
    pub fn with_date(mut self, date: NaiveDate) -> Self {
        self.date = date;
        self
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Free `(csv, spreadsheet)` paths for a report called `name`.
    pub fn build(&self, name: &str) -> (PathBuf, PathBuf) {
        let stem = format!("{}_{}", sanitize_report_name(name), self.date.format("%Y-%m-%d"));

        let mut suffix = 0u32;
        loop {
            let base = if suffix == 0 {
                stem.clone()
            } else {
                format!("{stem}_{suffix}")
            };
            let csv = self.root.join(format!("{base}.{CSV_EXTENSION}"));
            let spreadsheet = self.root.join(format!("{base}.{SPREADSHEET_EXTENSION}"));
            if !csv.exists() && !spreadsheet.exists() {
                return (csv, spreadsheet);
            }
            suffix += 1;
        }
    }

    /// [`build`](Self::build) as a file-pair sink destination.
    pub fn destination(&self, name: &str) -> Destination {
        let (csv, spreadsheet) = self.build(name);
        Destination::FilePair { csv, spreadsheet }
    }
}

/// Keep report names to a single safe path component.
fn sanitize_report_name(name: &str) -> String {
    let cleaned: String = name
        .trim()
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '-' || c == '_' {
                c
            } else {
                '_'
            }
        })
        .collect();

    if cleaned.is_empty() {
        "report".to_string()
    } else {
        cleaned
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn builder(dir: &TempDir) -> OutputPathBuilder {
        OutputPathBuilder::new(dir.path()).with_date(NaiveDate::from_ymd_opt(2024, 3, 9).unwrap())
    }

    #[test]
    fn test_date_stamped_names() {
        let dir = TempDir::new().unwrap();
        let (csv, xlsx) = builder(&dir).build("DotNet Versions");
        assert_eq!(csv, dir.path().join("DotNet_Versions_2024-03-09.csv"));
        assert_eq!(xlsx, dir.path().join("DotNet_Versions_2024-03-09.xlsx"));
    }

    #[test]
    fn test_collision_suffix_checks_both_files() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join("scan_2024-03-09.xlsx"), b"").unwrap();
        std::fs::write(dir.path().join("scan_2024-03-09_1.csv"), b"").unwrap();

        let (csv, _) = builder(&dir).build("scan");
        assert_eq!(csv, dir.path().join("scan_2024-03-09_2.csv"));
    }

    #[test]
    fn test_name_cannot_escape_root() {
        assert_eq!(sanitize_report_name("../etc/passwd"), "___etc_passwd");
        assert_eq!(sanitize_report_name("  "), "report");
    }
}
