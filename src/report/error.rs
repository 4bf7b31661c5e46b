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

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while writing a report artifact.
#[derive(Debug, Error)]
pub enum SinkError {
    #[error("Failed to create report directory {path}: {source}")]
    CreateDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("CSV write to {path} failed: {source}")]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    #[error("Spreadsheet write to {path} failed: {reason}")]
    Spreadsheet { path: PathBuf, reason: String },

    #[error("Spreadsheet backend unavailable: {0}")]
    BackendUnavailable(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = SinkError::BackendUnavailable("xlsx support not compiled in".to_string());
        assert_eq!(
            err.to_string(),
            "Spreadsheet backend unavailable: xlsx support not compiled in"
        );

        let err = SinkError::Spreadsheet {
            path: PathBuf::from("/tmp/r.xlsx"),
            reason: "disk full".to_string(),
        };
        assert!(err.to_string().contains("/tmp/r.xlsx"));
    }
}
