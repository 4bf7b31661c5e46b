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

//! Reading one-host-per-line list files.

use std::path::Path;

use super::error::ResolutionError;

/// Maximum hostfile size (1 MiB)
const MAX_HOSTFILE_SIZE: u64 = 1024 * 1024;

/// Maximum number of lines read from a hostfile
const MAX_HOSTFILE_LINES: usize = 100_000;

/// Read host names from a file, one per line.
///
/// Lines are trimmed; blank lines and `#` comments are skipped. Each remaining
/// line is a literal host name and is never expanded further.
pub fn parse_hostfile(path: &Path) -> Result<Vec<String>, ResolutionError> {
    let metadata = std::fs::metadata(path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            ResolutionError::FileNotFound {
                path: path.display().to_string(),
            }
        } else {
            ResolutionError::FileReadError {
                path: path.display().to_string(),
                reason: e.to_string(),
            }
        }
    })?;

    if !metadata.is_file() {
        return Err(ResolutionError::FileReadError {
            path: path.display().to_string(),
            reason: "not a regular file".to_string(),
        });
    }

    if metadata.len() > MAX_HOSTFILE_SIZE {
        return Err(ResolutionError::FileReadError {
            path: path.display().to_string(),
            reason: format!(
                "file size {} bytes exceeds maximum allowed size of {} bytes",
                metadata.len(),
                MAX_HOSTFILE_SIZE
            ),
        });
    }

    let content = std::fs::read_to_string(path).map_err(|e| ResolutionError::FileReadError {
        path: path.display().to_string(),
        reason: e.to_string(),
    })?;
    // Notepad and PowerShell write a UTF-8 BOM
    let content = content.strip_prefix('\u{FEFF}').unwrap_or(&content);

    if content.lines().count() > MAX_HOSTFILE_LINES {
        return Err(ResolutionError::FileReadError {
            path: path.display().to_string(),
            reason: format!("file contains more than {MAX_HOSTFILE_LINES} lines (limit exceeded)"),
        });
    }

    Ok(content
        .lines()
        .map(|line| line.trim())
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .map(String::from)
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_parse_hostfile_skips_blank_lines_and_comments() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "hostA").unwrap();
        writeln!(file, "# workstation row 2").unwrap();
        writeln!(file, "  hostB  ").unwrap();
        writeln!(file).unwrap();
        writeln!(file, "hostC\r").unwrap();

        let hosts = parse_hostfile(file.path()).unwrap();
        assert_eq!(hosts, vec!["hostA", "hostB", "hostC"]);
    }

    #[test]
    fn test_parse_hostfile_with_bom_and_crlf() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "\u{FEFF}hostA\r\nhostB\r\n\r\nhostC\r\n").unwrap();

        let hosts = parse_hostfile(file.path()).unwrap();
        assert_eq!(hosts, vec!["hostA", "hostB", "hostC"]);
    }

    #[test]
    fn test_parse_hostfile_missing() {
        let result = parse_hostfile(Path::new("/nonexistent/fleetrun/hosts.txt"));
        assert!(matches!(result, Err(ResolutionError::FileNotFound { .. })));
    }

    #[test]
    fn test_parse_hostfile_rejects_directory() {
        let dir = tempfile::tempdir().unwrap();
        let result = parse_hostfile(dir.path());
        assert!(matches!(result, Err(ResolutionError::FileReadError { .. })));
    }

    #[test]
    fn test_parse_hostfile_too_large() {
        let mut file = NamedTempFile::new().unwrap();
        let line = "x".repeat(1023);
        for _ in 0..1100 {
            writeln!(file, "{line}").unwrap();
        }
        let result = parse_hostfile(file.path());
        assert!(matches!(result, Err(ResolutionError::FileReadError { .. })));
    }
}
