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

//! Caller-supplied description of which hosts to operate on.

use std::path::{Path, PathBuf};

/// Names that mean "this machine".
const LOCAL_SENTINELS: [&str; 2] = ["localhost", "127.0.0.1"];

/// Which hosts a batch should run against.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TargetSpec {
    /// The local machine
    Local,
    /// One literal host name, never expanded
    SingleHost(String),
    /// Already-materialized list of literal host names
    HostList(Vec<String>),
    /// File with one host name per line
    ListFile(PathBuf),
    /// One or more tokens expanded through the directory service
    PrefixPattern(Vec<String>),
}

impl TargetSpec {
    /// Classify a free-form operator string.
    ///
    /// Disambiguation order:
    /// 1. empty, `localhost` or `127.0.0.1` -> [`TargetSpec::Local`]
    /// 2. path of an existing file -> [`TargetSpec::ListFile`]
    /// 3. otherwise split on commas -> [`TargetSpec::PrefixPattern`]
    pub fn parse(input: &str) -> Self {
        let trimmed = input.trim();

        if trimmed.is_empty()
            || LOCAL_SENTINELS
                .iter()
                .any(|s| s.eq_ignore_ascii_case(trimmed))
        {
            return TargetSpec::Local;
        }

        if Path::new(trimmed).is_file() {
            return TargetSpec::ListFile(PathBuf::from(trimmed));
        }

        let tokens: Vec<String> = trimmed
            .split(',')
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .map(String::from)
            .collect();

        if tokens.is_empty() {
            // Input was only commas and whitespace
            return TargetSpec::HostList(Vec::new());
        }

        TargetSpec::PrefixPattern(tokens)
    }

    /// Short label used in log lines.
    pub fn kind(&self) -> &'static str {
        match self {
            TargetSpec::Local => "local",
            TargetSpec::SingleHost(_) => "single host",
            TargetSpec::HostList(_) => "host list",
            TargetSpec::ListFile(_) => "list file",
            TargetSpec::PrefixPattern(_) => "prefix pattern",
        }
    }
}

impl From<&str> for TargetSpec {
    fn from(input: &str) -> Self {
        TargetSpec::parse(input)
    }
}

impl From<Vec<String>> for TargetSpec {
    fn from(names: Vec<String>) -> Self {
        TargetSpec::HostList(names)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::NamedTempFile;

    #[test]
    fn test_parse_local_sentinels() {
        assert_eq!(TargetSpec::parse(""), TargetSpec::Local);
        assert_eq!(TargetSpec::parse("   "), TargetSpec::Local);
        assert_eq!(TargetSpec::parse("localhost"), TargetSpec::Local);
        assert_eq!(TargetSpec::parse("LOCALHOST"), TargetSpec::Local);
        assert_eq!(TargetSpec::parse("127.0.0.1"), TargetSpec::Local);
    }

    #[test]
    fn test_parse_existing_file_wins_over_pattern() {
        let file = NamedTempFile::new().unwrap();
        let path = file.path().to_string_lossy().to_string();
        assert_eq!(
            TargetSpec::parse(&path),
            TargetSpec::ListFile(file.path().to_path_buf())
        );
    }

    #[test]
    fn test_parse_missing_file_is_pattern() {
        let spec = TargetSpec::parse("/nonexistent/hosts.txt");
        assert_eq!(
            spec,
            TargetSpec::PrefixPattern(vec!["/nonexistent/hosts.txt".to_string()])
        );
    }

    #[test]
    fn test_parse_comma_list() {
        let spec = TargetSpec::parse("lab-01, lab-02,,lab-");
        assert_eq!(
            spec,
            TargetSpec::PrefixPattern(vec![
                "lab-01".to_string(),
                "lab-02".to_string(),
                "lab-".to_string()
            ])
        );
    }

    #[test]
    fn test_parse_only_commas() {
        assert_eq!(TargetSpec::parse(", ,"), TargetSpec::HostList(Vec::new()));
    }

    #[test]
    fn test_from_vec_is_literal_list() {
        let spec: TargetSpec = vec!["a".to_string(), "b".to_string()].into();
        assert_eq!(spec.kind(), "host list");
    }
}
