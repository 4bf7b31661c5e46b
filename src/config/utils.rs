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

//! Path helpers for configuration values.

use std::path::{Path, PathBuf};

fn home_dir() -> Option<PathBuf> {
    directories::BaseDirs::new().map(|dirs| dirs.home_dir().to_path_buf())
}

/// Expand a leading `~` or `~/` to the home directory.
pub fn expand_tilde(path: &Path) -> PathBuf {
    let Some(path_str) = path.to_str() else {
        return path.to_path_buf();
    };

    if path_str == "~" || path_str.starts_with("~/") {
        if let Some(home) = std::env::var_os("HOME").map(PathBuf::from).or_else(home_dir) {
            return match path_str.strip_prefix("~/") {
                Some(rest) => home.join(rest),
                None => home,
            };
        }
    }
    path.to_path_buf()
}

/// Expand `${VAR}` and `$VAR`. Unknown variables are left as written.
pub fn expand_env_vars(input: &str) -> String {
    let mut output = String::with_capacity(input.len());
    let mut chars = input.char_indices().peekable();

    while let Some((idx, ch)) = chars.next() {
        if ch != '$' {
            output.push(ch);
            continue;
        }

        let rest = &input[idx + 1..];
        if let Some(braced) = rest.strip_prefix('{') {
            if let Some(end) = braced.find('}') {
                let name = &braced[..end];
                if is_var_name(name) {
                    output.push_str(&lookup_or(name, &input[idx..idx + end + 3]));
                    // Skip `{name}`.
                    for _ in 0..name.chars().count() + 2 {
                        chars.next();
                    }
                    continue;
                }
            }
            output.push(ch);
            continue;
        }

        let name_len = rest
            .find(|c: char| !(c.is_ascii_alphanumeric() || c == '_'))
            .unwrap_or(rest.len());
        if name_len == 0 {
            output.push(ch);
            continue;
        }
        let name = &rest[..name_len];
        output.push_str(&lookup_or(name, &input[idx..idx + name_len + 1]));
        for _ in 0..name_len {
            chars.next();
        }
    }

    output
}

fn is_var_name(name: &str) -> bool {
    !name.is_empty() && name.chars().all(|c| c.is_ascii_alphanumeric() || c == '_')
}

fn lookup_or(name: &str, original: &str) -> String {
    std::env::var(name).unwrap_or_else(|_| {
        tracing::debug!("Environment variable {} not found", name);
        original.to_string()
    })
}

/// Environment variables first, then `~`.
pub fn expand_path(value: &str) -> PathBuf {
    expand_tilde(Path::new(&expand_env_vars(value)))
}
