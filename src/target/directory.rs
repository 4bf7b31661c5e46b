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

//! Organizational directory lookups used for prefix expansion.

use async_trait::async_trait;
use std::path::Path;
use std::time::Duration;

use super::error::ResolutionError;
use super::hostfile::parse_hostfile;
use crate::utils::command::CommandTemplate;

/// Default timeout for an external directory lookup
pub const DEFAULT_LOOKUP_TIMEOUT: Duration = Duration::from_secs(30);

/// Query-by-prefix access to the host inventory.
///
/// An exact host name is just a prefix with a single match, so callers never
/// need to say which one they mean.
#[async_trait]
pub trait DirectoryService: Send + Sync {
    /// All computer names starting with `prefix` (case-insensitive).
    async fn computers_with_prefix(&self, prefix: &str) -> Result<Vec<String>, ResolutionError>;

    /// Human-readable backend name for logs.
    fn name(&self) -> &str;
}

/// In-memory inventory, typically loaded from configuration or a file.
#[derive(Debug, Clone, Default)]
pub struct StaticDirectory {
    computers: Vec<String>,
}

impl StaticDirectory {
    pub fn new<I, S>(computers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            computers: computers
                .into_iter()
                .map(Into::into)
                .map(|c: String| c.trim().to_string())
                .filter(|c| !c.is_empty())
                .collect(),
        }
    }

    /// Load an inventory file (same format as a hostfile).
    pub fn from_file(path: &Path) -> Result<Self, ResolutionError> {
        Ok(Self::new(parse_hostfile(path)?))
    }

    /// Merge another inventory into this one.
    pub fn extend<I, S>(&mut self, computers: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let other = Self::new(computers);
        self.computers.extend(other.computers);
    }

    pub fn len(&self) -> usize {
        self.computers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.computers.is_empty()
    }
}

#[async_trait]
impl DirectoryService for StaticDirectory {
    async fn computers_with_prefix(&self, prefix: &str) -> Result<Vec<String>, ResolutionError> {
        let prefix = prefix.to_ascii_lowercase();
        Ok(self
            .computers
            .iter()
            .filter(|c| c.to_ascii_lowercase().starts_with(&prefix))
            .cloned()
            .collect())
    }

    fn name(&self) -> &str {
        "static inventory"
    }
}

/// Directory backed by an external lookup command.
///
/// The command gets the prefix through a `{prefix}` placeholder and prints
/// one computer name per line. Any LDAP or CMDB client can sit behind it.
#[derive(Debug, Clone)]
pub struct CommandDirectory {
    template: CommandTemplate,
    timeout: Duration,
}

impl CommandDirectory {
    pub fn new(template: CommandTemplate) -> Self {
        Self {
            template,
            timeout: DEFAULT_LOOKUP_TIMEOUT,
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

#[async_trait]
impl DirectoryService for CommandDirectory {
    async fn computers_with_prefix(&self, prefix: &str) -> Result<Vec<String>, ResolutionError> {
        let vars = [("prefix", prefix)];
        let run = self.template.run(&vars);

        let output = match tokio::time::timeout(self.timeout, run).await {
            Ok(Ok(output)) => output,
            Ok(Err(e)) => {
                return Err(ResolutionError::DirectoryUnavailable {
                    prefix: prefix.to_string(),
                    reason: format!("{e:#}"),
                })
            }
            Err(_) => {
                return Err(ResolutionError::DirectoryTimeout {
                    prefix: prefix.to_string(),
                    seconds: self.timeout.as_secs(),
                })
            }
        };

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(ResolutionError::DirectoryUnavailable {
                prefix: prefix.to_string(),
                reason: format!(
                    "'{}' exited with {}: {}",
                    self.template.program(),
                    output.status,
                    stderr.trim()
                ),
            });
        }

        let lowered = prefix.to_ascii_lowercase();
        Ok(String::from_utf8_lossy(&output.stdout)
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            // Lookup tools tend to match loosely; keep the prefix contract strict
            .filter(|line| line.to_ascii_lowercase().starts_with(&lowered))
            .map(String::from)
            .collect())
    }

    fn name(&self) -> &str {
        self.template.program()
    }
}
