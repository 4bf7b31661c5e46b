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

//! Target resolution: [`TargetSpec`] -> ordered, deduplicated hosts.

use futures::future::join_all;
use std::sync::Arc;

use super::directory::DirectoryService;
use super::hostfile::parse_hostfile;
use super::spec::TargetSpec;
use crate::host::{dedup_hosts, HostRecord};
use crate::utils::sanitize::{sanitize_host_prefix, sanitize_hostname};

/// Name used for [`TargetSpec::Local`] unless configured otherwise
pub const DEFAULT_LOCAL_NAME: &str = "localhost";

/// Turns target specifications into host lists.
///
/// Resolution never fails: an unreadable list file or an unavailable
/// directory is logged and the resolver returns what it has, possibly an
/// empty list. An empty result means "nothing to do".
#[derive(Clone)]
pub struct TargetResolver {
    directory: Option<Arc<dyn DirectoryService>>,
    local_name: String,
}

impl Default for TargetResolver {
    fn default() -> Self {
        Self::new()
    }
}

impl TargetResolver {
    /// Resolver without a directory: every token is taken literally.
    pub fn new() -> Self {
        Self {
            directory: None,
            local_name: DEFAULT_LOCAL_NAME.to_string(),
        }
    }

    pub fn with_directory(mut self, directory: Arc<dyn DirectoryService>) -> Self {
        self.directory = Some(directory);
        self
    }

    pub fn with_local_name(mut self, name: impl Into<String>) -> Self {
        self.local_name = name.into();
        self
    }

    /// Classify and resolve a free-form operator string.
    pub async fn resolve_str(&self, input: &str) -> Vec<HostRecord> {
        self.resolve(&TargetSpec::parse(input)).await
    }

    /// Resolve a target specification.
    pub async fn resolve(&self, spec: &TargetSpec) -> Vec<HostRecord> {
        tracing::debug!("Resolving {} target", spec.kind());

        let names: Vec<String> = match spec {
            TargetSpec::Local => vec![self.local_name.clone()],
            TargetSpec::SingleHost(name) => vec![name.clone()],
            TargetSpec::HostList(names) => names.clone(),
            TargetSpec::ListFile(path) => match parse_hostfile(path) {
                Ok(hosts) => hosts,
                Err(e) => {
                    tracing::warn!("Ignoring list file: {}", e);
                    Vec::new()
                }
            },
            TargetSpec::PrefixPattern(tokens) => self.expand_prefixes(tokens).await,
        };

        let hosts = dedup_hosts(names.into_iter().filter(|name| {
            match sanitize_hostname(name.trim()) {
                Ok(_) => true,
                Err(e) => {
                    tracing::warn!("Dropping target '{}': {}", name.trim(), e);
                    false
                }
            }
        }));

        tracing::debug!("Resolved {} host(s)", hosts.len());
        hosts
    }

    /// Expand every token through the directory.
    ///
    /// The directory's answer wins, so an exact name that is also a prefix
    /// of other names pulls those in as well. Only names the directory
    /// returned are kept: a token it does not know, or cannot answer for,
    /// contributes nothing. Without a directory every token is literal.
    async fn expand_prefixes(&self, tokens: &[String]) -> Vec<String> {
        let tokens: Vec<&String> = tokens
            .iter()
            .filter(|token| match sanitize_host_prefix(token) {
                Ok(_) => true,
                Err(e) => {
                    tracing::warn!("Dropping target token '{}': {}", token, e);
                    false
                }
            })
            .collect();

        let Some(directory) = &self.directory else {
            return tokens.into_iter().cloned().collect();
        };

        let lookups = tokens
            .iter()
            .map(|token| directory.computers_with_prefix(token.as_str()));
        let answers = join_all(lookups).await;

        let mut names = Vec::new();
        for (token, answer) in tokens.into_iter().zip(answers) {
            match answer {
                Ok(matches) if !matches.is_empty() => {
                    tracing::debug!(
                        "'{}' matched {} computer(s) in {}",
                        token,
                        matches.len(),
                        directory.name()
                    );
                    names.extend(matches);
                }
                Ok(_) => {
                    tracing::warn!("'{}' matched nothing in {}", token, directory.name());
                }
                Err(e) => {
                    tracing::warn!("{}; skipping '{}'", e, token);
                }
            }
        }

        names
    }
}
