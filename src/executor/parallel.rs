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

//! Core fan-out executor implementation.

use futures::future::join_all;
use indicatif::MultiProgress;
use std::collections::HashSet;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Semaphore;
use tokio_util::sync::CancellationToken;

use crate::host::HostRecord;

use super::execution_strategy::{create_progress_style, execute_payload_task, setup_progress_bar};
use super::payload::Payload;
use super::result_types::{ErrorDescriptor, ErrorKind, ExecutionOutcome};

/// Runs one payload across many hosts concurrently.
///
/// Every host submitted gets exactly one [`ExecutionOutcome`]; a failure,
/// timeout or panic on one host never affects another. The call returns only
/// after every host has finished.
#[derive(Debug, Clone)]
pub struct FanOutExecutor {
    pub(crate) max_parallel: usize,
    pub(crate) timeout: Option<Duration>,
    pub(crate) show_progress: bool,
    pub(crate) cancel: CancellationToken,
}

impl Default for FanOutExecutor {
    fn default() -> Self {
        Self::new(0)
    }
}

impl FanOutExecutor {
    /// Create an executor with a worker cap; `0` runs every host at once.
    pub fn new(max_parallel: usize) -> Self {
        Self {
            max_parallel,
            timeout: None,
            show_progress: false,
            cancel: CancellationToken::new(),
        }
    }

    /// Set the per-host timeout. `None` waits indefinitely.
    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    /// Show per-host spinner lines on stderr while the batch runs.
    pub fn with_progress(mut self, show_progress: bool) -> Self {
        self.show_progress = show_progress;
        self
    }

    /// Attach a batch-level cancellation token.
    ///
    /// On cancellation, hosts still queued or running finish with an
    /// [`ErrorKind::Cancelled`] outcome; finished hosts keep theirs.
    pub fn with_cancellation(mut self, cancel: CancellationToken) -> Self {
        self.cancel = cancel;
        self
    }

    /// Execute `payload` on all hosts in parallel.
    ///
    /// Duplicate hosts (case-insensitive) run once and get one outcome.
    /// Outcome order is not meaningful; aggregate to sort.
    pub async fn execute<P: Payload>(
        &self,
        hosts: &[HostRecord],
        payload: Arc<P>,
    ) -> Vec<ExecutionOutcome<P::Output>> {
        let hosts = unique_hosts(hosts);
        if hosts.is_empty() {
            return Vec::new();
        }

        let permits = if self.max_parallel == 0 {
            hosts.len()
        } else {
            self.max_parallel.min(hosts.len())
        };
        let semaphore = Arc::new(Semaphore::new(permits));
        let multi_progress = self.show_progress.then(MultiProgress::new);
        let style = create_progress_style();

        tracing::info!(
            "Dispatching to {} host(s) with {} worker(s)",
            hosts.len(),
            permits
        );

        let tasks: Vec<_> = hosts
            .iter()
            .map(|host| {
                let host = host.clone();
                let payload = Arc::clone(&payload);
                let timeout = self.timeout;
                let cancel = self.cancel.clone();
                let semaphore = Arc::clone(&semaphore);
                let pb = setup_progress_bar(multi_progress.as_ref(), &host, style.clone(), "Queued");

                tokio::spawn(execute_payload_task(
                    host, payload, timeout, cancel, semaphore, pb,
                ))
            })
            .collect();

        let results = join_all(tasks).await;
        collect_outcomes(&hosts, results)
    }
}

/// Drop repeated hosts, keeping the first spelling.
fn unique_hosts(hosts: &[HostRecord]) -> Vec<HostRecord> {
    let mut seen = HashSet::new();
    let unique: Vec<HostRecord> = hosts
        .iter()
        .filter(|h| seen.insert(h.key().to_string()))
        .cloned()
        .collect();

    if unique.len() != hosts.len() {
        tracing::warn!(
            "Ignoring {} duplicate host(s) in batch",
            hosts.len() - unique.len()
        );
    }
    unique
}

/// Collect task results, turning panicked workers into failed outcomes.
fn collect_outcomes<T>(
    hosts: &[HostRecord],
    results: Vec<Result<ExecutionOutcome<T>, tokio::task::JoinError>>,
) -> Vec<ExecutionOutcome<T>> {
    hosts
        .iter()
        .zip(results)
        .map(|(host, result)| match result {
            Ok(outcome) => outcome,
            Err(e) => {
                tracing::error!("Task failed for host {}: {}", host, e);
                ExecutionOutcome::failure(
                    host.clone(),
                    ErrorDescriptor::new(ErrorKind::Panicked, format!("Task execution failed: {e}")),
                )
            }
        })
        .collect()
}
