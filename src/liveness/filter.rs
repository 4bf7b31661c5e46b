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

//! Concurrent reachability prefilter.

use futures::future::join_all;
use std::sync::Arc;
use tokio::sync::Semaphore;

use super::probe::LivenessProbe;
use crate::host::HostRecord;

/// Outcome of probing one host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LivenessResult {
    pub host: HostRecord,
    pub reachable: bool,
}

/// Partitions hosts into reachable and unreachable.
#[derive(Clone)]
pub struct ConnectivityFilter {
    probe: Arc<dyn LivenessProbe>,
    probe_count: u32,
    max_parallel: usize,
}

impl ConnectivityFilter {
    /// `max_parallel == 0` probes every host at once.
    pub fn new(probe: Arc<dyn LivenessProbe>) -> Self {
        Self {
            probe,
            probe_count: 1,
            max_parallel: 0,
        }
    }

    /// Attempts per host; a host is reachable if any attempt succeeds.
    pub fn with_probe_count(mut self, probe_count: u32) -> Self {
        self.probe_count = probe_count.max(1);
        self
    }

    pub fn with_max_parallel(mut self, max_parallel: usize) -> Self {
        self.max_parallel = max_parallel;
        self
    }

    /// Reachable hosts only. Order is not guaranteed.
    pub async fn filter(&self, hosts: &[HostRecord]) -> Vec<HostRecord> {
        self.filter_verbose(hosts)
            .await
            .into_iter()
            .filter(|r| r.reachable)
            .map(|r| r.host)
            .collect()
    }

    /// One result per host, reachable or not.
    pub async fn filter_verbose(&self, hosts: &[HostRecord]) -> Vec<LivenessResult> {
        let permits = if self.max_parallel == 0 {
            hosts.len().max(1)
        } else {
            self.max_parallel
        };
        let semaphore = Arc::new(Semaphore::new(permits));

        let tasks: Vec<_> = hosts
            .iter()
            .map(|host| {
                let host = host.clone();
                let probe = Arc::clone(&self.probe);
                let probe_count = self.probe_count;
                let semaphore = Arc::clone(&semaphore);

                tokio::spawn(async move {
                    let Ok(_permit) = semaphore.acquire().await else {
                        return false;
                    };

                    for attempt in 1..=probe_count {
                        if probe.probe(&host).await {
                            tracing::debug!("{} reachable (attempt {})", host, attempt);
                            return true;
                        }
                    }
                    tracing::debug!("{} unreachable after {} probe(s)", host, probe_count);
                    false
                })
            })
            .collect();

        let results = join_all(tasks).await;

        hosts
            .iter()
            .zip(results)
            .map(|(host, result)| {
                let reachable = result.unwrap_or_else(|e| {
                    tracing::error!("Probe task failed for {}: {}", host, e);
                    false
                });
                LivenessResult {
                    host: host.clone(),
                    reachable,
                }
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::collections::HashMap;
    use std::sync::atomic::{AtomicU32, Ordering};
    use std::sync::Mutex;

    /// Succeeds for a host on the n-th attempt.
    struct ScriptedProbe {
        succeed_on: HashMap<String, u32>,
        attempts: Mutex<HashMap<String, u32>>,
        total: AtomicU32,
    }

    impl ScriptedProbe {
        fn new(succeed_on: &[(&str, u32)]) -> Self {
            Self {
                succeed_on: succeed_on
                    .iter()
                    .map(|(h, n)| (h.to_string(), *n))
                    .collect(),
                attempts: Mutex::new(HashMap::new()),
                total: AtomicU32::new(0),
            }
        }
    }

    #[async_trait]
    impl LivenessProbe for ScriptedProbe {
        async fn probe(&self, host: &HostRecord) -> bool {
            self.total.fetch_add(1, Ordering::SeqCst);
            let mut attempts = self.attempts.lock().unwrap();
            let n = attempts.entry(host.name().to_string()).or_insert(0);
            *n += 1;
            self.succeed_on
                .get(host.name())
                .is_some_and(|target| *n >= *target)
        }
    }

    fn hosts(names: &[&str]) -> Vec<HostRecord> {
        names.iter().map(|n| HostRecord::new(*n)).collect()
    }

    #[tokio::test]
    async fn test_filter_partitions_hosts() {
        let probe = Arc::new(ScriptedProbe::new(&[("up-1", 1), ("up-2", 1)]));
        let filter = ConnectivityFilter::new(probe);

        let mut reachable = filter.filter(&hosts(&["up-1", "down-1", "up-2"])).await;
        reachable.sort();
        assert_eq!(reachable, hosts(&["up-1", "up-2"]));
    }

    #[tokio::test]
    async fn test_verbose_reports_every_host() {
        let probe = Arc::new(ScriptedProbe::new(&[("up-1", 1)]));
        let filter = ConnectivityFilter::new(probe);

        let results = filter.filter_verbose(&hosts(&["up-1", "down-1"])).await;
        assert_eq!(results.len(), 2);
        assert!(results
            .iter()
            .any(|r| r.host.name() == "down-1" && !r.reachable));
        assert!(results.iter().any(|r| r.host.name() == "up-1" && r.reachable));
    }

    #[tokio::test]
    async fn test_probe_count_allows_retries() {
        let probe = Arc::new(ScriptedProbe::new(&[("flaky", 3)]));

        let single = ConnectivityFilter::new(probe.clone());
        assert!(single.filter(&hosts(&["flaky"])).await.is_empty());

        // Two more attempts: third overall succeeds
        let retrying = ConnectivityFilter::new(probe).with_probe_count(2);
        assert_eq!(retrying.filter(&hosts(&["flaky"])).await.len(), 1);
    }

    #[tokio::test]
    async fn test_stops_probing_after_success() {
        let probe = Arc::new(ScriptedProbe::new(&[("up", 1)]));
        let filter = ConnectivityFilter::new(probe.clone()).with_probe_count(4);

        filter.filter(&hosts(&["up"])).await;
        assert_eq!(probe.total.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_bounded_parallelism_still_probes_all() {
        let names: Vec<String> = (0..20).map(|i| format!("up-{i:02}")).collect();
        let script: Vec<(&str, u32)> = names.iter().map(|n| (n.as_str(), 1)).collect();
        let probe = Arc::new(ScriptedProbe::new(&script));
        let filter = ConnectivityFilter::new(probe).with_max_parallel(3);

        let input: Vec<HostRecord> = names.iter().map(|n| HostRecord::new(n.as_str())).collect();
        assert_eq!(filter.filter(&input).await.len(), 20);
    }

    #[tokio::test]
    async fn test_empty_input() {
        let probe = Arc::new(ScriptedProbe::new(&[]));
        let filter = ConnectivityFilter::new(probe);
        assert!(filter.filter_verbose(&[]).await.is_empty());
    }
}
