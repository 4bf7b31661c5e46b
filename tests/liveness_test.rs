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

//! Connectivity prefilter against real sockets, and its hand-off to the
//! executor and report.

use fleetrun::executor::{payload_fn, ErrorKind, ExecutionOutcome, FanOutExecutor};
use fleetrun::host::HostRecord;
use fleetrun::liveness::{ConnectivityFilter, TcpProbe};
use fleetrun::report::ReportBatch;
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;

// TEST-NET-1, never routed
const BLACKHOLE: &str = "192.0.2.1";

async fn open_port() -> (TcpListener, u16) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let port = listener.local_addr().unwrap().port();
    (listener, port)
}

fn filter_for(port: u16) -> ConnectivityFilter {
    let probe = TcpProbe::new(vec![port]).with_timeout(Duration::from_millis(200));
    ConnectivityFilter::new(Arc::new(probe))
}

#[tokio::test]
async fn test_filter_keeps_only_answering_hosts() {
    let (_listener, port) = open_port().await;
    let hosts = vec![HostRecord::new(BLACKHOLE), HostRecord::new("127.0.0.1")];

    let reachable = filter_for(port).filter(&hosts).await;

    assert_eq!(reachable, vec![HostRecord::new("127.0.0.1")]);
    // Input untouched
    assert_eq!(hosts.len(), 2);
}

#[tokio::test]
async fn test_verbose_filter_reports_every_host() {
    let (_listener, port) = open_port().await;
    let hosts = vec![HostRecord::new("127.0.0.1"), HostRecord::new(BLACKHOLE)];

    let results = filter_for(port).with_probe_count(2).filter_verbose(&hosts).await;

    assert_eq!(results.len(), 2);
    for result in results {
        assert_eq!(result.reachable, result.host.name() == "127.0.0.1");
    }
}

#[tokio::test]
async fn test_unreachable_hosts_show_up_in_report() {
    let (_listener, port) = open_port().await;
    let hosts = vec![HostRecord::new("127.0.0.1"), HostRecord::new(BLACKHOLE)];

    let results = filter_for(port).filter_verbose(&hosts).await;
    let (up, down): (Vec<_>, Vec<_>) = results.into_iter().partition(|r| r.reachable);
    let up: Vec<HostRecord> = up.into_iter().map(|r| r.host).collect();

    let payload = payload_fn(|host: HostRecord| async move { Ok(format!("hello {host}")) });
    let mut outcomes = FanOutExecutor::new(4).execute(&up, Arc::new(payload)).await;
    outcomes.extend(down.into_iter().map(|r| ExecutionOutcome::unreachable(r.host)));

    let batch = ReportBatch::aggregate(outcomes);
    assert_eq!(batch.total(), 2);
    assert_eq!(batch.success_count(), 1);
    assert_eq!(batch.errors[0].0.name(), BLACKHOLE);
    assert_eq!(batch.errors[0].1.kind, ErrorKind::Unreachable);
}
