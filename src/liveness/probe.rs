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

//! Liveness probe primitives.

use async_trait::async_trait;
use std::io;
use std::time::Duration;
use tokio::net::TcpStream;

use crate::host::HostRecord;
use crate::utils::command::CommandTemplate;

/// Default bound on a single probe attempt
pub const DEFAULT_PROBE_TIMEOUT: Duration = Duration::from_millis(1000);

/// Ports tried by [`TcpProbe`] when none are configured: SMB, RPC, SSH, RDP
pub const DEFAULT_PROBE_PORTS: [u16; 4] = [445, 135, 22, 3389];

/// One bounded reachability attempt against a host.
#[async_trait]
pub trait LivenessProbe: Send + Sync {
    /// `true` if the host answered within the probe's own timeout.
    async fn probe(&self, host: &HostRecord) -> bool;
}

/// Reachable when any of the configured TCP ports answers.
///
/// An accepted connection and an active refusal (RST) both prove the host is
/// up. Only silence until the timeout, or a network-level error, counts as
/// unreachable. Works without raw-socket privileges, unlike ICMP echo.
#[derive(Debug, Clone)]
pub struct TcpProbe {
    ports: Vec<u16>,
    timeout: Duration,
}

impl Default for TcpProbe {
    fn default() -> Self {
        Self::new(DEFAULT_PROBE_PORTS.to_vec())
    }
}

impl TcpProbe {
    pub fn new(ports: Vec<u16>) -> Self {
        Self {
            ports,
            timeout: DEFAULT_PROBE_TIMEOUT,
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    async fn port_answers(&self, host: &str, port: u16) -> bool {
        match tokio::time::timeout(self.timeout, TcpStream::connect((host, port))).await {
            Ok(Ok(_)) => true,
            Ok(Err(e)) if e.kind() == io::ErrorKind::ConnectionRefused => {
                tracing::trace!("{}:{} refused, host is up", host, port);
                true
            }
            Ok(Err(e)) => {
                tracing::trace!("{}:{} failed: {}", host, port, e);
                false
            }
            Err(_) => {
                tracing::trace!("{}:{} timed out", host, port);
                false
            }
        }
    }
}

#[async_trait]
impl LivenessProbe for TcpProbe {
    async fn probe(&self, host: &HostRecord) -> bool {
        let attempts = self
            .ports
            .iter()
            .map(|port| Box::pin(self.port_answers(host.name(), *port)));

        // First answering port wins
        let mut pending: Vec<_> = attempts.collect();
        while !pending.is_empty() {
            let (answered, _, rest) = futures::future::select_all(pending).await;
            if answered {
                return true;
            }
            pending = rest;
        }
        false
    }
}

/// ICMP echo through the system `ping` binary.
#[derive(Debug, Clone)]
pub struct PingProbe {
    template: CommandTemplate,
    timeout: Duration,
}

impl Default for PingProbe {
    fn default() -> Self {
        Self::new(DEFAULT_PROBE_TIMEOUT)
    }
}

impl PingProbe {
    pub fn new(timeout: Duration) -> Self {
        #[cfg(windows)]
        let args = ["ping", "-n", "1", "-w", "{timeout_ms}", "{host}"];
        #[cfg(not(windows))]
        let args = ["ping", "-c", "1", "-W", "{timeout_s}", "{host}"];

        Self {
            template: CommandTemplate::fixed(&args),
            timeout,
        }
    }
}

#[async_trait]
impl LivenessProbe for PingProbe {
    async fn probe(&self, host: &HostRecord) -> bool {
        let timeout_ms = self.timeout.as_millis().max(1).to_string();
        let timeout_s = self.timeout.as_secs().max(1).to_string();
        let vars = [
            ("host", host.name()),
            ("timeout_ms", timeout_ms.as_str()),
            ("timeout_s", timeout_s.as_str()),
        ];

        // The binary enforces its own wait; this bounds a stuck resolver too
        let bound = self.timeout + Duration::from_secs(1);
        match tokio::time::timeout(bound, self.template.run(&vars)).await {
            Ok(Ok(output)) => output.status.success(),
            Ok(Err(e)) => {
                tracing::debug!("ping for {} could not run: {:#}", host, e);
                false
            }
            Err(_) => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::net::TcpListener;

    #[tokio::test]
    async fn test_tcp_probe_open_port() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let port = listener.local_addr().unwrap().port();

        let probe = TcpProbe::new(vec![port]);
        assert!(probe.probe(&HostRecord::new("127.0.0.1")).await);
    }

    #[tokio::test]
    async fn test_tcp_probe_any_port_suffices() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let open = listener.local_addr().unwrap().port();

        // Grab a port and release it so it is almost certainly closed
        let closed = {
            let l = TcpListener::bind("127.0.0.1:0").await.unwrap();
            l.local_addr().unwrap().port()
        };

        let probe = TcpProbe::new(vec![closed, open]);
        assert!(probe.probe(&HostRecord::new("127.0.0.1")).await);
    }

    #[tokio::test]
    async fn test_tcp_probe_refused_port_means_host_is_up() {
        let closed = {
            let l = TcpListener::bind("127.0.0.1:0").await.unwrap();
            l.local_addr().unwrap().port()
        };

        let probe = TcpProbe::new(vec![closed]).with_timeout(Duration::from_millis(500));
        assert!(probe.probe(&HostRecord::new("127.0.0.1")).await);
    }

    #[tokio::test]
    async fn test_tcp_probe_silent_host_is_unreachable() {
        // TEST-NET-1 is never routed: the connect times out or fails
        let probe = TcpProbe::new(vec![445]).with_timeout(Duration::from_millis(200));
        assert!(!probe.probe(&HostRecord::new("192.0.2.1")).await);
    }

    #[tokio::test]
    async fn test_tcp_probe_no_ports() {
        let probe = TcpProbe::new(Vec::new());
        assert!(!probe.probe(&HostRecord::new("127.0.0.1")).await);
    }
}
