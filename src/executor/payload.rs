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

//! Units of host-scoped remote work.

use anyhow::Result;
use async_trait::async_trait;
use std::future::Future;

use crate::host::HostRecord;
use crate::report::Record;
use crate::utils::command::CommandTemplate;

/// Host-scoped operation run by the fan-out executor.
///
/// Implementations must be safe to run again on the same host and must not
/// assume anything about the order other hosts run in. Returning `Err` marks
/// only this host as failed.
#[async_trait]
pub trait Payload: Send + Sync + 'static {
    type Output: Send + 'static;

    async fn run(&self, host: &HostRecord) -> Result<Self::Output>;
}

/// Payload backed by an async closure.
pub struct FnPayload<F> {
    f: F,
}

/// Wrap `|host| async move { ... }` as a [`Payload`].
///
/// ```rust
/// use fleetrun::executor::{payload_fn, Payload};
/// use fleetrun::host::HostRecord;
///
/// # tokio_test::block_on(async {
/// let payload = payload_fn(|host: HostRecord| async move {
///     Ok::<_, anyhow::Error>(host.name().len())
/// });
/// assert_eq!(payload.run(&HostRecord::new("lab-01")).await.unwrap(), 6);
/// # });
/// ```
pub fn payload_fn<F, Fut, T>(f: F) -> FnPayload<F>
where
    F: Fn(HostRecord) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Result<T>> + Send + 'static,
    T: Send + 'static,
{
    FnPayload { f }
}

#[async_trait]
impl<F, Fut, T> Payload for FnPayload<F>
where
    F: Fn(HostRecord) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Result<T>> + Send + 'static,
    T: Send + 'static,
{
    type Output = T;

    async fn run(&self, host: &HostRecord) -> Result<T> {
        (self.f)(host.clone()).await
    }
}

/// Runs a local command template per host, e.g. `ssh {host} uptime`.
///
/// A non-zero exit is a host failure carrying stderr. Stdout that parses as
/// a JSON object becomes one column per key; anything else lands in a single
/// `Output` column.
#[derive(Debug, Clone)]
pub struct CommandPayload {
    template: CommandTemplate,
}

impl CommandPayload {
    pub fn new(template: CommandTemplate) -> Self {
        if !template.uses("host") {
            tracing::warn!(
                "Command template for '{}' has no {{host}} placeholder; every host runs the same command",
                template.program()
            );
        }
        Self { template }
    }
}

#[async_trait]
impl Payload for CommandPayload {
    type Output = Record;

    async fn run(&self, host: &HostRecord) -> Result<Record> {
        let output = self.template.run(&[("host", host.name())]).await?;
        let stdout = String::from_utf8_lossy(&output.stdout);

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            let detail = if stderr.trim().is_empty() {
                stdout.trim().to_string()
            } else {
                stderr.trim().to_string()
            };
            anyhow::bail!("command exited with {}: {}", output.status, detail);
        }

        let trimmed = stdout.trim();
        match serde_json::from_str::<serde_json::Value>(trimmed) {
            Ok(value @ serde_json::Value::Object(_)) => Ok(Record::from_json(&value)),
            _ => Ok(Record::new().with("Output", trimmed)),
        }
    }
}
