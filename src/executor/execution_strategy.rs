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

//! Per-host task and progress display.

use indicatif::{MultiProgress, ProgressBar, ProgressStyle};
use owo_colors::OwoColorize;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Semaphore;
use tokio_util::sync::CancellationToken;

use super::payload::Payload;
use super::result_types::{ErrorDescriptor, ErrorKind, ExecutionOutcome};
use crate::host::HostRecord;

/// Progress bar tick rate configuration.
const PROGRESS_BAR_TICK_RATE_MS: u64 = 80;

/// Create a progress bar style for per-host lines.
pub(crate) fn create_progress_style() -> ProgressStyle {
    ProgressStyle::default_bar()
        .template("{prefix:.bold} {spinner:.cyan} {msg}")
        .map(|style| style.tick_chars("⣾⣽⣻⢿⡿⣟⣯⣷ "))
        .unwrap_or_else(|e| {
            tracing::debug!("Falling back to default spinner style: {}", e);
            ProgressStyle::default_spinner()
        })
}

/// Format host display name for progress bars.
pub(crate) fn format_host_display(host: &HostRecord) -> String {
    let name = host.name();
    if name.chars().count() > 20 {
        format!("{}...", name.chars().take(17).collect::<String>())
    } else {
        format!("{name:<20}")
    }
}

/// Progress line for one host, or a hidden bar when display is off.
pub(crate) fn setup_progress_bar(
    multi_progress: Option<&MultiProgress>,
    host: &HostRecord,
    style: ProgressStyle,
    message: &str,
) -> ProgressBar {
    let Some(multi_progress) = multi_progress else {
        return ProgressBar::hidden();
    };

    let pb = multi_progress.add(ProgressBar::new_spinner());
    pb.set_style(style);
    pb.set_prefix(format_host_display(host));
    pb.set_message(format!("{}", message.cyan()));
    pb.enable_steady_tick(Duration::from_millis(PROGRESS_BAR_TICK_RATE_MS));
    pb
}

/// Run the payload on one host and turn every failure into an outcome.
///
/// The per-host timeout starts once a worker slot is acquired, so time spent
/// queued behind the pool cap does not count against the host.
pub(crate) async fn execute_payload_task<P: Payload>(
    host: HostRecord,
    payload: Arc<P>,
    timeout: Option<Duration>,
    cancel: CancellationToken,
    semaphore: Arc<Semaphore>,
    pb: ProgressBar,
) -> ExecutionOutcome<P::Output> {
    let work = async {
        let _permit = match semaphore.acquire().await {
            Ok(permit) => permit,
            Err(e) => {
                return Err(ErrorDescriptor::new(
                    ErrorKind::Execution,
                    format!("Semaphore acquisition failed: {e}"),
                ))
            }
        };

        pb.set_message(format!("{}", "Running...".blue()));

        let run = payload.run(&host);
        match timeout {
            Some(limit) => match tokio::time::timeout(limit, run).await {
                Ok(result) => result.map_err(|e| ErrorDescriptor::from_anyhow(&e)),
                Err(_) => Err(ErrorDescriptor::timeout(limit)),
            },
            None => run.await.map_err(|e| ErrorDescriptor::from_anyhow(&e)),
        }
    };

    let result = tokio::select! {
        biased;
        _ = cancel.cancelled() => Err(ErrorDescriptor::cancelled()),
        result = work => result,
    };

    match &result {
        Ok(_) => {
            tracing::debug!("{} completed", host);
            pb.finish_with_message(format!("{} {}", "●".green(), "Success".green()));
        }
        Err(e) => {
            tracing::debug!("{} failed: {}", host, e);
            pb.finish_with_message(format!("{} {}", "●".red(), e.short(50).red()));
        }
    }

    ExecutionOutcome { host, result }
}
