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

use anyhow::{Context, Result};
use std::io::IsTerminal;
use std::sync::Arc;
use std::time::Instant;
use tokio_util::sync::CancellationToken;

use crate::config::EngineConfig;
use crate::executor::{CommandPayload, ExecutionOutcome};
use crate::host::HostRecord;
use crate::report::{Destination, ReportBatch, ReportSink};
use crate::ui::{format_duration, OutputFormatter};
use crate::utils::command::CommandTemplate;

pub struct ExecuteCommandParams<'a> {
    pub engine: &'a EngineConfig,
    pub target: &'a str,
    pub command: Vec<String>,
    pub skip_ping: bool,
    pub report: Option<&'a str>,
    pub interactive: bool,
    pub cancel: CancellationToken,
}

/// Resolve, prefilter, fan out and report.
pub async fn execute_command(params: ExecuteCommandParams<'_>) -> Result<bool> {
    let engine = params.engine;
    let command_display = params.command.join(" ");
    let template =
        CommandTemplate::from_args(params.command).context("Invalid command template")?;

    let hosts = engine.resolver().resolve_str(params.target).await;
    if hosts.is_empty() {
        println!(
            "No hosts resolved from '{}'; nothing to do.",
            params.target
        );
        return Ok(true);
    }

    println!(
        "{}",
        OutputFormatter::format_batch_header(&command_display, hosts.len())
    );

    let (reachable, unreachable) = if params.skip_ping {
        (hosts, Vec::new())
    } else {
        partition_reachable(engine, &hosts).await
    };
    if !unreachable.is_empty() {
        tracing::warn!(
            "{} host(s) did not answer the liveness probe",
            unreachable.len()
        );
    }

    let executor = engine
        .executor()
        .with_progress(std::io::stderr().is_terminal())
        .with_cancellation(params.cancel);

    let started = Instant::now();
    let mut outcomes = executor
        .execute(&reachable, Arc::new(CommandPayload::new(template)))
        .await;
    outcomes.extend(unreachable.into_iter().map(ExecutionOutcome::unreachable));
    let elapsed = started.elapsed();

    let batch = ReportBatch::aggregate(outcomes);

    let destination = match params.report {
        Some(name) => engine.path_builder().destination(name),
        None => Destination::Terminal,
    };
    let sink_config = engine
        .sink_config(destination)
        .with_interactive(params.interactive)
        .with_title(command_display);
    let written = ReportSink::new().write(&batch, &sink_config);

    if written.terminal.is_none() {
        println!("{}", OutputFormatter::format_write_result(&written));
    }
    println!(
        "{}",
        OutputFormatter::format_summary(batch.total(), batch.success_count(), batch.error_count())
    );
    println!("Completed in {}", format_duration(elapsed));

    Ok(batch.errors.is_empty() && !written.csv.is_failed())
}

async fn partition_reachable(
    engine: &EngineConfig,
    hosts: &[HostRecord],
) -> (Vec<HostRecord>, Vec<HostRecord>) {
    let results = engine.connectivity_filter().filter_verbose(hosts).await;
    let mut reachable = Vec::with_capacity(results.len());
    let mut unreachable = Vec::new();
    for result in results {
        if result.reachable {
            reachable.push(result.host);
        } else {
            unreachable.push(result.host);
        }
    }
    (reachable, unreachable)
}
