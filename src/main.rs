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
use clap::Parser;
use std::process::ExitCode;
use tokio_util::sync::CancellationToken;

use fleetrun::{
    cli::{Cli, Commands},
    commands::{
        exec::{execute_command, ExecuteCommandParams},
        ping::ping_hosts,
        resolve::resolve_target,
    },
    config::{Config, EngineConfig},
    utils::init_logging,
};

/// Cancel the batch on the first Ctrl-C.
fn spawn_ctrl_c_handler(cancel: CancellationToken) {
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            tracing::warn!("Interrupted, cancelling hosts still running");
            eprintln!("\nInterrupted; waiting for running hosts to report cancellation...");
            cancel.cancel();
        }
    });
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    let cli = Cli::parse();

    init_logging(cli.verbose);

    let config = Config::load_with_priority(cli.config.as_deref()).await?;
    let engine = EngineConfig::from_config(&config)
        .context("Invalid configuration")?
        .with_overrides(cli.parallel, cli.timeout);
    tracing::debug!("Engine configuration: {:?}", engine);

    let all_ok = match cli.command {
        Commands::Resolve { target } => resolve_target(&engine, &target).await?,
        Commands::Ping { target, count } => ping_hosts(&engine, &target, count).await?,
        Commands::Exec {
            target,
            skip_ping,
            report,
            no_interactive,
            command,
        } => {
            let cancel = CancellationToken::new();
            spawn_ctrl_c_handler(cancel.clone());

            execute_command(ExecuteCommandParams {
                engine: &engine,
                target: &target,
                command,
                skip_ping,
                report: report.as_deref(),
                interactive: !no_interactive,
                cancel,
            })
            .await?
        }
    };

    Ok(if all_ok {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}
