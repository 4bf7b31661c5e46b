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

use anyhow::Result;
use owo_colors::OwoColorize;

use crate::config::EngineConfig;
use crate::target::TargetSpec;

/// Print one resolved host per line on stdout; the count goes to stderr.
pub async fn resolve_target(engine: &EngineConfig, target: &str) -> Result<bool> {
    let spec = TargetSpec::parse(target);
    tracing::info!("Resolving '{}' as {}", target, spec.kind());

    let hosts = engine.resolver().resolve(&spec).await;
    if hosts.is_empty() {
        eprintln!("{} No hosts resolved from '{}'", "○".dimmed(), target);
        return Ok(true);
    }

    for host in &hosts {
        println!("{host}");
    }
    eprintln!(
        "{} {} host(s) from {}",
        "●".green(),
        hosts.len().to_string().bold(),
        spec.kind()
    );
    Ok(true)
}
