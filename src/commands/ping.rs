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
use crate::ui::OutputFormatter;

/// Probe every host of `target` and list the results.
pub async fn ping_hosts(engine: &EngineConfig, target: &str, count: Option<u32>) -> Result<bool> {
    let hosts = engine.resolver().resolve_str(target).await;
    if hosts.is_empty() {
        println!("No hosts resolved from '{target}'; nothing to do.");
        return Ok(true);
    }

    println!(
        "{}",
        OutputFormatter::format_batch_header("liveness probe", hosts.len())
    );

    let mut filter = engine.connectivity_filter();
    if let Some(count) = count {
        filter = filter.with_probe_count(count);
    }

    let mut results = filter.filter_verbose(&hosts).await;
    results.sort_by(|a, b| a.host.cmp(&b.host));

    println!("{} {}\n", "▶".cyan(), "Liveness Results".bold());
    print!("{}", OutputFormatter::format_liveness(&results));

    let reachable = results.iter().filter(|r| r.reachable).count();
    let unreachable = results.len() - reachable;
    println!(
        "{}",
        OutputFormatter::format_summary(results.len(), reachable, unreachable)
    );

    Ok(unreachable == 0)
}
