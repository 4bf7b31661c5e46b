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

//! Resolved, immutable engine settings.
//!
//! Every component is built from an [`EngineConfig`]; nothing reads global
//! state after start-up.

use anyhow::{Context, Result};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use super::types::Config;
use super::utils::expand_path;
use crate::executor::FanOutExecutor;
use crate::liveness::{ConnectivityFilter, LivenessProbe, PingProbe, TcpProbe};
use crate::report::{Destination, OutputPathBuilder, SinkConfig};
use crate::target::{
    parse_hostfile, CommandDirectory, DirectoryService, StaticDirectory, TargetResolver,
};
use crate::utils::command::CommandTemplate;

/// How prefix tokens are looked up.
#[derive(Debug, Clone, PartialEq)]
pub enum DirectorySource {
    /// Every token is a literal host name
    None,
    Static {
        computers: Vec<String>,
        inventory_file: Option<PathBuf>,
    },
    Command {
        template: CommandTemplate,
        timeout: Duration,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub struct EngineConfig {
    pub parallel: usize,
    pub timeout: Option<Duration>,
    pub probe_count: u32,
    pub probe_timeout: Duration,
    /// Empty uses the system `ping`
    pub probe_ports: Vec<u16>,
    pub local_name: String,
    pub directory: DirectorySource,
    pub report_root: PathBuf,
    pub spreadsheet: bool,
    pub large_result_threshold: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self::assemble(&Config::default(), DirectorySource::None)
    }
}

impl EngineConfig {
    pub fn from_config(config: &Config) -> Result<Self> {
        let directory = match &config.directory.lookup_command {
            Some(command) if !command.trim().is_empty() => DirectorySource::Command {
                template: CommandTemplate::parse(command)
                    .context("Invalid directory.lookup_command")?,
                timeout: Duration::from_secs(config.directory.lookup_timeout.max(1)),
            },
            _ if !config.directory.computers.is_empty()
                || config.directory.inventory_file.is_some() =>
            {
                DirectorySource::Static {
                    computers: config.directory.computers.clone(),
                    inventory_file: config.directory.inventory_file.as_deref().map(expand_path),
                }
            }
            _ => DirectorySource::None,
        };

        Ok(Self::assemble(config, directory))
    }

    fn assemble(config: &Config, directory: DirectorySource) -> Self {
        let defaults = &config.defaults;
        let report_root = match &config.report.root {
            Some(root) => expand_path(root),
            None => default_report_root(),
        };

        Self {
            parallel: defaults.parallel,
            timeout: (defaults.timeout > 0).then(|| Duration::from_secs(defaults.timeout)),
            probe_count: defaults.probe_count.max(1),
            probe_timeout: Duration::from_millis(defaults.probe_timeout_ms.max(1)),
            probe_ports: defaults.probe_ports.clone(),
            local_name: defaults.local_name.clone(),
            directory,
            report_root,
            spreadsheet: config.report.spreadsheet,
            large_result_threshold: config.report.large_result_threshold,
        }
    }

    /// Apply command-line overrides. `Some(0)` timeout disables it.
    pub fn with_overrides(mut self, parallel: Option<usize>, timeout_secs: Option<u64>) -> Self {
        if let Some(parallel) = parallel {
            self.parallel = parallel;
        }
        if let Some(secs) = timeout_secs {
            self.timeout = (secs > 0).then(|| Duration::from_secs(secs));
        }
        self
    }

    pub fn directory_service(&self) -> Option<Arc<dyn DirectoryService>> {
        match &self.directory {
            DirectorySource::None => None,
            DirectorySource::Static {
                computers,
                inventory_file,
            } => {
                let mut directory = StaticDirectory::new(computers.iter().cloned());
                if let Some(path) = inventory_file {
                    match parse_hostfile(path) {
                        Ok(names) => directory.extend(names),
                        Err(e) => tracing::warn!("Inventory file ignored: {}", e),
                    }
                }
                tracing::debug!("Static directory with {} computer(s)", directory.len());
                Some(Arc::new(directory))
            }
            DirectorySource::Command { template, timeout } => Some(Arc::new(
                CommandDirectory::new(template.clone()).with_timeout(*timeout),
            )),
        }
    }

    pub fn resolver(&self) -> TargetResolver {
        let resolver = TargetResolver::new().with_local_name(self.local_name.clone());
        match self.directory_service() {
            Some(directory) => resolver.with_directory(directory),
            None => resolver,
        }
    }

    pub fn liveness_probe(&self) -> Arc<dyn LivenessProbe> {
        if self.probe_ports.is_empty() {
            Arc::new(PingProbe::new(self.probe_timeout))
        } else {
            Arc::new(TcpProbe::new(self.probe_ports.clone()).with_timeout(self.probe_timeout))
        }
    }

    pub fn connectivity_filter(&self) -> ConnectivityFilter {
        ConnectivityFilter::new(self.liveness_probe())
            .with_probe_count(self.probe_count)
            .with_max_parallel(self.parallel)
    }

    pub fn executor(&self) -> FanOutExecutor {
        FanOutExecutor::new(self.parallel).with_timeout(self.timeout)
    }

    pub fn path_builder(&self) -> OutputPathBuilder {
        OutputPathBuilder::new(&self.report_root)
    }

    pub fn sink_config(&self, destination: Destination) -> SinkConfig {
        SinkConfig {
            destination,
            ..SinkConfig::terminal()
        }
        .with_spreadsheet(self.spreadsheet)
        .with_large_result_threshold(self.large_result_threshold)
    }
}

/// `<data dir>/fleetrun/reports`, or `./reports` without a home directory.
fn default_report_root() -> PathBuf {
    directories::ProjectDirs::from("", "", "fleetrun")
        .map(|dirs| dirs.data_dir().join("reports"))
        .unwrap_or_else(|| PathBuf::from("reports"))
}
