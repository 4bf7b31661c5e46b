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

//! Configuration type definitions.

use serde::{Deserialize, Serialize};

use crate::liveness::DEFAULT_PROBE_PORTS;
use crate::report::DEFAULT_LARGE_RESULT_THRESHOLD;
use crate::target::DEFAULT_LOCAL_NAME;

/// Main configuration structure.
#[derive(Debug, Serialize, Deserialize, Default, Clone, PartialEq)]
pub struct Config {
    #[serde(default)]
    pub defaults: Defaults,

    #[serde(default)]
    pub directory: DirectoryConfig,

    #[serde(default)]
    pub report: ReportConfig,
}

/// Engine-wide defaults.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct Defaults {
    /// Worker pool cap; 0 runs one worker per host.
    pub parallel: usize,
    /// Per-host payload timeout in seconds; 0 disables it.
    pub timeout: u64,
    /// Probes per host; one success marks the host reachable.
    pub probe_count: u32,
    pub probe_timeout_ms: u64,
    /// TCP ports tried by the liveness probe. Empty uses the system `ping`.
    pub probe_ports: Vec<u16>,
    /// Name `localhost`/`127.0.0.1`/empty input resolves to.
    pub local_name: String,
}

impl Default for Defaults {
    fn default() -> Self {
        Self {
            parallel: 32,
            timeout: 120,
            probe_count: 1,
            probe_timeout_ms: 1000,
            probe_ports: DEFAULT_PROBE_PORTS.to_vec(),
            local_name: DEFAULT_LOCAL_NAME.to_string(),
        }
    }
}

/// Where prefix patterns are looked up.
///
/// `lookup_command` wins over the static inventory when both are set.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct DirectoryConfig {
    pub computers: Vec<String>,
    pub inventory_file: Option<String>,
    /// External query with a `{prefix}` placeholder, one name per output line.
    pub lookup_command: Option<String>,
    /// Seconds before a lookup command is abandoned.
    pub lookup_timeout: u64,
}

impl Default for DirectoryConfig {
    fn default() -> Self {
        Self {
            computers: Vec::new(),
            inventory_file: None,
            lookup_command: None,
            lookup_timeout: 30,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct ReportConfig {
    /// Directory for CSV/spreadsheet reports.
    pub root: Option<String>,
    pub spreadsheet: bool,
    /// Terminal results above this many rows are shown as a table.
    pub large_result_threshold: usize,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            root: None,
            spreadsheet: true,
            large_result_threshold: DEFAULT_LARGE_RESULT_THRESHOLD,
        }
    }
}
