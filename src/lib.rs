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

//! Target resolution and remote fan-out execution.
//!
//! A target specification is resolved to hosts ([`target`]), optionally
//! filtered by a liveness probe ([`liveness`]), a payload is run on every
//! host in parallel ([`executor`]) and the per-host outcomes are written as a
//! report ([`report`]).

pub mod cli;
pub mod commands;
pub mod config;
pub mod executor;
pub mod host;
pub mod liveness;
pub mod report;
pub mod target;
pub mod ui;
pub mod utils;

pub use cli::Cli;
pub use config::{Config, EngineConfig};
pub use executor::{ExecutionOutcome, FanOutExecutor, Payload};
pub use host::HostRecord;
pub use report::{ReportBatch, ReportSink};
pub use target::{TargetResolver, TargetSpec};
