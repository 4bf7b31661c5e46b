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

//! Target resolution
//!
//! Turns what an operator typed into the list of hosts a batch runs against.
//!
//! # Input forms
//!
//! - empty, `localhost`, `127.0.0.1` -> the local machine
//! - path of an existing file -> one host per line (`#` comments allowed)
//! - `lab-,ws-01,ws-02` -> each token is looked up as a directory prefix and
//!   only names the directory returns are kept; without a directory every
//!   token is a literal host name
//!
//! # Examples
//!
//! ```rust
//! use fleetrun::target::{StaticDirectory, TargetResolver};
//! use std::sync::Arc;
//!
//! # tokio_test::block_on(async {
//! let directory = Arc::new(StaticDirectory::new(["lab-01", "lab-02", "other-03"]));
//! let resolver = TargetResolver::new().with_directory(directory);
//!
//! let hosts = resolver.resolve_str("lab-").await;
//! let names: Vec<_> = hosts.iter().map(|h| h.name()).collect();
//! assert_eq!(names, vec!["lab-01", "lab-02"]);
//! # });
//! ```

pub mod directory;
mod error;
mod hostfile;
mod resolver;
mod spec;

pub use directory::{CommandDirectory, DirectoryService, StaticDirectory};
pub use error::ResolutionError;
pub use hostfile::parse_hostfile;
pub use resolver::{TargetResolver, DEFAULT_LOCAL_NAME};
pub use spec::TargetSpec;
