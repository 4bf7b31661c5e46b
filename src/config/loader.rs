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

//! Configuration loading and priority management.

use anyhow::{Context, Result};
use std::env;
use std::path::{Path, PathBuf};
use tokio::fs;

use super::types::Config;
use super::utils::expand_tilde;

const APP_NAME: &str = "fleetrun";
const LOCAL_CONFIG_FILE: &str = "fleetrun.yaml";
const CONFIG_FILE: &str = "config.yaml";

impl Config {
    /// Load configuration from a file. A missing file yields defaults.
    pub async fn load(path: &Path) -> Result<Self> {
        let expanded_path = expand_tilde(path);

        if !expanded_path.exists() {
            tracing::debug!(
                "Config file not found at {:?}, using defaults",
                expanded_path
            );
            return Ok(Self::default());
        }

        let content = fs::read_to_string(&expanded_path).await.with_context(|| {
            format!(
                "Failed to read configuration file at {}",
                expanded_path.display()
            )
        })?;

        Self::from_yaml(&content).with_context(|| {
            format!(
                "Failed to parse YAML configuration file at {}",
                expanded_path.display()
            )
        })
    }

    pub fn from_yaml(content: &str) -> Result<Self> {
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        Ok(serde_yaml::from_str(content)?)
    }

    /// Load configuration with priority order:
    /// 1. Explicit --config path (if it exists)
    /// 2. ./fleetrun.yaml
    /// 3. $XDG_CONFIG_HOME/fleetrun/config.yaml, or ~/.config/fleetrun/config.yaml
    /// 4. Platform config directory
    /// 5. Built-in defaults
    pub async fn load_with_priority(cli_config_path: Option<&Path>) -> Result<Self> {
        if let Some(path) = cli_config_path {
            let expanded = expand_tilde(path);
            if expanded.exists() {
                tracing::debug!("Using explicitly specified config file: {:?}", expanded);
                return Self::load(&expanded).await;
            }
            tracing::warn!(
                "Config file {:?} not found, continuing with other sources",
                expanded
            );
        }

        for candidate in Self::search_paths() {
            if candidate.exists() {
                tracing::debug!("Found config at {:?}", candidate);
                return Self::load(&candidate).await;
            }
        }

        tracing::debug!("No config file found, using defaults");
        Ok(Self::default())
    }

    /// Standard locations, highest priority first.
    pub fn search_paths() -> Vec<PathBuf> {
        let mut paths = vec![PathBuf::from(LOCAL_CONFIG_FILE)];

        match env::var_os("XDG_CONFIG_HOME") {
            Some(xdg) if !xdg.is_empty() => {
                paths.push(PathBuf::from(xdg).join(APP_NAME).join(CONFIG_FILE));
            }
            _ => {
                paths.push(expand_tilde(
                    &Path::new("~/.config").join(APP_NAME).join(CONFIG_FILE),
                ));
            }
        }

        if let Some(proj_dirs) = directories::ProjectDirs::from("", "", APP_NAME) {
            let platform = proj_dirs.config_dir().join(CONFIG_FILE);
            if !paths.contains(&platform) {
                paths.push(platform);
            }
        }

        paths
    }
}
