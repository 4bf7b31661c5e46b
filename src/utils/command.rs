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

//! External command templates with `{name}` placeholders.
//!
//! Templates are split into argv once, with shell-style quoting, and
//! placeholders are substituted per argument. No shell is involved, so a
//! substituted value can never introduce extra arguments or operators.

use anyhow::{Context, Result};
use std::process::{Output, Stdio};
use tokio::process::Command;

/// A parsed command line with placeholders.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandTemplate {
    parts: Vec<String>,
}

impl CommandTemplate {
    /// Parse a template string such as `ssh {host} uptime`.
    pub fn parse(template: &str) -> Result<Self> {
        let parts = shell_words::split(template)
            .with_context(|| format!("Failed to parse command template: {template}"))?;
        Self::from_args(parts)
    }

    /// Build a template from already-split arguments.
    pub fn from_args(parts: Vec<String>) -> Result<Self> {
        if parts.is_empty() || parts[0].trim().is_empty() {
            anyhow::bail!("Empty command template");
        }
        Ok(Self { parts })
    }

    /// Template from a fixed argv known to be non-empty.
    pub(crate) fn fixed(parts: &[&str]) -> Self {
        debug_assert!(!parts.is_empty());
        Self {
            parts: parts.iter().map(|p| p.to_string()).collect(),
        }
    }

    /// Whether any argument mentions `{name}`.
    pub fn uses(&self, name: &str) -> bool {
        let placeholder = format!("{{{name}}}");
        self.parts.iter().any(|p| p.contains(&placeholder))
    }

    /// Substitute placeholders and return the argv.
    pub fn render(&self, vars: &[(&str, &str)]) -> Vec<String> {
        self.parts
            .iter()
            .map(|part| {
                vars.iter().fold(part.clone(), |acc, (name, value)| {
                    acc.replace(&format!("{{{name}}}"), value)
                })
            })
            .collect()
    }

    /// Render and run to completion, capturing stdout and stderr.
    ///
    /// The child is killed if the returned future is dropped, which is how
    /// callers' timeouts and cancellation reach the process.
    pub async fn run(&self, vars: &[(&str, &str)]) -> Result<Output> {
        let argv = self.render(vars);
        let (program, args) = argv
            .split_first()
            .context("Empty command after substitution")?;

        tracing::trace!("Running {} {:?}", program, args);

        Command::new(program)
            .args(args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .output()
            .await
            .with_context(|| format!("Failed to run '{program}'"))
    }

    pub fn program(&self) -> &str {
        &self.parts[0]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_and_render() {
        let template = CommandTemplate::parse("ssh {host} 'cat /etc/os-release'").unwrap();
        assert!(template.uses("host"));
        assert!(!template.uses("prefix"));
        assert_eq!(
            template.render(&[("host", "lab-01")]),
            vec!["ssh", "lab-01", "cat /etc/os-release"]
        );
    }

    #[test]
    fn test_substituted_value_stays_one_argument() {
        let template = CommandTemplate::parse("echo {host}").unwrap();
        let argv = template.render(&[("host", "a; rm -rf /")]);
        assert_eq!(argv, vec!["echo", "a; rm -rf /"]);
    }

    #[test]
    fn test_empty_template_rejected() {
        assert!(CommandTemplate::parse("").is_err());
        assert!(CommandTemplate::parse("   ").is_err());
        assert!(CommandTemplate::parse("'unterminated").is_err());
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_run_captures_stdout() {
        let template = CommandTemplate::parse("echo {host}").unwrap();
        let output = template.run(&[("host", "lab-07")]).await.unwrap();
        assert!(output.status.success());
        assert_eq!(String::from_utf8_lossy(&output.stdout).trim(), "lab-07");
    }

    #[tokio::test]
    async fn test_run_missing_program() {
        let template = CommandTemplate::parse("fleetrun-no-such-binary-xyz").unwrap();
        assert!(template.run(&[]).await.is_err());
    }
}
