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

//! Result types for fan-out execution.

use owo_colors::OwoColorize;
use std::fmt;
use std::time::Duration;

use crate::host::HostRecord;

/// Why a host produced no value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// The payload returned an error
    Execution,
    /// The per-host timeout elapsed
    Timeout,
    /// The batch was cancelled before this host finished
    Cancelled,
    /// The worker panicked
    Panicked,
    /// The liveness prefilter excluded the host
    Unreachable,
}

impl ErrorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorKind::Execution => "execution",
            ErrorKind::Timeout => "timeout",
            ErrorKind::Cancelled => "cancelled",
            ErrorKind::Panicked => "panicked",
            ErrorKind::Unreachable => "unreachable",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// In-band description of a per-host failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorDescriptor {
    pub kind: ErrorKind,
    pub message: String,
}

impl ErrorDescriptor {
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    /// Keep the full context chain of a payload error.
    pub fn from_anyhow(err: &anyhow::Error) -> Self {
        Self::new(ErrorKind::Execution, format!("{err:#}"))
    }

    pub fn timeout(after: Duration) -> Self {
        Self::new(
            ErrorKind::Timeout,
            format!("timed out after {}", format_timeout(after)),
        )
    }

    pub fn cancelled() -> Self {
        Self::new(ErrorKind::Cancelled, "batch cancelled")
    }

    pub fn unreachable() -> Self {
        Self::new(ErrorKind::Unreachable, "host did not answer liveness probe")
    }

    /// First line, truncated, for progress lines and compact listings.
    pub fn short(&self, max_len: usize) -> String {
        let first_line = self.message.lines().next().unwrap_or("Unknown error");
        if first_line.chars().count() > max_len {
            let cut: String = first_line.chars().take(max_len.saturating_sub(3)).collect();
            format!("{cut}...")
        } else {
            first_line.to_string()
        }
    }
}

impl fmt::Display for ErrorDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.kind, self.message)
    }
}

impl std::error::Error for ErrorDescriptor {}

fn format_timeout(d: Duration) -> String {
    if d.as_millis() < 1000 {
        format!("{}ms", d.as_millis())
    } else {
        format!("{}s", d.as_secs())
    }
}

/// Result of running a payload on a single host.
///
/// Exactly one outcome exists per host submitted to the executor.
#[derive(Debug)]
pub struct ExecutionOutcome<T> {
    pub host: HostRecord,
    pub result: Result<T, ErrorDescriptor>,
}

impl<T> ExecutionOutcome<T> {
    pub fn success(host: HostRecord, value: T) -> Self {
        Self {
            host,
            result: Ok(value),
        }
    }

    pub fn failure(host: HostRecord, error: ErrorDescriptor) -> Self {
        Self {
            host,
            result: Err(error),
        }
    }

    /// Outcome for a host the prefilter excluded.
    pub fn unreachable(host: HostRecord) -> Self {
        Self::failure(host, ErrorDescriptor::unreachable())
    }

    pub fn is_success(&self) -> bool {
        self.result.is_ok()
    }

    pub fn value(&self) -> Option<&T> {
        self.result.as_ref().ok()
    }

    pub fn error(&self) -> Option<&ErrorDescriptor> {
        self.result.as_ref().err()
    }

    /// One status line, colored for the terminal.
    pub fn summary_line(&self) -> String {
        match &self.result {
            Ok(_) => format!(
                "{} {}: {}",
                "●".green(),
                self.host.to_string().bold(),
                "Success".green()
            ),
            Err(e) => format!(
                "{} {}: {} {}",
                "●".red(),
                self.host.to_string().bold(),
                e.kind.as_str().red(),
                e.short(80).dimmed()
            ),
        }
    }
}

/// Hosts whose outcome is an error, for callers that want to retry.
pub fn failed_hosts<T>(outcomes: &[ExecutionOutcome<T>]) -> Vec<HostRecord> {
    outcomes
        .iter()
        .filter(|o| !o.is_success())
        .map(|o| o.host.clone())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::Context;

    #[test]
    fn test_error_descriptor_keeps_context_chain() {
        let err = Err::<(), _>(anyhow::anyhow!("access denied"))
            .context("reading HKLM\\SOFTWARE")
            .unwrap_err();
        let desc = ErrorDescriptor::from_anyhow(&err);
        assert_eq!(desc.kind, ErrorKind::Execution);
        assert_eq!(desc.message, "reading HKLM\\SOFTWARE: access denied");
    }

    #[test]
    fn test_timeout_message() {
        assert_eq!(
            ErrorDescriptor::timeout(Duration::from_secs(30)).message,
            "timed out after 30s"
        );
        assert_eq!(
            ErrorDescriptor::timeout(Duration::from_millis(250)).message,
            "timed out after 250ms"
        );
    }

    #[test]
    fn test_short_truncates_first_line() {
        let desc = ErrorDescriptor::new(ErrorKind::Execution, format!("{}\nsecond", "x".repeat(100)));
        let short = desc.short(20);
        assert_eq!(short.chars().count(), 20);
        assert!(short.ends_with("..."));

        let desc = ErrorDescriptor::new(ErrorKind::Execution, "short\nsecond");
        assert_eq!(desc.short(20), "short");
    }

    #[test]
    fn test_outcome_accessors() {
        let ok = ExecutionOutcome::success(HostRecord::new("a"), 1);
        assert!(ok.is_success());
        assert_eq!(ok.value(), Some(&1));
        assert!(ok.error().is_none());

        let err: ExecutionOutcome<i32> = ExecutionOutcome::unreachable(HostRecord::new("b"));
        assert!(!err.is_success());
        assert_eq!(err.error().map(|e| e.kind), Some(ErrorKind::Unreachable));
    }

    #[test]
    fn test_failed_hosts() {
        let outcomes = vec![
            ExecutionOutcome::success(HostRecord::new("a"), ()),
            ExecutionOutcome::failure(HostRecord::new("b"), ErrorDescriptor::cancelled()),
        ];
        assert_eq!(failed_hosts(&outcomes), vec![HostRecord::new("b")]);
    }
}
