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

use crate::executor::{ErrorDescriptor, ExecutionOutcome};
use crate::host::HostRecord;

/// Outcomes of one batch split into successes and errors, each sorted by host.
#[derive(Debug, Clone)]
pub struct ReportBatch<T> {
    pub successes: Vec<(HostRecord, T)>,
    pub errors: Vec<(HostRecord, ErrorDescriptor)>,
}

impl<T> Default for ReportBatch<T> {
    fn default() -> Self {
        Self {
            successes: Vec::new(),
            errors: Vec::new(),
        }
    }
}

impl<T> ReportBatch<T> {
    /// Split outcomes and sort both halves by host identity.
    pub fn aggregate<I>(outcomes: I) -> Self
    where
        I: IntoIterator<Item = ExecutionOutcome<T>>,
    {
        let mut batch = Self::default();
        for outcome in outcomes {
            match outcome.result {
                Ok(value) => batch.successes.push((outcome.host, value)),
                Err(error) => batch.errors.push((outcome.host, error)),
            }
        }

        batch.successes.sort_by(|a, b| a.0.cmp(&b.0));
        batch.errors.sort_by(|a, b| a.0.cmp(&b.0));
        batch
    }

    pub fn total(&self) -> usize {
        self.successes.len() + self.errors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.total() == 0
    }

    pub fn success_count(&self) -> usize {
        self.successes.len()
    }

    pub fn error_count(&self) -> usize {
        self.errors.len()
    }

    /// Hosts to hand back to the executor for a retry.
    pub fn failed_hosts(&self) -> Vec<HostRecord> {
        self.errors.iter().map(|(host, _)| host.clone()).collect()
    }
}

/// Free-function form of [`ReportBatch::aggregate`].
pub fn aggregate<T>(outcomes: Vec<ExecutionOutcome<T>>) -> ReportBatch<T> {
    ReportBatch::aggregate(outcomes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::executor::ErrorKind;

    #[test]
    fn test_aggregate_sorts_case_insensitively() {
        let outcomes = vec![
            ExecutionOutcome::success(HostRecord::new("lab-03"), 3),
            ExecutionOutcome::failure(
                HostRecord::new("LAB-02"),
                ErrorDescriptor::new(ErrorKind::Execution, "access denied"),
            ),
            ExecutionOutcome::success(HostRecord::new("Lab-01"), 1),
        ];

        let batch = aggregate(outcomes);
        assert_eq!(batch.success_count(), 2);
        assert_eq!(batch.error_count(), 1);
        assert_eq!(batch.successes[0].0.name(), "Lab-01");
        assert_eq!(batch.successes[1].1, 3);
        assert_eq!(batch.failed_hosts(), vec![HostRecord::new("lab-02")]);
    }

    #[test]
    fn test_empty_batch() {
        let batch: ReportBatch<()> = ReportBatch::aggregate(Vec::new());
        assert!(batch.is_empty());
        assert_eq!(batch.total(), 0);
    }
}
