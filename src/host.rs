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

use std::cmp::Ordering;
use std::collections::HashSet;
use std::fmt;
use std::hash::{Hash, Hasher};

/// A resolved host identity.
///
/// Identity is case-insensitive: `LAB-01` and `lab-01` are the same host.
/// The original spelling is kept for display and for handing to payloads.
#[derive(Debug, Clone)]
pub struct HostRecord {
    name: String,
    key: String,
}

impl HostRecord {
    pub fn new(name: impl Into<String>) -> Self {
        let name = name.into().trim().to_string();
        let key = name.to_ascii_lowercase();
        Self { name, key }
    }

    /// Host name as supplied.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Lower-cased identity used for dedup and sorting.
    pub fn key(&self) -> &str {
        &self.key
    }
}

impl PartialEq for HostRecord {
    fn eq(&self, other: &Self) -> bool {
        self.key == other.key
    }
}

impl Eq for HostRecord {}

impl Hash for HostRecord {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.key.hash(state);
    }
}

impl PartialOrd for HostRecord {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for HostRecord {
    fn cmp(&self, other: &Self) -> Ordering {
        self.key.cmp(&other.key)
    }
}

impl fmt::Display for HostRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

impl From<&str> for HostRecord {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

impl From<String> for HostRecord {
    fn from(name: String) -> Self {
        Self::new(name)
    }
}

/// Deduplicate host names case-insensitively, keeping first-seen order.
///
/// Blank entries are dropped.
pub fn dedup_hosts<I, S>(names: I) -> Vec<HostRecord>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    let mut seen = HashSet::new();
    let mut hosts = Vec::new();

    for name in names {
        let host = HostRecord::new(name);
        if host.key().is_empty() {
            continue;
        }
        if seen.insert(host.key().to_string()) {
            hosts.push(host);
        }
    }

    hosts
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identity_is_case_insensitive() {
        assert_eq!(HostRecord::new("LAB-01"), HostRecord::new("lab-01"));
        assert_eq!(HostRecord::new("LAB-01").name(), "LAB-01");
    }

    #[test]
    fn test_new_trims_whitespace() {
        let host = HostRecord::new("  hostA \r");
        assert_eq!(host.name(), "hostA");
        assert_eq!(host.key(), "hosta");
    }

    #[test]
    fn test_dedup_preserves_first_seen_order() {
        let hosts = dedup_hosts(["b", "A", "a", "", "  ", "B", "c"]);
        let names: Vec<_> = hosts.iter().map(|h| h.name()).collect();
        assert_eq!(names, vec!["b", "A", "c"]);
    }

    #[test]
    fn test_ordering_uses_identity() {
        let mut hosts = vec![
            HostRecord::new("Zeta"),
            HostRecord::new("alpha"),
            HostRecord::new("Beta"),
        ];
        hosts.sort();
        let names: Vec<_> = hosts.iter().map(|h| h.name()).collect();
        assert_eq!(names, vec!["alpha", "Beta", "Zeta"]);
    }
}
