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

//! Error types for target resolution

use thiserror::Error;

/// Errors that can occur while turning a target specification into hosts.
///
/// None of these escape [`TargetResolver::resolve`](super::TargetResolver::resolve);
/// they are logged and the resolver degrades to whatever it already has.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ResolutionError {
    /// Hostfile does not exist
    #[error("hostfile not found: {path}")]
    FileNotFound { path: String },

    /// Hostfile exists but could not be read, or is too large
    #[error("failed to read hostfile '{path}': {reason}")]
    FileReadError { path: String, reason: String },

    /// Directory backend could not be queried
    #[error("directory service unavailable for prefix '{prefix}': {reason}")]
    DirectoryUnavailable { prefix: String, reason: String },

    /// Directory lookup did not answer in time
    #[error("directory lookup for prefix '{prefix}' timed out after {seconds}s")]
    DirectoryTimeout { prefix: String, seconds: u64 },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = ResolutionError::FileNotFound {
            path: "/tmp/hosts.txt".to_string(),
        };
        assert_eq!(err.to_string(), "hostfile not found: /tmp/hosts.txt");

        let err = ResolutionError::DirectoryUnavailable {
            prefix: "lab-".to_string(),
            reason: "connection refused".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "directory service unavailable for prefix 'lab-': connection refused"
        );

        let err = ResolutionError::DirectoryTimeout {
            prefix: "lab-".to_string(),
            seconds: 10,
        };
        assert_eq!(
            err.to_string(),
            "directory lookup for prefix 'lab-' timed out after 10s"
        );
    }
}
