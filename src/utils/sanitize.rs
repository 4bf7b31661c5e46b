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

use anyhow::{bail, Result};

/// DNS limit
const MAX_HOSTNAME_LENGTH: usize = 253;

fn check_common(value: &str, what: &str) -> Result<()> {
    if value.trim().is_empty() {
        bail!("Empty {what} not allowed");
    }

    if value.len() > MAX_HOSTNAME_LENGTH {
        bail!(
            "{what} too long: {} bytes (max: {} bytes)",
            value.len(),
            MAX_HOSTNAME_LENGTH
        );
    }

    // Valid: alphanumeric, dots, hyphens, underscores (NetBIOS names)
    let valid_chars = |c: char| c.is_ascii_alphanumeric() || c == '.' || c == '-' || c == '_';
    if !value.chars().all(valid_chars) {
        bail!("Invalid characters in {what}: {value}");
    }

    if value.contains("..") {
        bail!("Double dots not allowed in {what}");
    }

    Ok(())
}

/// Validate a host name before it is handed to a payload.
pub fn sanitize_hostname(hostname: &str) -> Result<String> {
    check_common(hostname, "hostname")?;

    for segment in hostname.split('.') {
        if segment.starts_with('-') || segment.ends_with('-') {
            bail!("Hostname segments cannot start or end with hyphen");
        }
    }

    Ok(hostname.to_string())
}

/// Validate a directory prefix token.
///
/// Looser than [`sanitize_hostname`]: `lab-` and `web.` are valid prefixes.
pub fn sanitize_host_prefix(prefix: &str) -> Result<String> {
    check_common(prefix, "host prefix")?;

    if prefix.starts_with('-') || prefix.starts_with('.') {
        bail!("Host prefix cannot start with '-' or '.'");
    }

    Ok(prefix.to_string())
}
