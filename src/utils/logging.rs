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

use tracing_subscriber::EnvFilter;

/// Filter directive for a `-v` count.
fn verbosity_directive(verbosity: u8) -> &'static str {
    match verbosity {
        0 => "fleetrun=warn",
        1 => "fleetrun=info",
        2 => "fleetrun=debug",
        _ => "fleetrun=trace",
    }
}

/// Create an environment filter based on verbosity level
///
/// `RUST_LOG` wins when set.
pub fn create_env_filter(verbosity: u8) -> EnvFilter {
    if std::env::var("RUST_LOG").is_ok() {
        EnvFilter::from_default_env()
    } else {
        EnvFilter::new(verbosity_directive(verbosity))
    }
}

/// Log to stderr so reports on stdout stay clean.
pub fn init_logging(verbosity: u8) {
    let result = tracing_subscriber::fmt()
        .with_env_filter(create_env_filter(verbosity))
        .with_writer(std::io::stderr)
        .with_target(verbosity >= 2)
        .try_init();

    if let Err(e) = result {
        eprintln!("Logging already initialized: {e}");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_verbosity_directive() {
        assert_eq!(verbosity_directive(0), "fleetrun=warn");
        assert_eq!(verbosity_directive(1), "fleetrun=info");
        assert_eq!(verbosity_directive(2), "fleetrun=debug");
        assert_eq!(verbosity_directive(9), "fleetrun=trace");
    }
}
