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

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "fleetrun",
    version,
    about = "Resolve a target, probe it, and fan a command out to every host",
    long_about = "fleetrun turns a target specification into a host list, optionally drops hosts that do not\nanswer a liveness probe, runs a command template on every remaining host in parallel, and\nwrites a per-host report. One failing or hung host never affects the others.\n\nTarget forms:\n  (empty), localhost, 127.0.0.1   this machine\n  ./hosts.txt                     existing file, one host per line\n  lab-,ws-01                      comma list; each token is looked up as a name prefix",
    after_help = "EXAMPLES:\n  Show resolved hosts:        fleetrun resolve lab-\n  Check reachability:         fleetrun ping hosts.txt --count 2\n  Run on every host:          fleetrun exec lab- -- ssh {host} uptime\n  Write a CSV/XLSX report:    fleetrun exec lab- --report uptime -- ssh {host} uptime"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    #[arg(
        long,
        global = true,
        help = "Configuration file path\nConfig loading priority:\n  1. This flag's value\n  2. ./fleetrun.yaml\n  3. $XDG_CONFIG_HOME/fleetrun/config.yaml (or ~/.config/fleetrun/config.yaml)\n  4. Built-in defaults"
    )]
    pub config: Option<PathBuf>,

    #[arg(
        short = 'p',
        long,
        global = true,
        help = "Maximum hosts worked on at once (0 = one worker per host) [default: from config, 32]"
    )]
    pub parallel: Option<usize>,

    #[arg(
        long,
        global = true,
        help = "Per-host timeout in seconds (0 for unlimited) [default: from config, 120]"
    )]
    pub timeout: Option<u64>,

    #[arg(
        short = 'v',
        long,
        global = true,
        action = clap::ArgAction::Count,
        help = "Increase verbosity (-v, -vv, -vvv)"
    )]
    pub verbose: u8,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    #[command(
        about = "Print the hosts a target resolves to",
        after_help = "Examples:\n  fleetrun resolve \"\"              # this machine\n  fleetrun resolve lab-,ws-01       # two prefix lookups"
    )]
    Resolve {
        #[arg(help = "Target specification", default_value = "")]
        target: String,
    },

    #[command(
        about = "Probe every resolved host and list reachable and unreachable ones",
        long_about = "Probes each host concurrently. A host is reachable when at least one of --count probes\nsucceeds.\n\nExit codes: 0 (all reachable), 1 (any unreachable)"
    )]
    Ping {
        #[arg(help = "Target specification", default_value = "")]
        target: String,

        #[arg(long, help = "Probes per host [default: from config, 1]")]
        count: Option<u32>,
    },

    #[command(
        about = "Run a command template on every resolved host",
        long_about = "Resolves the target, drops hosts that fail the liveness probe (unless --skip-ping),\nruns the command on every remaining host in parallel and reports per-host results.\n`{host}` in the command is replaced with the host name. JSON object output becomes\nreport columns.\n\nExit codes: 0 (all succeed), 1 (any failed or unreachable host)",
        after_help = "Examples:\n  fleetrun exec lab- -- ssh {host} uptime\n  fleetrun exec hosts.txt --skip-ping --report dotnet -- ./scan-dotnet.sh {host}"
    )]
    Exec {
        #[arg(help = "Target specification")]
        target: String,

        #[arg(long, help = "Run on every host without a liveness probe first")]
        skip_ping: bool,

        #[arg(
            long,
            value_name = "NAME",
            help = "Write <report root>/<NAME>_<date>.csv (+ .xlsx) instead of printing"
        )]
        report: Option<String>,

        #[arg(long, help = "Never open the interactive table for large results")]
        no_interactive: bool,

        #[arg(
            last = true,
            required = true,
            num_args = 1..,
            help = "Command template, e.g. -- ssh {host} uptime"
        )]
        command: Vec<String>,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_exec() {
        let cli = Cli::try_parse_from([
            "fleetrun", "-p", "4", "exec", "lab-", "--report", "uptime", "--", "ssh", "{host}",
            "uptime",
        ])
        .unwrap();
        assert_eq!(cli.parallel, Some(4));
        match cli.command {
            Commands::Exec {
                target,
                report,
                command,
                skip_ping,
                ..
            } => {
                assert_eq!(target, "lab-");
                assert_eq!(report.as_deref(), Some("uptime"));
                assert_eq!(command, vec!["ssh", "{host}", "uptime"]);
                assert!(!skip_ping);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let cli = Cli::try_parse_from(["fleetrun", "ping", "hosts.txt", "-vv", "--timeout", "5"])
            .unwrap();
        assert_eq!(cli.verbose, 2);
        assert_eq!(cli.timeout, Some(5));
    }

    #[test]
    fn test_exec_requires_command() {
        assert!(Cli::try_parse_from(["fleetrun", "exec", "lab-"]).is_err());
    }

    #[test]
    fn test_resolve_default_target_is_local() {
        let cli = Cli::try_parse_from(["fleetrun", "resolve"]).unwrap();
        assert!(matches!(cli.command, Commands::Resolve { target } if target.is_empty()));
    }
}
