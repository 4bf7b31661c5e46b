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

//! End-to-end runs of the `fleetrun` binary.
//!
//! Every run gets its own HOME, XDG dirs and working directory so a config
//! file on the developer's machine cannot leak in.

use std::fs;
use std::path::Path;
use std::process::{Command, Output};
use tempfile::TempDir;

fn fleetrun(sandbox: &Path, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_fleetrun"))
        .args(args)
        .current_dir(sandbox)
        .env("HOME", sandbox)
        .env("XDG_CONFIG_HOME", sandbox.join("config"))
        .env("XDG_DATA_HOME", sandbox.join("data"))
        .env_remove("RUST_LOG")
        .output()
        .expect("failed to run fleetrun binary")
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

#[test]
fn test_help_lists_subcommands() {
    let sandbox = TempDir::new().unwrap();
    let output = fleetrun(sandbox.path(), &["--help"]);

    assert!(output.status.success());
    let text = stdout(&output);
    for subcommand in ["resolve", "ping", "exec"] {
        assert!(text.contains(subcommand), "missing {subcommand} in:\n{text}");
    }
}

#[test]
fn test_resolve_defaults_to_local_machine() {
    let sandbox = TempDir::new().unwrap();
    let output = fleetrun(sandbox.path(), &["resolve"]);

    assert!(output.status.success());
    assert_eq!(stdout(&output).trim(), "localhost");
}

#[test]
fn test_resolve_uses_configured_inventory() {
    let sandbox = TempDir::new().unwrap();
    fs::write(
        sandbox.path().join("fleetrun.yaml"),
        "directory:\n  computers: [lab-01, lab-02, other-03]\n",
    )
    .unwrap();

    let output = fleetrun(sandbox.path(), &["resolve", "lab-"]);

    assert!(output.status.success());
    let lines: Vec<String> = stdout(&output).lines().map(str::to_string).collect();
    assert_eq!(lines, vec!["lab-01", "lab-02"]);
}

#[test]
fn test_exec_requires_a_command() {
    let sandbox = TempDir::new().unwrap();
    let output = fleetrun(sandbox.path(), &["exec", "lab-"]);

    assert!(!output.status.success());
}

#[cfg(unix)]
#[test]
fn test_exec_prints_per_host_output() {
    let sandbox = TempDir::new().unwrap();
    let output = fleetrun(
        sandbox.path(),
        &["exec", "", "--skip-ping", "--", "echo", "hi-{host}"],
    );

    assert!(output.status.success(), "{output:?}");
    assert!(stdout(&output).contains("hi-localhost"));
}

#[cfg(unix)]
#[test]
fn test_exec_failure_sets_exit_code() {
    let sandbox = TempDir::new().unwrap();
    let output = fleetrun(sandbox.path(), &["exec", "", "--skip-ping", "--", "false"]);

    assert_eq!(output.status.code(), Some(1));
}

#[cfg(unix)]
#[test]
fn test_exec_writes_dated_report() {
    let sandbox = TempDir::new().unwrap();
    let reports = sandbox.path().join("reports");
    fs::write(
        sandbox.path().join("fleetrun.yaml"),
        format!(
            "report:\n  root: {}\n  spreadsheet: false\n",
            reports.display()
        ),
    )
    .unwrap();

    let output = fleetrun(
        sandbox.path(),
        &[
            "exec", "ws-01,ws-02", "--skip-ping", "--report", "echo", "--", "echo", "{host}",
        ],
    );
    assert!(output.status.success(), "{output:?}");

    let written: Vec<String> = fs::read_dir(&reports)
        .unwrap()
        .map(|entry| entry.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    assert_eq!(written.len(), 1, "{written:?}");
    assert!(written[0].starts_with("echo_") && written[0].ends_with(".csv"));

    let csv = fs::read_to_string(reports.join(&written[0])).unwrap();
    assert!(csv.starts_with("Host,Output,Error"));
    assert!(csv.contains("ws-01,ws-01,"));
    assert!(csv.contains("ws-02,ws-02,"));
}
