// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;

const YAML: &str = r#"
name: release
jobs:
  package:
    name: Package
    run-on: alpine:3.19
    artifacts: ["dist:out"]
    args:
      version: "1.0"
    steps:
      - id: build
        run: make VERSION={{.version}}
      - use: upload
        with:
          file: out/app.tar
"#;

const TOML: &str = r#"
name = "release"

[jobs.package]
name = "Package"
run-on = "alpine:3.19"
artifacts = ["dist:out"]

[jobs.package.args]
version = "1.0"

[[jobs.package.steps]]
id = "build"
run = "make VERSION={{.version}}"

[[jobs.package.steps]]
use = "upload"

[jobs.package.steps.with]
file = "out/app.tar"
"#;

const JSON: &str = r#"{
  "name": "release",
  "jobs": {
    "package": {
      "name": "Package",
      "run-on": "alpine:3.19",
      "artifacts": ["dist:out"],
      "args": {"version": "1.0"},
      "steps": [
        {"id": "build", "run": "make VERSION={{.version}}"},
        {"use": "upload", "with": {"file": "out/app.tar"}}
      ]
    }
  }
}"#;

#[test]
fn all_formats_describe_the_same_project() {
    let yaml = parse_project(YAML).unwrap();
    assert_eq!(parse_toml(TOML), yaml);
    assert_eq!(parse_json(JSON), yaml);
}

#[test]
fn job_order_follows_the_file() {
    let yaml = "jobs:\n  zeta:\n    steps: [{run: a}]\n  alpha:\n    steps: [{run: b}]\n";
    let project = parse_project(yaml).unwrap();
    let ids: Vec<_> = project.jobs.keys().map(|k| k.to_string()).collect();
    assert_eq!(ids, ["zeta", "alpha"]);
}

#[test]
fn multi_line_run_keeps_every_line() {
    let yaml = "jobs:\n  b:\n    steps:\n      - run: |\n          echo a\n          echo b\n";
    let project = parse_project(yaml).unwrap();
    let job = project.job("b").unwrap();
    let lines = job.steps[0].action(&job.id).unwrap().lines();
    assert_eq!(lines, ["echo a", "echo b"]);
}
