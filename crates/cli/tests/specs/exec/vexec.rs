// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `vexec` runs a single job in-process, ignoring its `run-on`

use crate::prelude::*;

#[test]
fn config_is_required() {
    Project::empty()
        .vexec()
        .args(&["--job-id", "build"])
        .fails()
        .stderr_eq("Error: path of config file is missing\n");
}

#[test]
fn job_id_is_required() {
    let project = Project::with_action("ci", "jobs: {}\n");

    project
        .vexec()
        .args(&["--config", ".vulcan/ci.yaml"])
        .fails()
        .stderr_eq("Error: job id is missing\n");
}

#[test]
fn runs_container_job_on_the_host() {
    let project = Project::with_action(
        "ci",
        r#"
jobs:
  build:
    run-on: alpine:3
    args:
      who: inside
    steps:
      - id: hello
        run: touch {{.who}}
"#,
    );
    let config = project.path().join(".vulcan/ci.yaml");

    project
        .vexec()
        .args(&["--config", config.to_str().unwrap(), "--job-id", "build"])
        .passes()
        .stderr_eq("");

    assert!(project.exists("inside"));
}

#[test]
fn unknown_job_is_reported() {
    let project = Project::with_action("ci", "jobs:\n  build:\n    steps:\n      - run: \"true\"\n");
    let config = project.path().join(".vulcan/ci.yaml");

    project
        .vexec()
        .args(&["--config", config.to_str().unwrap(), "--job-id", "lint"])
        .fails()
        .stderr_has("job 'lint' not found");
}
