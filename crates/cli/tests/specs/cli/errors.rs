// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Failures surface as `Error: ...` on stderr with exit code 1

use crate::prelude::*;

#[test]
fn failing_step_stops_the_job() {
    let project = Project::with_action(
        "ci",
        r#"
jobs:
  build:
    steps:
      - id: broken
        run: "false"
      - run: touch unreachable
"#,
    );

    let run = project
        .vulcan()
        .args(&["-a", "ci"])
        .fails()
        .stderr_has("Error: ")
        .stderr_has("job 'build' failed at step 'broken'");

    assert_eq!(run.code(), Some(1));
    assert!(!project.exists("unreachable"));
}

#[test]
fn failure_skips_later_jobs() {
    let project = Project::with_action(
        "ci",
        r#"
jobs:
  first:
    steps:
      - run: "false"
  second:
    steps:
      - run: touch second-ran
"#,
    );

    project.vulcan().args(&["-a", "ci"]).fails();

    assert!(!project.exists("second-ran"));
}

#[test]
fn unknown_job_is_reported() {
    let project = Project::with_action("ci", "jobs:\n  build:\n    steps:\n      - run: \"true\"\n");

    project
        .vulcan()
        .args(&["-a", "ci", "-j", "deploy"])
        .fails()
        .stderr_has("job 'deploy' not found");
}

#[test]
fn missing_action_file_is_reported() {
    let project = Project::with_action("ci", "jobs: {}\n");

    project
        .vulcan()
        .args(&["-a", "release"])
        .fails()
        .stderr_has("no configuration for action 'release'");
}

#[test]
fn missing_config_directory_is_reported() {
    let project = Project::empty();

    project
        .vulcan()
        .args(&["-a", "ci"])
        .fails()
        .stderr_has("is not a directory");
}

#[test]
fn step_without_run_or_use_is_rejected() {
    let project = Project::with_action("ci", "jobs:\n  build:\n    steps:\n      - name: Nothing\n");

    project
        .vulcan()
        .args(&["-a", "ci"])
        .fails()
        .stderr_has("either run or use");
}

#[test]
fn undefined_template_key_fails_the_step() {
    let project = Project::with_action(
        "ci",
        "jobs:\n  build:\n    steps:\n      - id: greet\n        run: touch {{.missing}}\n",
    );

    project
        .vulcan()
        .args(&["-a", "ci"])
        .fails()
        .stderr_has("step 'greet'")
        .stderr_has("missing");
}

#[test]
fn missing_program_is_reported() {
    let project = Project::with_action(
        "ci",
        "jobs:\n  build:\n    steps:\n      - run: no-such-program-vulcan-spec\n",
    );

    project
        .vulcan()
        .args(&["-a", "ci"])
        .fails()
        .stderr_has("no-such-program-vulcan-spec");
}

#[test]
fn action_flag_is_required() {
    Project::empty()
        .vulcan()
        .fails()
        .stderr_has("--action");
}
