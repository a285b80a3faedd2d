// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Outputs of one step are visible to the steps after it

use crate::prelude::*;

#[test]
fn step_output_file_feeds_later_steps() {
    let project = Project::with_action(
        "ci",
        r#"
jobs:
  build:
    steps:
      - id: version
        run: sh -c 'echo tag=1.2.3 >> "$VULCAN_STEP_OUTPUT"'
      - run: touch release-{{.steps_version_outputs_tag}}
"#,
    );

    project.vulcan().args(&["-a", "ci"]).passes();

    assert!(project.exists("release-1.2.3"));
}

#[test]
fn vset_on_the_toolchain_path_feeds_later_steps() {
    let project = Project::with_action(
        "ci",
        r#"
jobs:
  build:
    steps:
      - id: meta
        run: vset --kv image=app --kv channel=beta
      - run: touch {{.steps_meta_outputs_image}}-{{.steps_meta_outputs_channel}}
"#,
    );
    let toolchain = project.toolchain_with_vset();

    project
        .vulcan()
        .args(&["-a", "ci", "--toolchain", toolchain.to_str().unwrap()])
        .passes();

    assert!(project.exists("app-beta"));
}

#[test]
fn outputs_do_not_leak_between_jobs() {
    let project = Project::with_action(
        "ci",
        r#"
jobs:
  first:
    steps:
      - id: meta
        run: sh -c 'echo tag=one >> "$VULCAN_STEP_OUTPUT"'
  second:
    steps:
      - run: touch {{.steps_meta_outputs_tag}}
"#,
    );

    project
        .vulcan()
        .args(&["-a", "ci"])
        .fails()
        .stderr_has("job 'second'");

    assert!(!project.exists("one"));
}

#[test]
fn malformed_output_line_fails_the_step() {
    let project = Project::with_action(
        "ci",
        r#"
jobs:
  build:
    steps:
      - id: meta
        run: sh -c 'echo not-a-pair >> "$VULCAN_STEP_OUTPUT"'
"#,
    );

    project
        .vulcan()
        .args(&["-a", "ci"])
        .fails()
        .stderr_has("not-a-pair");
}

#[test]
fn store_keeps_the_last_job_outputs() {
    let project = Project::with_action(
        "ci",
        r#"
jobs:
  build:
    steps:
      - id: meta
        run: sh -c 'echo tag=7 >> "$VULCAN_STEP_OUTPUT"'
"#,
    );

    project.vulcan().args(&["-a", "ci"]).passes();

    let doc = project.store().unwrap();
    assert_eq!(doc["outputs"]["steps_meta_outputs_tag"], "7");
}
