// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `vulcan --action` on host-side jobs

use crate::prelude::*;

const TWO_JOBS: &str = r#"
name: demo
jobs:
  build:
    args:
      target: release
    steps:
      - id: compile
        run: touch built-{{.target}}
  test:
    steps:
      - run: touch tested
"#;

#[test]
fn runs_every_job_silently() {
    let project = Project::with_action("ci", TWO_JOBS);

    project
        .vulcan()
        .args(&["--action", "ci"])
        .passes()
        .stdout_eq("")
        .stderr_eq("");

    assert!(project.exists("built-release"));
    assert!(project.exists("tested"));
}

#[test]
fn job_flag_selects_one_job() {
    let project = Project::with_action("ci", TWO_JOBS);

    project.vulcan().args(&["-a", "ci", "-j", "test"]).passes();

    assert!(project.exists("tested"));
    assert!(!project.exists("built-release"));
}

#[test]
fn multi_line_run_executes_each_line() {
    let project = Project::with_action(
        "ci",
        r#"
jobs:
  build:
    steps:
      - run: |
          mkdir -p out
          touch out/a

          touch out/b
"#,
    );

    project.vulcan().args(&["-a", "ci"]).passes();

    assert!(project.exists("out/a"));
    assert!(project.exists("out/b"));
}

#[test]
fn env_flag_reaches_step_args() {
    let project = Project::with_action(
        "ci",
        r#"
jobs:
  build:
    args:
      flavor: ${FLAVOR}
    steps:
      - run: touch flavor-{{.flavor}}
"#,
    );

    project
        .vulcan()
        .args(&["-a", "ci", "--env", "FLAVOR=spicy"])
        .passes();

    assert!(project.exists("flavor-spicy"));
}

#[test]
fn env_file_is_applied_before_pairs() {
    let project = Project::with_action(
        "ci",
        r#"
jobs:
  build:
    args:
      a: ${SPEC_A}
      b: ${SPEC_B}
    steps:
      - run: touch {{.a}}-{{.b}}
"#,
    );
    project.file("ci.env", "SPEC_A=file\nnot a pair\nSPEC_B=file\n");

    project
        .vulcan()
        .args(&["-a", "ci", "--env-file", "ci.env", "-e", "SPEC_B=flag"])
        .env_remove("RUST_LOG")
        .passes()
        .stderr_has("skipping env file line");

    assert!(project.exists("file-flag"));
}

#[test]
fn toml_project_files_are_accepted() {
    let project = Project::empty();
    project.file(
        ".vulcan/ci.toml",
        r#"
[jobs.build]
[[jobs.build.steps]]
run = "touch from-toml"
"#,
    );

    project.vulcan().args(&["-a", "ci"]).passes();

    assert!(project.exists("from-toml"));
}
