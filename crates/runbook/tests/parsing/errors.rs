// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;

#[test]
fn yaml_syntax_error() {
    let err = parse_project("jobs: [unclosed").unwrap_err();
    assert!(matches!(err, ParseError::Yaml(_)));
}

#[test]
fn toml_syntax_error() {
    let err = parse_project_with_format("[jobs", Format::Toml).unwrap_err();
    assert!(matches!(err, ParseError::Toml(_)));
}

#[test]
fn json_syntax_error() {
    let err = parse_project_with_format("{", Format::Json).unwrap_err();
    assert!(matches!(err, ParseError::Json(_)));
}

#[test]
fn steps_must_be_a_list() {
    let err = parse_project("jobs:\n  b:\n    steps: nope\n").unwrap_err();
    assert!(matches!(err, ParseError::Yaml(_)));
}

#[test]
fn missing_action_in_json_names_job_and_step() {
    let json = r#"{"jobs":{"deploy":{"steps":[{"id":"push"}]}}}"#;
    let err = parse_project_with_format(json, Format::Json).unwrap_err();
    assert_err_contains(&err, &["deploy", "push", "either run or use"]);
}

#[test]
fn blank_job_id_is_rejected() {
    let json = r#"{"jobs":{" ":{"steps":[{"run":"x"}]}}}"#;
    let err = parse_project_with_format(json, Format::Json).unwrap_err();
    assert_err_contains(&err, &["job id must not be empty"]);
}
