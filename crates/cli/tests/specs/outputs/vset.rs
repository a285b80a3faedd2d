// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `vset` used directly against a store file

use crate::prelude::*;

#[test]
fn kv_is_required() {
    Project::empty().vset().fails().stderr_has("--kv");
}

#[test]
fn malformed_pair_is_rejected() {
    Project::empty()
        .vset()
        .args(&["--kv", "novalue"])
        .fails()
        .stderr_has("Error: ")
        .stderr_has("novalue");
}

#[test]
fn without_an_active_step_outputs_are_discarded() {
    let project = Project::empty();

    project.vset().args(&["--kv", "a=1"]).passes();

    if let Some(doc) = project.store() {
        let outputs = doc["outputs"].as_object().cloned().unwrap_or_default();
        assert!(outputs.is_empty(), "{doc}");
    }
}

#[test]
fn explicit_store_file_is_honored() {
    let project = Project::empty();
    let store = project.path().join("custom-store.json");
    std::fs::write(
        &store,
        r#"{"current_step":"pkg","outputs":{}}"#,
    )
    .unwrap();

    project
        .vset()
        .env("VULCAN_OUTPUT_STORE", &store)
        .args(&["--kv", "sha=abc"])
        .passes();

    let doc: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&store).unwrap()).unwrap();
    assert_eq!(doc["outputs"]["steps_pkg_outputs_sha"], "abc");
}

#[test]
fn non_identifier_key_is_kept_with_a_warning() {
    let project = Project::empty();
    let store = project.path().join("custom-store.json");
    std::fs::write(&store, r#"{"current_step":"pkg","outputs":{}}"#).unwrap();

    project
        .vset()
        .env("VULCAN_OUTPUT_STORE", &store)
        .env_remove("RUST_LOG")
        .args(&["--kv", "build-id=7"])
        .passes()
        .stderr_has("templates cannot reference it");

    let doc: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&store).unwrap()).unwrap();
    assert_eq!(doc["outputs"]["steps_pkg_outputs_build-id"], "7");
}
