// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use anyhow::Context;

#[test]
fn redundant_chain_shows_top_line_only() {
    let inner = std::io::Error::new(std::io::ErrorKind::NotFound, "no such file");
    let err = anyhow::Error::new(inner).context("failed to read ci.yaml: no such file");
    assert_eq!(format_error(&err), "failed to read ci.yaml: no such file");
}

#[test]
fn distinct_causes_are_listed() {
    let result: Result<(), std::io::Error> =
        Err(std::io::Error::new(std::io::ErrorKind::Other, "disk full"));
    let err = result.context("failed to write outputs").unwrap_err();
    let msg = format_error(&err);
    assert!(msg.starts_with("failed to write outputs"), "{msg}");
    assert!(msg.contains("Caused by:\n    0: disk full"), "{msg}");
}
