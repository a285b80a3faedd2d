// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Configuration errors

use thiserror::Error;

/// Errors in job configuration or step output data.
///
/// These are never retried: they describe input that cannot run as given.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("step '{step}' of job '{job}': either run or use must be specified")]
    MissingAction { job: String, step: String },
    #[error("step '{step}' of job '{job}': run and use are mutually exclusive")]
    ConflictingAction { job: String, step: String },
    #[error("pair {0} is malformed")]
    MalformedPair(String),
    #[error("artifact '{0}' is malformed, expected host-path:container-path")]
    MalformedArtifact(String),
}
