// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Step output naming and the `key=value` pair format.

use crate::error::ConfigError;
use serde::{Deserialize, Serialize};

/// Fully qualified output key: `steps_<step>_outputs_<key>`.
///
/// Namespacing by producing step keeps outputs of different steps from
/// colliding in a job's scope.
pub fn output_key(step: &str, key: &str) -> String {
    format!("{}{}", output_prefix(step), key)
}

/// Prefix shared by every output key of one step.
pub fn output_prefix(step: &str) -> String {
    format!("steps_{}_outputs_", step)
}

/// Whether `name` matches `[A-Za-z_][A-Za-z0-9_]*`, the names templates
/// can reference.
pub fn is_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {
            chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
        }
        _ => false,
    }
}

/// A `(key, value)` output published by a step.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutputRecord {
    pub key: String,
    pub value: String,
}

impl OutputRecord {
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }
}

/// Split `key=value` at the first `=`. The value may itself contain `=`.
pub fn parse_pair(pair: &str) -> Result<OutputRecord, ConfigError> {
    match pair.split_once('=') {
        Some((key, value)) if !key.trim().is_empty() => {
            Ok(OutputRecord::new(key.trim(), value))
        }
        _ => Err(ConfigError::MalformedPair(pair.to_string())),
    }
}
