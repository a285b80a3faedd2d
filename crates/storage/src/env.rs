// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Centralized environment variable access for the storage crate.

use std::path::PathBuf;
use std::time::Duration;

/// Explicit output store file, exported by the engine to every step process.
pub const OUTPUT_STORE_ENV: &str = "VULCAN_OUTPUT_STORE";

/// Root for engine state (output store, per-step output files).
pub const STATE_DIR_ENV: &str = "VULCAN_STATE_DIR";

const DEFAULT_STATE_DIR: &str = "/tmp/vulcan";

/// Resolve state directory: VULCAN_STATE_DIR > /tmp/vulcan
pub fn state_dir() -> PathBuf {
    std::env::var(STATE_DIR_ENV)
        .ok()
        .filter(|s| !s.trim().is_empty())
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_STATE_DIR))
}

/// Resolve the store file: VULCAN_OUTPUT_STORE > <state_dir>/outputs.json
pub fn store_path() -> PathBuf {
    std::env::var(OUTPUT_STORE_ENV)
        .ok()
        .filter(|s| !s.trim().is_empty())
        .map(PathBuf::from)
        .unwrap_or_else(|| state_dir().join("outputs.json"))
}

/// Lock acquisition timeout override
pub fn lock_timeout_ms() -> Option<Duration> {
    std::env::var("VULCAN_STORE_LOCK_MS")
        .ok()
        .and_then(|s| s.parse::<u64>().ok())
        .map(Duration::from_millis)
}
