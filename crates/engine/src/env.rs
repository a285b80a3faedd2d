// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Environment variables and fixed paths shared by the engine and its
//! binaries.

use std::path::PathBuf;
use std::time::Duration;

pub use vc_storage::env::{OUTPUT_STORE_ENV, STATE_DIR_ENV};

/// Per-step output file exported to step processes.
pub const STEP_OUTPUT_ENV: &str = "VULCAN_STEP_OUTPUT";

/// Installation root holding `toolchains/` and `plugins/`.
pub const HOME_ENV: &str = "VULCAN_HOME";

/// Project configuration directory name, relative to the project root.
pub const CONFIG_DIR_NAME: &str = ".vulcan";

/// Mount root and working directory inside a job container.
pub const CONTAINER_WORKDIR: &str = "/workdir";

/// Where toolchain and plugin executables land inside a container.
pub const CONTAINER_BIN_DIR: &str = "/bin";

/// Re-entry binary inside the container.
pub const CONTAINER_VEXEC: &str = "/bin/vexec";

/// Home directory of the container user, used for `~` artifact targets.
pub const CONTAINER_HOME: &str = "/root";

/// Lines of history replayed when attaching to container logs.
pub const LOG_TAIL_LINES: u32 = 20;

const DEFAULT_STOP_GRACE: Duration = Duration::from_secs(30);

/// Host variables never forwarded into a container.
pub const UNFORWARDED_ENV: &[&str] = &[
    "PATH",
    "HOME",
    "PWD",
    "OLDPWD",
    "HOSTNAME",
    OUTPUT_STORE_ENV,
    STATE_DIR_ENV,
    STEP_OUTPUT_ENV,
];

/// Parse a millisecond count from an environment variable.
fn parse_duration_ms(var: &str) -> Option<Duration> {
    std::env::var(var)
        .ok()
        .and_then(|s| s.parse::<u64>().ok())
        .map(Duration::from_millis)
}

/// Grace period for the forced stop after a broken container wait
/// (default: 30s)
pub fn stop_grace() -> Duration {
    parse_duration_ms("VULCAN_STOP_GRACE_MS").unwrap_or(DEFAULT_STOP_GRACE)
}

/// `$VULCAN_HOME`, when set and non-blank.
pub fn vulcan_home() -> Option<PathBuf> {
    std::env::var(HOME_ENV)
        .ok()
        .filter(|s| !s.trim().is_empty())
        .map(PathBuf::from)
}

#[cfg(test)]
#[path = "env_tests.rs"]
mod tests;
