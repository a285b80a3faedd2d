// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Subprocess execution helpers

use std::process::Output;
use std::time::Duration;
use tokio::process::Command;

/// Default timeout for short-lived docker commands (create, start, logs, rm).
pub const DOCKER_TIMEOUT: Duration = Duration::from_secs(60);

/// Default timeout for pulling a missing image before `docker create`.
pub const DOCKER_PULL_TIMEOUT: Duration = Duration::from_secs(30 * 60);

/// Run a subprocess command with a timeout.
///
/// The child is killed when the timeout elapses (`kill_on_drop`). A non-zero
/// exit is returned as output, not as an error.
pub async fn run_with_timeout(
    mut cmd: Command,
    timeout: Duration,
    description: &str,
) -> Result<Output, String> {
    cmd.kill_on_drop(true);
    match tokio::time::timeout(timeout, cmd.output()).await {
        Ok(Ok(output)) => Ok(output),
        Ok(Err(io_err)) => Err(format!("{} failed: {}", description, io_err)),
        Err(_elapsed) => Err(format!(
            "{} timed out after {}s",
            description,
            timeout.as_secs_f64()
        )),
    }
}

/// Best human-readable detail from a failed command: stderr, else stdout.
pub fn failure_detail(output: &Output) -> String {
    let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
    if !stderr.is_empty() {
        return stderr;
    }
    let stdout = String::from_utf8_lossy(&output.stdout).trim().to_string();
    if !stdout.is_empty() {
        return stdout;
    }
    match output.status.code() {
        Some(code) => format!("exited with status {}", code),
        None => "terminated by signal".to_string(),
    }
}

#[cfg(test)]
#[path = "subprocess_tests.rs"]
mod tests;
