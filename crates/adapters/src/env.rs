// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Centralized environment variable access for the adapters crate.

use std::time::Duration;

fn parse_duration_ms(var: &str) -> Option<Duration> {
    std::env::var(var)
        .ok()
        .and_then(|s| s.parse::<u64>().ok())
        .map(Duration::from_millis)
}

/// Container runtime CLI (default: `docker`).
pub fn docker_bin() -> String {
    std::env::var("VULCAN_DOCKER_BIN")
        .ok()
        .filter(|s| !s.trim().is_empty())
        .unwrap_or_else(|| "docker".to_string())
}

/// Timeout for short docker commands such as create, start and rm
/// (default: 60000ms).
pub fn docker_command_timeout() -> Duration {
    parse_duration_ms("VULCAN_DOCKER_TIMEOUT_MS").unwrap_or(crate::subprocess::DOCKER_TIMEOUT)
}

/// Timeout for `docker pull` of an image missing locally (default: 30 min).
pub fn docker_pull_timeout() -> Duration {
    parse_duration_ms("VULCAN_DOCKER_PULL_TIMEOUT_MS")
        .unwrap_or(crate::subprocess::DOCKER_PULL_TIMEOUT)
}
