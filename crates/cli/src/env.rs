// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Centralized environment access for the binaries.

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

/// Which installation subdirectory a search directory lives in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToolDir {
    Toolchains,
    Plugins,
}

impl ToolDir {
    pub fn dir_name(self) -> &'static str {
        match self {
            ToolDir::Toolchains => "toolchains",
            ToolDir::Plugins => "plugins",
        }
    }
}

/// Resolve a toolchain or plugin directory.
///
/// An explicit flag is used as given. Otherwise `$VULCAN_HOME/<kind>`, then
/// `<exe>/../../<kind>`; those fallbacks only count when the directory
/// exists.
pub fn resolve_tool_dir(explicit: Option<PathBuf>, kind: ToolDir) -> Option<PathBuf> {
    if explicit.is_some() {
        return explicit;
    }
    let exe = std::env::current_exe().ok();
    resolve_from(vc_engine::env::vulcan_home(), exe.as_deref(), kind)
}

fn resolve_from(home: Option<PathBuf>, exe: Option<&Path>, kind: ToolDir) -> Option<PathBuf> {
    let from_home = home.map(|h| h.join(kind.dir_name()));
    let from_exe = exe
        .and_then(|e| e.parent())
        .and_then(Path::parent)
        .map(|root| root.join(kind.dir_name()));
    [from_home, from_exe]
        .into_iter()
        .flatten()
        .find(|dir| dir.is_dir())
}

/// Apply an env file, then `--env` pairs, to this process.
///
/// Runs before configuration is loaded so `$NAME` arguments see the values.
pub fn apply_env(env_file: Option<&Path>, pairs: &[String]) -> Result<()> {
    let mut vars = Vec::new();
    if let Some(path) = env_file {
        vars.extend(vc_runbook::load_env_file(path)?);
    }
    vars.extend(vc_runbook::parse_env_pairs(pairs)?);
    for (key, value) in vars {
        tracing::debug!(key = %key, "setting environment variable");
        std::env::set_var(key, value);
    }
    Ok(())
}

pub fn current_dir() -> Result<PathBuf> {
    std::env::current_dir().context("cannot determine the working directory")
}

#[cfg(test)]
#[path = "env_tests.rs"]
mod tests;
