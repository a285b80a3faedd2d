// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Project file discovery in `.vulcan/`

use crate::parser::{Format, ParseError};
use crate::{parse_project_with_format, Project};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Extensions tried for `<action>.<ext>`, in order of preference.
pub const CONFIG_EXTENSIONS: [&str; 4] = ["yaml", "yml", "toml", "json"];

/// Errors from project file discovery and loading
#[derive(Debug, Error)]
pub enum FindError {
    #[error("no configuration for action '{action}' in {}", dir.display())]
    NotFound { action: String, dir: PathBuf },
    #[error("{} is not a directory", .0.display())]
    NotADirectory(PathBuf),
    #[error("unsupported configuration file {}", .0.display())]
    UnsupportedFormat(PathBuf),
    #[error("failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("invalid configuration {}: {source}", path.display())]
    Parse { path: PathBuf, source: ParseError },
}

/// Locate `<config_dir>/<action>.{yaml,yml,toml,json}`.
///
/// When several candidates exist the first extension in
/// [`CONFIG_EXTENSIONS`] wins and the others are reported at warn level.
pub fn find_project(config_dir: &Path, action: &str) -> Result<PathBuf, FindError> {
    if !config_dir.is_dir() {
        return Err(FindError::NotADirectory(config_dir.to_path_buf()));
    }
    let mut candidates = CONFIG_EXTENSIONS
        .iter()
        .map(|ext| config_dir.join(format!("{}.{}", action, ext)))
        .filter(|path| path.is_file());
    let Some(found) = candidates.next() else {
        return Err(FindError::NotFound {
            action: action.to_string(),
            dir: config_dir.to_path_buf(),
        });
    };
    for shadowed in candidates {
        tracing::warn!(
            used = %found.display(),
            ignored = %shadowed.display(),
            "multiple configuration files for action"
        );
    }
    Ok(found)
}

/// Read and parse a project file, choosing the format by extension.
pub fn load_project(path: &Path) -> Result<Project, FindError> {
    let format =
        Format::from_path(path).ok_or_else(|| FindError::UnsupportedFormat(path.to_path_buf()))?;
    let content = std::fs::read_to_string(path).map_err(|source| FindError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    parse_project_with_format(&content, format).map_err(|source| FindError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

/// Find and load the project file for `action`.
pub fn load_action(config_dir: &Path, action: &str) -> Result<(PathBuf, Project), FindError> {
    let path = find_project(config_dir, action)?;
    let project = load_project(&path)?;
    tracing::info!(path = %path.display(), action, "loaded configuration");
    Ok((path, project))
}

#[cfg(test)]
#[path = "find_tests.rs"]
mod tests;
