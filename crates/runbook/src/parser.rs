// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Project file parsing (YAML, TOML, and JSON)

use crate::project::{Project, ProjectDef};
use std::path::Path;
use thiserror::Error;
use vc_core::ConfigError;

/// Project file format
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    Yaml,
    Toml,
    Json,
}

impl Format {
    /// Format implied by a file extension (`yaml`, `yml`, `toml`, `json`).
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_ascii_lowercase().as_str() {
            "yaml" | "yml" => Some(Format::Yaml),
            "toml" => Some(Format::Toml),
            "json" => Some(Format::Json),
            _ => None,
        }
    }

    pub fn from_path(path: &Path) -> Option<Self> {
        path.extension()
            .and_then(|e| e.to_str())
            .and_then(Self::from_extension)
    }
}

/// Errors that can occur while loading a project file
#[derive(Debug, Error)]
pub enum ParseError {
    #[error("YAML parse error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid format for {location}: {message}")]
    InvalidFormat { location: String, message: String },

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("job '{0}' not found")]
    UnknownJob(String),
}

/// Parse a YAML project file.
pub fn parse_project(content: &str) -> Result<Project, ParseError> {
    parse_project_with_format(content, Format::Yaml)
}

/// Parse and validate a project file in the given format.
pub fn parse_project_with_format(content: &str, format: Format) -> Result<Project, ParseError> {
    let def: ProjectDef = match format {
        // An empty YAML document is an empty project, not an error
        Format::Yaml if content.trim().is_empty() => ProjectDef::default(),
        Format::Yaml => serde_yaml::from_str(content)?,
        Format::Toml => toml::from_str(content)?,
        Format::Json => serde_json::from_str(content)?,
    };
    let project = Project::try_from(def)?;
    tracing::debug!(
        name = %project.name,
        jobs = project.jobs.len(),
        "parsed project"
    );
    Ok(project)
}

#[cfg(test)]
#[path = "parser_tests.rs"]
mod tests;
