// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Artifact bind-mount specifications (`host-path:container-path`).

use crate::error::ConfigError;
use std::fmt;
use std::str::FromStr;

/// A declared artifact mount. Paths are kept as written; `~` and relative
/// paths are resolved when the mount plan is built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArtifactSpec {
    pub host: String,
    pub container: String,
}

impl ArtifactSpec {
    pub fn parse(spec: &str) -> Result<Self, ConfigError> {
        let malformed = || ConfigError::MalformedArtifact(spec.to_string());
        let (host, container) = spec.split_once(':').ok_or_else(malformed)?;
        let (host, container) = (host.trim(), container.trim());
        if host.is_empty() || container.is_empty() {
            return Err(malformed());
        }
        Ok(Self {
            host: host.to_string(),
            container: container.to_string(),
        })
    }
}

impl FromStr for ArtifactSpec {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for ArtifactSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.host, self.container)
    }
}
