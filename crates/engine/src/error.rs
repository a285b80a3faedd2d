// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Error types for the engine

use std::path::PathBuf;
use thiserror::Error;
use vc_adapters::ContainerError;
use vc_core::ConfigError;
use vc_runbook::TemplateError;
use vc_shell::TokenizeError;
use vc_storage::StoreError;

/// Errors that can occur while running jobs and steps
#[derive(Debug, Error)]
pub enum EngineError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("failed to render '{line}': {source}")]
    Template {
        line: String,
        source: TemplateError,
    },
    #[error("failed to tokenize '{line}': {source}")]
    Tokenize {
        line: String,
        source: TokenizeError,
    },
    #[error("command line '{0}' names no executable")]
    EmptyCommand(String),
    #[error("failed to spawn '{program}': {source}")]
    Spawn {
        program: String,
        source: std::io::Error,
    },
    #[error("'{command}' exited with {status}")]
    Exit { command: String, status: String },
    #[error(transparent)]
    Store(#[from] StoreError),
    #[error("output store task failed: {0}")]
    StoreTask(#[from] tokio::task::JoinError),
    #[error("container error: {0}")]
    Container(#[from] ContainerError),
    #[error("container from image {image} exited with code {code}{}", logs_suffix(.logs))]
    ContainerExit {
        image: String,
        code: i64,
        /// Captured output, when it was not streamed live.
        logs: Option<String>,
    },
    #[error("{kind} directory {} does not exist", path.display())]
    MissingDir { kind: &'static str, path: PathBuf },
    #[error("cannot resolve home directory for '{0}'")]
    NoHome(String),
    #[error("io error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("job '{job}' failed at step '{step}': {source}")]
    StepFailed {
        job: String,
        step: String,
        source: Box<EngineError>,
    },
    #[error("job '{job}' failed: {source}")]
    JobFailed {
        job: String,
        source: Box<EngineError>,
    },
}

impl EngineError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        EngineError::Io {
            path: path.into(),
            source,
        }
    }

    /// The innermost error, skipping job and step wrappers.
    pub fn root(&self) -> &EngineError {
        match self {
            EngineError::StepFailed { source, .. } | EngineError::JobFailed { source, .. } => {
                source.root()
            }
            other => other,
        }
    }
}

fn logs_suffix(logs: &Option<String>) -> String {
    match logs.as_deref().map(str::trim_end) {
        Some(text) if !text.is_empty() => format!("\ncontainer logs:\n{}", text),
        _ => String::new(),
    }
}
