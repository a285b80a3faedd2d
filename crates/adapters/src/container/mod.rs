// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Container runtime adapters

mod docker;

pub use docker::DockerAdapter;

// Test support - only compiled for tests or when explicitly requested
#[cfg(any(test, feature = "test-support"))]
mod fake;
#[cfg(any(test, feature = "test-support"))]
pub use fake::{ContainerCall, FakeContainer, FakeContainerAdapter};

use async_trait::async_trait;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;

/// Errors from container operations
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ContainerError {
    #[error("container not found: {0}")]
    NotFound(String),
    #[error("create failed: {0}")]
    CreateFailed(String),
    /// The wait channel broke before an exit status was known.
    #[error("wait failed: {0}")]
    WaitFailed(String),
    #[error("command failed: {0}")]
    CommandFailed(String),
}

/// Host path bound into the container.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct BindMount {
    pub source: PathBuf,
    pub target: PathBuf,
}

impl BindMount {
    pub fn new(source: impl Into<PathBuf>, target: impl Into<PathBuf>) -> Self {
        Self {
            source: source.into(),
            target: target.into(),
        }
    }
}

/// Everything needed to create a container.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContainerSpec {
    pub name: Option<String>,
    pub image: String,
    pub workdir: String,
    pub command: Vec<String>,
    pub env: Vec<(String, String)>,
    pub mounts: Vec<BindMount>,
    /// `(host name, ip)` entries added to the container's hosts file.
    pub extra_hosts: Vec<(String, String)>,
}

/// Which stream a log line came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogStream {
    Stdout,
    Stderr,
}

/// Receives followed log lines.
pub type LogSink = Arc<dyn Fn(LogStream, &str) + Send + Sync>;

/// Adapter for a container runtime
#[async_trait]
pub trait ContainerAdapter: Clone + Send + Sync + 'static {
    /// Create (but do not start) a container; returns its id
    async fn create(&self, spec: &ContainerSpec) -> Result<String, ContainerError>;

    /// Start a created container
    async fn start(&self, id: &str) -> Result<(), ContainerError>;

    /// Block until the container exits and return its exit code.
    ///
    /// No timeout: steps may run for as long as they need.
    async fn wait(&self, id: &str) -> Result<i64, ContainerError>;

    /// Full combined output of the container
    async fn logs(&self, id: &str) -> Result<String, ContainerError>;

    /// Stream output, starting `tail` lines back, until the container stops
    async fn follow_logs(&self, id: &str, tail: u32, sink: LogSink)
        -> Result<(), ContainerError>;

    /// Stop the container, killing it after `grace`
    async fn stop(&self, id: &str, grace: Duration) -> Result<(), ContainerError>;

    /// Remove the container (forced)
    async fn remove(&self, id: &str) -> Result<(), ContainerError>;
}
