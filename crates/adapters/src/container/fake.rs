// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Fake container adapter for testing
#![cfg_attr(coverage_nightly, coverage(off))]

use super::{ContainerAdapter, ContainerError, ContainerSpec, LogSink, LogStream};
use async_trait::async_trait;
use parking_lot::Mutex;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

/// Recorded container call
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContainerCall {
    Create { spec: ContainerSpec },
    Start { id: String },
    Wait { id: String },
    Logs { id: String },
    FollowLogs { id: String, tail: u32 },
    Stop { id: String, grace: Duration },
    Remove { id: String },
}

/// Fake container state
#[derive(Debug, Clone)]
pub struct FakeContainer {
    pub spec: ContainerSpec,
    pub started: bool,
    pub stopped: bool,
    pub removed: bool,
}

struct FakeContainerState {
    containers: HashMap<String, FakeContainer>,
    calls: Vec<ContainerCall>,
    next_id: u64,
    exit_code: i64,
    logs: Vec<String>,
    create_error: Option<String>,
    wait_error: Option<String>,
    remove_error: Option<String>,
}

/// Fake container adapter for testing
#[derive(Clone)]
pub struct FakeContainerAdapter {
    inner: Arc<Mutex<FakeContainerState>>,
}

impl Default for FakeContainerAdapter {
    fn default() -> Self {
        Self {
            inner: Arc::new(Mutex::new(FakeContainerState {
                containers: HashMap::new(),
                calls: Vec::new(),
                next_id: 0,
                exit_code: 0,
                logs: Vec::new(),
                create_error: None,
                wait_error: None,
                remove_error: None,
            })),
        }
    }
}

impl FakeContainerAdapter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Get all recorded calls
    pub fn calls(&self) -> Vec<ContainerCall> {
        self.inner.lock().calls.clone()
    }

    /// Get a container by ID
    pub fn container(&self, id: &str) -> Option<FakeContainer> {
        self.inner.lock().containers.get(id).cloned()
    }

    /// Spec of the most recently created container
    pub fn last_spec(&self) -> Option<ContainerSpec> {
        self.inner.lock().calls.iter().rev().find_map(|c| match c {
            ContainerCall::Create { spec } => Some(spec.clone()),
            _ => None,
        })
    }

    /// Exit code reported by `wait`
    pub fn set_exit_code(&self, code: i64) {
        self.inner.lock().exit_code = code;
    }

    /// Output lines returned by `logs` and `follow_logs`
    pub fn set_logs(&self, lines: Vec<String>) {
        self.inner.lock().logs = lines;
    }

    pub fn fail_create(&self, message: &str) {
        self.inner.lock().create_error = Some(message.to_string());
    }

    /// Make `wait` fail as if the wait channel broke
    pub fn fail_wait(&self, message: &str) {
        self.inner.lock().wait_error = Some(message.to_string());
    }

    pub fn fail_remove(&self, message: &str) {
        self.inner.lock().remove_error = Some(message.to_string());
    }

    fn with_container(
        &self,
        id: &str,
        f: impl FnOnce(&mut FakeContainer),
    ) -> Result<(), ContainerError> {
        match self.inner.lock().containers.get_mut(id) {
            Some(c) => {
                f(c);
                Ok(())
            }
            None => Err(ContainerError::NotFound(id.to_string())),
        }
    }
}

#[async_trait]
impl ContainerAdapter for FakeContainerAdapter {
    async fn create(&self, spec: &ContainerSpec) -> Result<String, ContainerError> {
        let mut inner = self.inner.lock();
        inner.calls.push(ContainerCall::Create { spec: spec.clone() });
        if let Some(message) = inner.create_error.clone() {
            return Err(ContainerError::CreateFailed(message));
        }
        inner.next_id += 1;
        let id = format!("fake-{}", inner.next_id);
        inner.containers.insert(
            id.clone(),
            FakeContainer {
                spec: spec.clone(),
                started: false,
                stopped: false,
                removed: false,
            },
        );
        Ok(id)
    }

    async fn start(&self, id: &str) -> Result<(), ContainerError> {
        self.inner
            .lock()
            .calls
            .push(ContainerCall::Start { id: id.to_string() });
        self.with_container(id, |c| c.started = true)
    }

    async fn wait(&self, id: &str) -> Result<i64, ContainerError> {
        let mut inner = self.inner.lock();
        inner.calls.push(ContainerCall::Wait { id: id.to_string() });
        if let Some(message) = inner.wait_error.clone() {
            return Err(ContainerError::WaitFailed(message));
        }
        Ok(inner.exit_code)
    }

    async fn logs(&self, id: &str) -> Result<String, ContainerError> {
        let mut inner = self.inner.lock();
        inner.calls.push(ContainerCall::Logs { id: id.to_string() });
        Ok(inner.logs.iter().map(|l| format!("{}\n", l)).collect())
    }

    async fn follow_logs(
        &self,
        id: &str,
        tail: u32,
        sink: LogSink,
    ) -> Result<(), ContainerError> {
        let lines = {
            let mut inner = self.inner.lock();
            inner.calls.push(ContainerCall::FollowLogs {
                id: id.to_string(),
                tail,
            });
            inner.logs.clone()
        };
        for line in &lines {
            (*sink)(LogStream::Stdout, line);
        }
        Ok(())
    }

    async fn stop(&self, id: &str, grace: Duration) -> Result<(), ContainerError> {
        self.inner.lock().calls.push(ContainerCall::Stop {
            id: id.to_string(),
            grace,
        });
        self.with_container(id, |c| c.stopped = true)
    }

    async fn remove(&self, id: &str) -> Result<(), ContainerError> {
        let error = {
            let mut inner = self.inner.lock();
            inner.calls.push(ContainerCall::Remove { id: id.to_string() });
            inner.remove_error.clone()
        };
        if let Some(message) = error {
            return Err(ContainerError::CommandFailed(message));
        }
        self.with_container(id, |c| c.removed = true)
    }
}

#[cfg(test)]
#[path = "fake_tests.rs"]
mod tests;
