// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Traced adapter wrapper for consistent observability

use crate::container::{ContainerAdapter, ContainerError, ContainerSpec, LogSink};
use async_trait::async_trait;
use std::time::{Duration, Instant};
use tracing::Instrument;

/// Wrapper that adds tracing to any ContainerAdapter
#[derive(Clone)]
pub struct TracedContainer<C> {
    inner: C,
}

impl<C> TracedContainer<C> {
    pub fn new(inner: C) -> Self {
        Self { inner }
    }

    pub fn inner(&self) -> &C {
        &self.inner
    }
}

#[async_trait]
impl<C: ContainerAdapter> ContainerAdapter for TracedContainer<C> {
    async fn create(&self, spec: &ContainerSpec) -> Result<String, ContainerError> {
        async {
            tracing::info!(
                mounts = spec.mounts.len(),
                env_count = spec.env.len(),
                "creating"
            );
            let start = Instant::now();
            let result = self.inner.create(spec).await;
            let elapsed_ms = start.elapsed().as_millis() as u64;
            match &result {
                Ok(id) => tracing::info!(container_id = id.as_str(), elapsed_ms, "created"),
                Err(e) => tracing::error!(elapsed_ms, error = %e, "create failed"),
            }
            result
        }
        .instrument(tracing::info_span!("container.create", image = %spec.image))
        .await
    }

    async fn start(&self, id: &str) -> Result<(), ContainerError> {
        let result = self.inner.start(id).await;
        match &result {
            Ok(()) => tracing::info!(id, "container started"),
            Err(e) => tracing::error!(id, error = %e, "start failed"),
        }
        result
    }

    async fn wait(&self, id: &str) -> Result<i64, ContainerError> {
        let start = Instant::now();
        let result = self.inner.wait(id).await;
        let elapsed_ms = start.elapsed().as_millis() as u64;
        tracing::info_span!("container.wait", id).in_scope(|| match &result {
            Ok(code) => tracing::info!(exit_code = code, elapsed_ms, "exited"),
            Err(e) => tracing::error!(elapsed_ms, error = %e, "wait failed"),
        });
        result
    }

    async fn logs(&self, id: &str) -> Result<String, ContainerError> {
        let result = self.inner.logs(id).await;
        tracing::debug!(id, captured_len = result.as_ref().map(|s| s.len()).ok(), "logs fetched");
        result
    }

    async fn follow_logs(
        &self,
        id: &str,
        tail: u32,
        sink: LogSink,
    ) -> Result<(), ContainerError> {
        let result = self.inner.follow_logs(id, tail, sink).await;
        if let Err(ref e) = result {
            tracing::warn!(id, error = %e, "log stream ended with error");
        }
        result
    }

    async fn stop(&self, id: &str, grace: Duration) -> Result<(), ContainerError> {
        let result = self.inner.stop(id, grace).await;
        tracing::info_span!("container.stop", id).in_scope(|| match &result {
            Ok(()) => tracing::info!(grace_secs = grace.as_secs(), "stopped"),
            Err(e) => tracing::warn!(error = %e, "stop failed"),
        });
        result
    }

    async fn remove(&self, id: &str) -> Result<(), ContainerError> {
        let result = self.inner.remove(id).await;
        match &result {
            Ok(()) => tracing::debug!(id, "container removed"),
            Err(e) => tracing::warn!(id, error = %e, "remove failed"),
        }
        result
    }
}
