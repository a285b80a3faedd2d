// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Docker CLI container adapter

use super::{ContainerAdapter, ContainerError, ContainerSpec, LogSink, LogStream};
use crate::subprocess::{failure_detail, run_with_timeout};
use async_trait::async_trait;
use std::process::Stdio;
use std::time::Duration;
use tokio::io::{AsyncBufReadExt, AsyncRead, BufReader};
use tokio::process::Command;

/// Container adapter driving the `docker` command-line client
#[derive(Clone)]
pub struct DockerAdapter {
    bin: String,
    timeout: Duration,
    pull_timeout: Duration,
}

impl Default for DockerAdapter {
    fn default() -> Self {
        Self {
            bin: crate::env::docker_bin(),
            timeout: crate::env::docker_command_timeout(),
            pull_timeout: crate::env::docker_pull_timeout(),
        }
    }
}

impl DockerAdapter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Use a different client binary (e.g. `podman`).
    pub fn with_bin(mut self, bin: impl Into<String>) -> Self {
        self.bin = bin.into();
        self
    }

    /// Bound for short commands. Pulls use their own bound.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_pull_timeout(mut self, timeout: Duration) -> Self {
        self.pull_timeout = timeout;
        self
    }

    fn command(&self) -> Command {
        Command::new(&self.bin)
    }

    /// Run a short docker command, mapping a non-zero exit with `on_fail`.
    async fn run(
        &self,
        args: &[&str],
        description: &str,
        on_fail: fn(String) -> ContainerError,
    ) -> Result<std::process::Output, ContainerError> {
        self.run_within(args, self.timeout, description, on_fail)
            .await
    }

    async fn run_within(
        &self,
        args: &[&str],
        timeout: Duration,
        description: &str,
        on_fail: fn(String) -> ContainerError,
    ) -> Result<std::process::Output, ContainerError> {
        let mut cmd = self.command();
        cmd.args(args);
        let output = run_with_timeout(cmd, timeout, description)
            .await
            .map_err(on_fail)?;
        if !output.status.success() {
            let detail = failure_detail(&output);
            tracing::error!(description, detail = %detail, "docker command failed");
            if detail.contains("No such container") {
                let id = args.last().copied().unwrap_or_default();
                return Err(ContainerError::NotFound(id.to_string()));
            }
            return Err(on_fail(format!("{}: {}", description, detail)));
        }
        Ok(output)
    }

    /// Pull `image` unless it is already present, so `create` never pulls
    /// under the short command timeout.
    async fn ensure_image(&self, image: &str) -> Result<(), ContainerError> {
        let mut cmd = self.command();
        cmd.args(["image", "inspect", "--format", "{{.Id}}", image]);
        let present = matches!(
            run_with_timeout(cmd, self.timeout, "docker image inspect").await,
            Ok(output) if output.status.success()
        );
        if present {
            return Ok(());
        }
        tracing::info!(image, timeout_s = self.pull_timeout.as_secs(), "pulling image");
        self.run_within(
            &["pull", image],
            self.pull_timeout,
            "docker pull",
            ContainerError::CreateFailed,
        )
        .await
        .map(|_| ())
    }
}

/// `docker create` arguments for a spec (everything after `create`).
pub(crate) fn create_args(spec: &ContainerSpec) -> Vec<String> {
    let mut args = Vec::new();
    if let Some(name) = &spec.name {
        args.push("--name".to_string());
        args.push(name.clone());
    }
    if !spec.workdir.is_empty() {
        args.push("--workdir".to_string());
        args.push(spec.workdir.clone());
    }
    for (key, value) in &spec.env {
        args.push("--env".to_string());
        args.push(format!("{}={}", key, value));
    }
    for mount in &spec.mounts {
        args.push("--mount".to_string());
        args.push(format!(
            "type=bind,source={},target={}",
            mount.source.display(),
            mount.target.display()
        ));
    }
    for (host, ip) in &spec.extra_hosts {
        args.push("--add-host".to_string());
        args.push(format!("{}:{}", host, ip));
    }
    args.push(spec.image.clone());
    args.extend(spec.command.iter().cloned());
    args
}

async fn forward_lines<R>(reader: R, stream: LogStream, sink: LogSink)
where
    R: AsyncRead + Unpin,
{
    let mut lines = BufReader::new(reader).lines();
    while let Ok(Some(line)) = lines.next_line().await {
        (*sink)(stream, &line);
    }
}

#[async_trait]
impl ContainerAdapter for DockerAdapter {
    async fn create(&self, spec: &ContainerSpec) -> Result<String, ContainerError> {
        self.ensure_image(&spec.image).await?;
        let mut args = vec!["create".to_string()];
        args.extend(create_args(spec));
        let arg_refs: Vec<&str> = args.iter().map(String::as_str).collect();
        let output = self
            .run(&arg_refs, "docker create", ContainerError::CreateFailed)
            .await?;
        let id = String::from_utf8_lossy(&output.stdout).trim().to_string();
        if id.is_empty() {
            return Err(ContainerError::CreateFailed(
                "docker create: missing container id".to_string(),
            ));
        }
        Ok(id)
    }

    async fn start(&self, id: &str) -> Result<(), ContainerError> {
        self.run(&["start", id], "docker start", ContainerError::CommandFailed)
            .await
            .map(|_| ())
    }

    async fn wait(&self, id: &str) -> Result<i64, ContainerError> {
        let mut cmd = self.command();
        cmd.args(["wait", id]).kill_on_drop(true);
        let output = cmd
            .output()
            .await
            .map_err(|e| ContainerError::WaitFailed(format!("docker wait: {}", e)))?;
        if !output.status.success() {
            return Err(ContainerError::WaitFailed(failure_detail(&output)));
        }
        let text = String::from_utf8_lossy(&output.stdout);
        text.trim().parse::<i64>().map_err(|_| {
            ContainerError::WaitFailed(format!("unexpected docker wait output '{}'", text.trim()))
        })
    }

    async fn logs(&self, id: &str) -> Result<String, ContainerError> {
        let output = self
            .run(&["logs", id], "docker logs", ContainerError::CommandFailed)
            .await?;
        let mut text = String::from_utf8_lossy(&output.stdout).into_owned();
        text.push_str(&String::from_utf8_lossy(&output.stderr));
        Ok(text)
    }

    async fn follow_logs(
        &self,
        id: &str,
        tail: u32,
        sink: LogSink,
    ) -> Result<(), ContainerError> {
        let mut cmd = self.command();
        cmd.args(["logs", "--follow", "--tail", &tail.to_string(), id])
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true);
        let mut child = cmd
            .spawn()
            .map_err(|e| ContainerError::CommandFailed(format!("docker logs: {}", e)))?;

        let stdout = child.stdout.take();
        let stderr = child.stderr.take();
        let out_task = async {
            if let Some(out) = stdout {
                forward_lines(out, LogStream::Stdout, sink.clone()).await;
            }
        };
        let err_task = async {
            if let Some(err) = stderr {
                forward_lines(err, LogStream::Stderr, sink.clone()).await;
            }
        };
        tokio::join!(out_task, err_task);

        let status = child
            .wait()
            .await
            .map_err(|e| ContainerError::CommandFailed(format!("docker logs: {}", e)))?;
        if !status.success() {
            return Err(ContainerError::CommandFailed(format!(
                "docker logs --follow exited with {}",
                status
            )));
        }
        Ok(())
    }

    async fn stop(&self, id: &str, grace: Duration) -> Result<(), ContainerError> {
        let mut cmd = self.command();
        cmd.args(["stop", "--time", &grace.as_secs().to_string(), id]);
        let output = run_with_timeout(cmd, grace + self.timeout, "docker stop")
            .await
            .map_err(ContainerError::CommandFailed)?;
        if !output.status.success() {
            return Err(ContainerError::CommandFailed(format!(
                "docker stop: {}",
                failure_detail(&output)
            )));
        }
        Ok(())
    }

    async fn remove(&self, id: &str) -> Result<(), ContainerError> {
        self.run(&["rm", "--force", id], "docker rm", ContainerError::CommandFailed)
            .await
            .map(|_| ())
    }
}

#[cfg(test)]
#[path = "docker_tests.rs"]
mod tests;
