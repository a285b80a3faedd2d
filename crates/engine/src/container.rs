// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Container orchestration: mount planning, launch and completion handling

use crate::context::ExecutionContext;
use crate::env::{
    CONFIG_DIR_NAME, CONTAINER_BIN_DIR, CONTAINER_HOME, CONTAINER_VEXEC, CONTAINER_WORKDIR,
    LOG_TAIL_LINES, UNFORWARDED_ENV,
};
use crate::error::EngineError;
use crate::job::Engine;
use std::collections::HashSet;
use std::path::{Component, Path, PathBuf};
use std::sync::Arc;
use vc_adapters::{BindMount, ContainerAdapter, ContainerSpec, LogSink, LogStream};
use vc_core::{ArtifactSpec, Job};

/// Deduplicated list of bind mounts for one container.
///
/// A mount is refused when its source is already mounted, or when its target
/// equals or lies under a target that is already claimed.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct MountPlan {
    mounts: Vec<BindMount>,
    sources: HashSet<PathBuf>,
}

impl MountPlan {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a mount unless it collides with one already planned. Returns
    /// whether it was added.
    pub fn claim(&mut self, source: impl Into<PathBuf>, target: impl Into<PathBuf>) -> bool {
        let (source, target) = (source.into(), target.into());
        if self.sources.contains(&source) {
            tracing::debug!(source = %source.display(), "source already mounted");
            return false;
        }
        if let Some(existing) = self.mounts.iter().find(|m| target.starts_with(&m.target)) {
            tracing::debug!(
                target = %target.display(),
                claimed_by = %existing.target.display(),
                "target already claimed"
            );
            return false;
        }
        self.sources.insert(source.clone());
        self.mounts.push(BindMount::new(source, target));
        true
    }

    pub fn is_source_claimed(&self, source: &Path) -> bool {
        self.sources.contains(source)
    }

    pub fn mounts(&self) -> &[BindMount] {
        &self.mounts
    }

    pub fn into_mounts(self) -> Vec<BindMount> {
        self.mounts
    }
}

/// Compute the bind mounts for running `job` in a container.
///
/// Order: configuration directory, artifacts, top-level entries of the
/// job's base directory, then toolchain and plugin executables.
pub fn build_mount_plan(ctx: &ExecutionContext, job: &Job) -> Result<MountPlan, EngineError> {
    let mut plan = MountPlan::new();
    let workdir = Path::new(CONTAINER_WORKDIR);
    let config_dir = ctx.config_dir();

    plan.claim(&config_dir, workdir.join(CONFIG_DIR_NAME));

    for artifact in &job.artifacts {
        let source = artifact_source(ctx, artifact)?;
        if !source.exists() {
            tracing::info!(path = %source.display(), "creating artifact directory");
            std::fs::create_dir_all(&source).map_err(|e| EngineError::io(&source, e))?;
        }
        plan.claim(source, artifact_target(artifact));
    }

    let base = ctx.project_root.join(&job.base_dir);
    let base_target = clean_join(workdir, &job.base_dir);
    for entry in sorted_entries(&base)? {
        let Some(name) = entry.file_name() else {
            continue;
        };
        if name == CONFIG_DIR_NAME || entry == config_dir || plan.is_source_claimed(&entry) {
            continue;
        }
        plan.claim(&entry, base_target.join(name));
    }

    for (kind, dir) in [("toolchain", &ctx.toolchain_dir), ("plugin", &ctx.plugin_dir)] {
        let Some(dir) = dir else {
            continue;
        };
        if !dir.is_dir() {
            return Err(EngineError::MissingDir {
                kind,
                path: dir.clone(),
            });
        }
        for file in sorted_entries(dir)?.into_iter().filter(|p| p.is_file()) {
            if let Some(name) = file.file_name() {
                let target = Path::new(CONTAINER_BIN_DIR).join(name);
                plan.claim(&file, target);
            }
        }
    }

    Ok(plan)
}

fn artifact_source(ctx: &ExecutionContext, artifact: &ArtifactSpec) -> Result<PathBuf, EngineError> {
    if let Some(rest) = strip_tilde(&artifact.host) {
        let home = ctx
            .home_dir
            .as_ref()
            .ok_or_else(|| EngineError::NoHome(artifact.host.clone()))?;
        return Ok(home.join(rest));
    }
    Ok(ctx.project_root.join(&artifact.host))
}

fn artifact_target(artifact: &ArtifactSpec) -> PathBuf {
    let target = artifact.container.as_str();
    if let Some(rest) = strip_tilde(target) {
        return Path::new(CONTAINER_HOME).join(rest);
    }
    if target.starts_with('/') {
        return PathBuf::from(target);
    }
    clean_join(Path::new(CONTAINER_WORKDIR), Path::new(target))
}

/// `~` or `~/rest` -> `rest` (empty for a bare `~`).
fn strip_tilde(path: &str) -> Option<&str> {
    match path.strip_prefix('~')? {
        "" => Some(""),
        rest => rest.strip_prefix('/'),
    }
}

/// Join without `.` components so `/workdir` + `.` stays `/workdir`.
fn clean_join(base: &Path, rel: &Path) -> PathBuf {
    let mut out = base.to_path_buf();
    for component in rel.components() {
        match component {
            Component::CurDir => {}
            other => out.push(other),
        }
    }
    out
}

fn sorted_entries(dir: &Path) -> Result<Vec<PathBuf>, EngineError> {
    let entries = std::fs::read_dir(dir).map_err(|e| EngineError::io(dir, e))?;
    let mut paths = entries
        .map(|entry| entry.map(|e| e.path()))
        .collect::<Result<Vec<_>, _>>()
        .map_err(|e| EngineError::io(dir, e))?;
    paths.sort();
    Ok(paths)
}

/// Host environment to pass into a job container.
pub fn forwarded_env() -> Vec<(String, String)> {
    std::env::vars()
        .filter(|(key, _)| !UNFORWARDED_ENV.contains(&key.as_str()))
        .collect()
}

/// Docker container names allow `[a-zA-Z0-9_.-]`.
fn container_name(job: &Job) -> String {
    let slug: String = job
        .id
        .as_str()
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '_' | '.' | '-') {
                c
            } else {
                '-'
            }
        })
        .collect();
    let suffix = uuid::Uuid::new_v4().simple().to_string();
    format!("vulcan-{}-{}", slug, &suffix[..8])
}

impl<C: ContainerAdapter> Engine<C> {
    /// Container spec that re-enters the engine inside `image` for `job`.
    pub fn container_spec(&self, job: &Job, image: &str) -> Result<ContainerSpec, EngineError> {
        let ctx = &self.ctx;
        let plan = build_mount_plan(ctx, job)?;
        let config_name = ctx.config_file.file_name().ok_or_else(|| {
            let reason = std::io::Error::new(std::io::ErrorKind::InvalidInput, "not a file path");
            EngineError::io(&ctx.config_file, reason)
        })?;
        let config_path = Path::new(CONTAINER_WORKDIR)
            .join(CONFIG_DIR_NAME)
            .join(config_name);

        Ok(ContainerSpec {
            name: Some(container_name(job)),
            image: image.to_string(),
            workdir: CONTAINER_WORKDIR.to_string(),
            command: vec![
                CONTAINER_VEXEC.to_string(),
                "--config".to_string(),
                config_path.display().to_string(),
                "--job-id".to_string(),
                job.id.to_string(),
            ],
            env: ctx.env_override.clone().unwrap_or_else(forwarded_env),
            mounts: plan.into_mounts(),
            extra_hosts: job
                .hosts
                .iter()
                .map(|(host, ip)| (host.clone(), ip.clone()))
                .collect(),
        })
    }

    /// Run `job` inside a container started from `image`.
    ///
    /// The container is removed afterwards whatever the outcome; a failed
    /// removal is only logged.
    pub async fn run_containerized(&self, job: &Job, image: &str) -> Result<(), EngineError> {
        let spec = self.container_spec(job, image)?;
        tracing::info!(
            job = %job.id,
            image,
            mounts = spec.mounts.len(),
            "launching container"
        );
        let id = self.containers.create(&spec).await?;
        let result = self.complete(&id, image).await;
        if let Err(e) = self.containers.remove(&id).await {
            tracing::warn!(container = %id, error = %e, "failed to remove container");
        }
        result
    }

    async fn complete(&self, id: &str, image: &str) -> Result<(), EngineError> {
        self.containers.start(id).await?;

        if self.ctx.verbose {
            let sink: LogSink = Arc::new(|stream: LogStream, line: &str| match stream {
                LogStream::Stdout => tracing::info!(target: "container", "{}", line),
                LogStream::Stderr => tracing::warn!(target: "container", "{}", line),
            });
            if let Err(e) = self.containers.follow_logs(id, LOG_TAIL_LINES, sink).await {
                tracing::warn!(container = id, error = %e, "log stream failed");
            }
        }

        let code = match self.containers.wait(id).await {
            Ok(code) => code,
            Err(e) => {
                let grace = crate::env::stop_grace();
                tracing::error!(container = id, error = %e, "wait failed, stopping container");
                if let Err(stop_err) = self.containers.stop(id, grace).await {
                    tracing::warn!(container = id, error = %stop_err, "forced stop failed");
                }
                return Err(e.into());
            }
        };

        if code == 0 {
            tracing::info!(container = id, "container succeeded");
            return Ok(());
        }

        let logs = if self.ctx.verbose {
            None
        } else {
            match self.containers.logs(id).await {
                Ok(text) => Some(text),
                Err(e) => {
                    tracing::warn!(container = id, error = %e, "failed to fetch logs");
                    None
                }
            }
        };
        Err(EngineError::ContainerExit {
            image: image.to_string(),
            code,
            logs,
        })
    }
}

#[cfg(test)]
#[path = "container_tests.rs"]
mod tests;
