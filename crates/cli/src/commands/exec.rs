// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `vexec --config <path> --job-id <id>` - run one job in this process
//!
//! This is the re-entry point inside job containers: the project file is
//! mounted under `/workdir/.vulcan` and the job runs locally whatever its
//! `run-on` says.

use crate::env::current_dir;
use anyhow::{anyhow, bail, Result};
use clap::Parser;
use std::path::{Path, PathBuf};
use vc_adapters::DockerAdapter;
use vc_engine::env::CONFIG_DIR_NAME;
use vc_engine::{Engine, ExecutionContext};
use vc_runbook::ParseError;

#[derive(Parser, Debug)]
#[command(name = "vexec", version, about = "Run one Vulcan job in-process")]
pub struct ExecArgs {
    /// Project file to load
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Job to run
    #[arg(long = "job-id", value_name = "ID")]
    pub job_id: Option<String>,

    /// Debug logging
    #[arg(short, long)]
    pub verbose: bool,
}

pub async fn handle(args: ExecArgs) -> Result<()> {
    let Some(config) = args.config.filter(|p| !p.as_os_str().is_empty()) else {
        bail!("path of config file is missing");
    };
    let Some(job_id) = args.job_id.filter(|id| !id.trim().is_empty()) else {
        bail!("job id is missing");
    };

    let project = vc_runbook::load_project(&config)?;
    let job = project
        .job(job_id.trim())
        .ok_or_else(|| anyhow!(ParseError::UnknownJob(job_id.clone())))?;

    let project_root = match project_root_of(&config) {
        Some(root) => root,
        None => current_dir()?,
    };
    let ctx = ExecutionContext::new(project_root, &config).with_verbose(args.verbose);
    let engine = Engine::new(ctx, DockerAdapter::new());
    engine.run_job_local(job).await?;
    Ok(())
}

/// `<root>/.vulcan/<file>` -> `<root>`
fn project_root_of(config: &Path) -> Option<PathBuf> {
    let dir = config.parent()?;
    if dir.file_name()? != CONFIG_DIR_NAME {
        return None;
    }
    let root = dir.parent()?;
    if root.as_os_str().is_empty() {
        return None;
    }
    Some(root.to_path_buf())
}
