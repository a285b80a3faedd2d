// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `vulcan --action <name>` - run the jobs of a project file on this host

use crate::env::{apply_env, current_dir, resolve_tool_dir, ToolDir};
use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;
use vc_adapters::{DockerAdapter, TracedContainer};
use vc_engine::env::CONFIG_DIR_NAME;
use vc_engine::{Engine, ExecutionContext};

#[derive(Parser, Debug)]
#[command(name = "vulcan", version, about = "Vulcan - build and CI job runner")]
pub struct RunArgs {
    /// Project file to load from .vulcan/ (name without extension)
    #[arg(short, long)]
    pub action: String,

    /// Run only this job (default: every job, in declared order)
    #[arg(short, long)]
    pub job: Option<String>,

    /// Directory of toolchain executables
    #[arg(long, value_name = "DIR")]
    pub toolchain: Option<PathBuf>,

    /// Directory of plugin executables
    #[arg(long, value_name = "DIR")]
    pub plugin: Option<PathBuf>,

    /// Debug logging and live container output
    #[arg(short, long)]
    pub verbose: bool,

    /// Set an environment variable before loading the project
    #[arg(short, long = "env", value_name = "KEY=VALUE")]
    pub env: Vec<String>,

    /// Load environment variables from a file
    #[arg(long, value_name = "PATH")]
    pub env_file: Option<PathBuf>,
}

pub async fn handle(args: RunArgs) -> Result<()> {
    apply_env(args.env_file.as_deref(), &args.env)?;

    let project_root = current_dir()?;
    let (config_file, project) =
        vc_runbook::load_action(&project_root.join(CONFIG_DIR_NAME), &args.action)?;
    let jobs = project.select(args.job.as_deref())?;

    let ctx = ExecutionContext::new(&project_root, config_file)
        .with_toolchain_dir(resolve_tool_dir(args.toolchain, ToolDir::Toolchains))
        .with_plugin_dir(resolve_tool_dir(args.plugin, ToolDir::Plugins))
        .with_verbose(args.verbose);
    tracing::debug!(
        project = %project.name,
        jobs = jobs.len(),
        toolchain = ?ctx.toolchain_dir,
        plugin = ?ctx.plugin_dir,
        "running project"
    );

    let engine = Engine::new(ctx, TracedContainer::new(DockerAdapter::new()));
    engine.run_jobs(&jobs).await?;
    Ok(())
}

#[cfg(test)]
#[path = "run_tests.rs"]
mod tests;
