// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Step runner: render, tokenize and execute one step's command lines
//!
//! Shell lines go through the tokenizer; plugin calls are built as an
//! argument vector directly from the `with` map.

use crate::context::ExecutionContext;
use crate::env::{OUTPUT_STORE_ENV, STATE_DIR_ENV, STEP_OUTPUT_ENV};
use crate::error::EngineError;
use std::path::{Path, PathBuf};
use std::process::Stdio;
use std::time::Instant;
use tokio::process::Command;
use vc_core::{parse_pair, plugin_argv, plugin_line, ArgsMap, JobId, OutputRecord, Step, StepAction};
use vc_runbook::render;

/// Run one step with its merged scope.
///
/// Returns the outputs the store attributes to the step afterwards (keys
/// without the `steps_<id>_outputs_` prefix). Steps without an id produce
/// none.
pub async fn run_step(
    ctx: &ExecutionContext,
    job: &JobId,
    step: &Step,
    scope: &ArgsMap,
) -> Result<Vec<OutputRecord>, EngineError> {
    let action = step.action(job)?;

    let output_file = match &step.id {
        Some(id) => {
            let current = id.to_string();
            ctx.store_call(move |store| store.set_current_step(&current))
                .await?;
            Some(prepare_output_file(&ctx.step_output_file(id.as_str()))?)
        }
        None => {
            ctx.store_call(|store| store.clear_current_step()).await?;
            None
        }
    };

    match action {
        StepAction::Shell { lines } => {
            for line in lines {
                let rendered = render_line(&line, scope)?;
                let args = vc_shell::argv(&rendered).map_err(|source| EngineError::Tokenize {
                    line: rendered.clone(),
                    source,
                })?;
                execute(ctx, &rendered, &args, output_file.as_deref()).await?;
            }
        }
        // `with` values come from the scope so environment expansion applies.
        // Each value is rendered on its own and passed as one argument, so
        // quotes inside a value never reach the tokenizer.
        StepAction::Plugin { name, with } => {
            let declared = plugin_line(&name, &with);
            let name = render_line(&name, scope)?;
            let mut rendered = ArgsMap::new();
            for (key, raw) in with {
                let value = scope.get(&key).cloned().unwrap_or(raw);
                let value = render(&value, scope).map_err(|source| EngineError::Template {
                    line: declared.clone(),
                    source,
                })?;
                rendered.insert(key, value);
            }
            let args = plugin_argv(&name, &rendered);
            execute(ctx, &plugin_line(&name, &rendered), &args, output_file.as_deref()).await?;
        }
    }

    let (Some(id), Some(file)) = (&step.id, &output_file) else {
        return Ok(Vec::new());
    };
    let ingested = ingest_output_file(ctx, file).await?;
    let step_id = id.to_string();
    let outputs = ctx
        .store_call(move |store| store.outputs_for_step(&step_id))
        .await?;
    tracing::debug!(step = %id, ingested, outputs = outputs.len(), "outputs collected");
    Ok(outputs)
}

fn render_line(line: &str, scope: &ArgsMap) -> Result<String, EngineError> {
    render(line, scope).map_err(|source| EngineError::Template {
        line: line.to_string(),
        source,
    })
}

/// Create (or truncate) the step output file.
fn prepare_output_file(path: &Path) -> Result<PathBuf, EngineError> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(|e| EngineError::io(parent, e))?;
    }
    std::fs::write(path, "").map_err(|e| EngineError::io(path, e))?;
    Ok(path.to_path_buf())
}

/// Copy `key=value` lines from the step output file into the store.
async fn ingest_output_file(ctx: &ExecutionContext, path: &Path) -> Result<usize, EngineError> {
    let content = match std::fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(0),
        Err(e) => return Err(EngineError::io(path, e)),
    };
    let records = content
        .lines()
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .map(parse_pair)
        .collect::<Result<Vec<_>, _>>()?;
    let count = records.len();
    ctx.store_call(move |store| {
        for record in &records {
            store.set_output(&record.key, &record.value)?;
        }
        Ok(())
    })
    .await?;
    Ok(count)
}

/// Launch one process and wait for it. No shell, no timeout.
async fn execute(
    ctx: &ExecutionContext,
    line: &str,
    args: &[String],
    output_file: Option<&Path>,
) -> Result<(), EngineError> {
    let mut rest = args.iter().skip_while(|a| a.trim().is_empty());
    let Some(program) = rest.next() else {
        return Err(EngineError::EmptyCommand(line.to_string()));
    };

    let mut cmd = Command::new(program);
    cmd.args(rest)
        .current_dir(&ctx.workdir)
        .stdin(Stdio::inherit())
        .stdout(Stdio::inherit())
        .stderr(Stdio::inherit())
        .env(OUTPUT_STORE_ENV, ctx.store.path())
        .env(STATE_DIR_ENV, &ctx.state_dir);
    if let Some(path) = ctx.search_path() {
        cmd.env("PATH", path);
    }
    match output_file {
        Some(file) => cmd.env(STEP_OUTPUT_ENV, file),
        None => cmd.env_remove(STEP_OUTPUT_ENV),
    };

    tracing::info!(command = line, "running");
    let start = Instant::now();
    let status = cmd.status().await.map_err(|source| EngineError::Spawn {
        program: program.clone(),
        source,
    })?;
    let elapsed_ms = start.elapsed().as_millis() as u64;

    if !status.success() {
        tracing::error!(command = line, %status, elapsed_ms, "command failed");
        return Err(EngineError::Exit {
            command: line.to_string(),
            status: status.to_string(),
        });
    }
    tracing::debug!(command = line, elapsed_ms, "command completed");
    Ok(())
}

#[cfg(test)]
#[path = "step_tests.rs"]
mod tests;
