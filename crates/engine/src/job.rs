// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Job runner

use crate::context::ExecutionContext;
use crate::error::EngineError;
use crate::scope::build_scope;
use crate::step::run_step;
use std::time::Instant;
use tracing::Instrument;
use vc_adapters::ContainerAdapter;
use vc_core::{output_key, ArgsMap, Job, JobTarget};
use vc_runbook::expand_args;

/// Runs jobs against one execution context and container runtime
pub struct Engine<C> {
    pub(crate) ctx: ExecutionContext,
    pub(crate) containers: C,
}

impl<C: ContainerAdapter> Engine<C> {
    pub fn new(ctx: ExecutionContext, containers: C) -> Self {
        Self { ctx, containers }
    }

    pub fn context(&self) -> &ExecutionContext {
        &self.ctx
    }

    /// Run jobs one after another, stopping at the first failure.
    pub async fn run_jobs(&self, jobs: &[&Job]) -> Result<(), EngineError> {
        for job in jobs {
            self.run_job(job).await?;
        }
        Ok(())
    }

    /// Run a job on its configured target.
    pub async fn run_job(&self, job: &Job) -> Result<(), EngineError> {
        match &job.target {
            JobTarget::Local => self.run_job_local(job).await,
            JobTarget::Container { image } => {
                self.run_containerized(job, image)
                    .await
                    .map_err(|e| EngineError::JobFailed {
                        job: job.id.to_string(),
                        source: Box::new(e),
                    })
            }
        }
    }

    /// Run a job's steps in this process, ignoring `run-on`.
    ///
    /// Each step sees the job's arguments plus every output produced by the
    /// steps before it.
    pub async fn run_job_local(&self, job: &Job) -> Result<(), EngineError> {
        self.run_steps(job)
            .instrument(tracing::info_span!("job", job = %job.id))
            .await
    }

    async fn run_steps(&self, job: &Job) -> Result<(), EngineError> {
        tracing::info!(name = %job.name, steps = job.steps.len(), "starting");
        let start = Instant::now();

        self.ctx.store_call(|store| store.reset()).await?;
        let mut global: ArgsMap = job.args.clone();
        expand_args(&mut global);

        for step in &job.steps {
            let scope = build_scope(&global, step);
            let wrap = |e: EngineError| EngineError::StepFailed {
                job: job.id.to_string(),
                step: step.label().to_string(),
                source: Box::new(e),
            };
            tracing::info!(step = step.label(), "step started");

            let outputs = run_step(&self.ctx, &job.id, step, &scope)
                .await
                .map_err(wrap)?;
            if let Some(id) = &step.id {
                for record in outputs {
                    global.insert(output_key(id.as_str(), &record.key), record.value);
                }
            }
            let all = self
                .ctx
                .store_call(|store| store.get_all_outputs())
                .await
                .map_err(wrap)?;
            global.extend(all);
            tracing::info!(step = step.label(), "step completed");
        }

        tracing::info!(
            elapsed_ms = start.elapsed().as_millis() as u64,
            "completed"
        );
        Ok(())
    }
}

#[cfg(test)]
#[path = "job_tests.rs"]
mod tests;
