// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Jobs, steps and their execution modes.

use crate::artifact::ArtifactSpec;
use crate::error::ConfigError;
use crate::id::{JobId, StepId};
use indexmap::IndexMap;
use std::fmt;
use std::path::PathBuf;

/// String-to-string argument map. Declaration order is preserved so that
/// synthesized plugin lines are stable.
pub type ArgsMap = IndexMap<String, String>;

/// Where a job's steps execute.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum JobTarget {
    /// Directly on the invoking host.
    Local,
    /// Inside a container started from `image`.
    Container { image: String },
}

impl JobTarget {
    /// Map a `run-on` value to a target: blank means local.
    pub fn from_run_on(run_on: &str) -> Self {
        let image = run_on.trim();
        if image.is_empty() {
            JobTarget::Local
        } else {
            JobTarget::Container {
                image: image.to_string(),
            }
        }
    }
}

impl fmt::Display for JobTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            JobTarget::Local => write!(f, "local"),
            JobTarget::Container { image } => write!(f, "container({})", image),
        }
    }
}

/// A named, ordered sequence of steps.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Job {
    pub id: JobId,
    pub name: String,
    pub target: JobTarget,
    /// Relative to the project root; `.` when unset.
    pub base_dir: PathBuf,
    pub artifacts: Vec<ArtifactSpec>,
    /// Extra host name to IP mappings for containerized runs.
    pub hosts: IndexMap<String, String>,
    /// Job-scoped default arguments, visible to every step.
    pub args: ArgsMap,
    pub steps: Vec<Step>,
}

impl Job {
    pub fn new(id: impl Into<JobId>) -> Self {
        let id = id.into();
        Self {
            name: id.to_string(),
            id,
            target: JobTarget::Local,
            base_dir: PathBuf::from("."),
            artifacts: Vec::new(),
            hosts: IndexMap::new(),
            args: ArgsMap::new(),
            steps: Vec::new(),
        }
    }

    pub fn is_containerized(&self) -> bool {
        matches!(self.target, JobTarget::Container { .. })
    }
}

/// One unit of work inside a job: inline shell text or a plugin invocation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Step {
    pub id: Option<StepId>,
    pub name: String,
    /// Newline-separated command lines.
    pub run: Option<String>,
    /// Plugin executable name.
    pub uses: Option<String>,
    pub args: ArgsMap,
    /// Plugin arguments.
    pub with: ArgsMap,
}

/// Resolved execution mode of a step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StepAction {
    /// Each non-blank line is rendered, tokenized and executed in order.
    Shell { lines: Vec<String> },
    /// A single `<name> --k=v ...` invocation built from `with`.
    Plugin { name: String, with: ArgsMap },
}

impl Step {
    /// Display label for logs and errors: the name, else the id.
    pub fn label(&self) -> &str {
        if !self.name.trim().is_empty() {
            &self.name
        } else if let Some(id) = &self.id {
            id.as_str()
        } else {
            "<unnamed>"
        }
    }

    /// Resolve the execution mode. Exactly one of `run`/`use` must be
    /// non-blank.
    pub fn action(&self, job: &JobId) -> Result<StepAction, ConfigError> {
        let run = self.run.as_deref().map(str::trim).unwrap_or_default();
        let uses = self.uses.as_deref().map(str::trim).unwrap_or_default();
        match (run.is_empty(), uses.is_empty()) {
            (false, true) => Ok(StepAction::Shell {
                lines: run
                    .lines()
                    .map(str::trim)
                    .filter(|l| !l.is_empty())
                    .map(String::from)
                    .collect(),
            }),
            (true, false) => Ok(StepAction::Plugin {
                name: uses.to_string(),
                with: self.with.clone(),
            }),
            (true, true) => Err(ConfigError::MissingAction {
                job: job.to_string(),
                step: self.label().to_string(),
            }),
            (false, false) => Err(ConfigError::ConflictingAction {
                job: job.to_string(),
                step: self.label().to_string(),
            }),
        }
    }
}

impl StepAction {
    /// The command lines this action renders, in execution order.
    pub fn lines(&self) -> Vec<String> {
        match self {
            StepAction::Shell { lines } => lines.clone(),
            StepAction::Plugin { name, with } => vec![plugin_line(name, with)],
        }
    }
}

/// Build `<plugin> --k1=v1 --k2=v2 ...` from a plugin name and its arguments.
///
/// Values are quoted as needed so the line tokenizes back to the same
/// words. The one exception is a value that needs quotes and ends in `\`:
/// a backslash before the closing quote escapes it. The step runner launches
/// plugins from [`plugin_argv`] and uses this line for display.
pub fn plugin_line(name: &str, with: &ArgsMap) -> String {
    let mut line = name.to_string();
    for (key, value) in with {
        line.push_str(" --");
        line.push_str(key);
        line.push('=');
        line.push_str(&quote_value(value));
    }
    line
}

/// Process arguments for a plugin call: `[name, --k1, v1, --k2, v2, ...]`.
pub fn plugin_argv(name: &str, with: &ArgsMap) -> Vec<String> {
    let mut argv = Vec::with_capacity(1 + with.len() * 2);
    argv.push(name.to_string());
    for (key, value) in with {
        argv.push(format!("--{}", key));
        argv.push(value.clone());
    }
    argv
}

/// A quote is only closed by its own kind, and a backslash directly before
/// that kind makes it literal.
fn quote_value(value: &str) -> String {
    let needs_quotes = value.contains(char::is_whitespace) || value.contains(['\'', '"']);
    if !needs_quotes {
        value.to_string()
    } else if !value.contains('"') {
        format!("\"{}\"", value)
    } else if !value.contains('\'') {
        format!("'{}'", value)
    } else {
        format!("\"{}\"", value.replace('"', "\\\""))
    }
}

#[cfg(test)]
#[path = "job_tests.rs"]
mod tests;
