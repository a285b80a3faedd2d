// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Project file definitions and their conversion into runtime jobs

use crate::parser::ParseError;
use indexmap::IndexMap;
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::HashSet;
use std::path::PathBuf;
use vc_core::{is_identifier, ArgsMap, ArtifactSpec, Job, JobId, JobTarget, Step, StepId};

/// A project file as written. Unknown top-level keys (e.g. `on`) are ignored.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProjectDef {
    #[serde(default)]
    pub name: String,
    #[serde(default, alias = "job")]
    pub jobs: IndexMap<String, JobDef>,
}

/// A job as written under `jobs.<id>`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct JobDef {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub run_on: String,
    #[serde(default)]
    pub base_dir: Option<String>,
    /// Informational only.
    #[serde(default)]
    pub os: Option<String>,
    /// Informational only.
    #[serde(default)]
    pub arch: Option<String>,
    #[serde(default)]
    pub artifacts: Vec<String>,
    #[serde(default, deserialize_with = "scalar_map")]
    pub hosts: IndexMap<String, String>,
    #[serde(default, deserialize_with = "scalar_map")]
    pub args: ArgsMap,
    #[serde(default)]
    pub steps: Vec<StepDef>,
}

/// A step as written.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StepDef {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub run: Option<String>,
    #[serde(default, rename = "use")]
    pub uses: Option<String>,
    #[serde(default, deserialize_with = "scalar_map")]
    pub args: ArgsMap,
    #[serde(default, deserialize_with = "scalar_map")]
    pub with: ArgsMap,
}

/// Scalar map values are written as strings, numbers, booleans or nothing;
/// all of them are kept as their string form (nothing is empty).
#[derive(Deserialize)]
#[serde(untagged)]
enum Scalar {
    Str(String),
    Int(i64),
    Float(f64),
    Bool(bool),
}

impl From<Scalar> for String {
    fn from(s: Scalar) -> Self {
        match s {
            Scalar::Str(s) => s,
            Scalar::Int(i) => i.to_string(),
            Scalar::Float(f) => f.to_string(),
            Scalar::Bool(b) => b.to_string(),
        }
    }
}

fn scalar_map<'de, D>(deserializer: D) -> Result<IndexMap<String, String>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<IndexMap<String, Option<Scalar>>>::deserialize(deserializer)?;
    Ok(raw
        .unwrap_or_default()
        .into_iter()
        .map(|(k, v)| (k, v.map(String::from).unwrap_or_default()))
        .collect())
}

/// A validated project: every job converted, every step's mode resolvable.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Project {
    pub name: String,
    pub jobs: IndexMap<JobId, Job>,
}

impl Project {
    pub fn job(&self, id: &str) -> Option<&Job> {
        self.jobs.get(id)
    }

    /// Jobs to run: the named one, or all of them in declaration order.
    pub fn select(&self, id: Option<&str>) -> Result<Vec<&Job>, ParseError> {
        match id.map(str::trim).filter(|s| !s.is_empty()) {
            Some(id) => self
                .job(id)
                .map(|job| vec![job])
                .ok_or_else(|| ParseError::UnknownJob(id.to_string())),
            None => Ok(self.jobs.values().collect()),
        }
    }
}

impl TryFrom<ProjectDef> for Project {
    type Error = ParseError;

    fn try_from(def: ProjectDef) -> Result<Self, Self::Error> {
        let mut jobs = IndexMap::with_capacity(def.jobs.len());
        for (id, job) in def.jobs {
            let id = id.trim().to_string();
            if id.is_empty() {
                return Err(ParseError::InvalidFormat {
                    location: "jobs".to_string(),
                    message: "job id must not be empty".to_string(),
                });
            }
            let job = job.into_job(JobId::new(id.clone()))?;
            jobs.insert(JobId::new(id), job);
        }
        Ok(Project {
            name: def.name,
            jobs,
        })
    }
}

impl JobDef {
    /// Convert into a runtime [`Job`], validating artifacts and steps.
    pub fn into_job(self, id: JobId) -> Result<Job, ParseError> {
        let artifacts = self
            .artifacts
            .iter()
            .map(|a| ArtifactSpec::parse(a))
            .collect::<Result<Vec<_>, _>>()?;

        let mut seen = HashSet::new();
        let mut steps = Vec::with_capacity(self.steps.len());
        for (index, def) in self.steps.into_iter().enumerate() {
            let step = def.into_step();
            if let Some(step_id) = &step.id {
                // Ids name output files and template keys.
                if !is_identifier(step_id.as_str()) {
                    return Err(ParseError::InvalidFormat {
                        location: format!("job '{}' step {}", id, index + 1),
                        message: format!(
                            "step id '{}' must be letters, digits and underscores, not starting with a digit",
                            step_id
                        ),
                    });
                }
                if !seen.insert(step_id.clone()) {
                    return Err(ParseError::InvalidFormat {
                        location: format!("job '{}' step {}", id, index + 1),
                        message: format!("duplicate step id '{}'", step_id),
                    });
                }
            }
            step.action(&id)?;
            steps.push(step);
        }

        let base_dir = self
            .base_dir
            .map(|d| d.trim().to_string())
            .filter(|d| !d.is_empty())
            .unwrap_or_else(|| ".".to_string());
        if PathBuf::from(&base_dir).is_absolute() {
            return Err(ParseError::InvalidFormat {
                location: format!("job '{}'", id),
                message: format!("base-dir must be relative, got '{}'", base_dir),
            });
        }

        let name = if self.name.trim().is_empty() {
            id.to_string()
        } else {
            self.name
        };

        Ok(Job {
            id,
            name,
            target: JobTarget::from_run_on(&self.run_on),
            base_dir: PathBuf::from(base_dir),
            artifacts,
            hosts: self.hosts,
            args: self.args,
            steps,
        })
    }
}

impl StepDef {
    pub fn into_step(self) -> Step {
        Step {
            id: self
                .id
                .map(|id| id.trim().to_string())
                .filter(|id| !id.is_empty())
                .map(StepId::new),
            name: self.name,
            run: self.run,
            uses: self.uses,
            args: self.args,
            with: self.with,
        }
    }
}
