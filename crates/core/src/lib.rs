// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! vc-core: job, step and output types shared by the Vulcan crates

pub mod artifact;
mod error;
pub mod id;
pub mod job;
pub mod output;

pub use artifact::ArtifactSpec;
pub use error::ConfigError;
pub use id::{JobId, StepId};
pub use job::{plugin_argv, plugin_line, ArgsMap, Job, JobTarget, Step, StepAction};
pub use output::{is_identifier, output_key, output_prefix, parse_pair, OutputRecord};
