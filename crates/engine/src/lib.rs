// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! Vulcan execution engine: step and job runners plus container orchestration

mod container;
mod context;
pub mod env;
mod error;
mod job;
mod scope;
mod step;

pub use container::{build_mount_plan, forwarded_env, MountPlan};
pub use context::ExecutionContext;
pub use error::EngineError;
pub use job::Engine;
pub use scope::build_scope;
pub use step::run_step;
