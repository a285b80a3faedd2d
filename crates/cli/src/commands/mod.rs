// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! CLI command implementations, one per binary

pub mod exec;
pub mod run;
pub mod set;
