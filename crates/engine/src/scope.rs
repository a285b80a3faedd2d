// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Per-step variable scope

use vc_core::{ArgsMap, Step};
use vc_runbook::expand_value;

/// Merge the variables visible to `step`.
///
/// `global` holds the job's default arguments and every output produced so
/// far. The step's own `args` override it, and `with` overrides both. Step
/// values are expanded against the process environment on the way in.
pub fn build_scope(global: &ArgsMap, step: &Step) -> ArgsMap {
    let mut scope = global.clone();
    for (key, value) in step.args.iter().chain(step.with.iter()) {
        scope.insert(key.clone(), expand_value(value));
    }
    scope
}

#[cfg(test)]
#[path = "scope_tests.rs"]
mod tests;
