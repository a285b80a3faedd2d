// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! Shared plumbing for the `vulcan`, `vexec` and `vset` binaries

pub mod commands;
mod env;
mod logging;

pub use logging::init_logging;

/// Print an error the way every binary reports failure and exit 1.
pub fn exit_with(err: anyhow::Error) -> ! {
    let msg = format_error(&err);
    if !msg.is_empty() {
        eprintln!("Error: {}", msg);
    }
    std::process::exit(1);
}

/// Format an anyhow error, deduplicating the chain.
///
/// When the top-level message already contains every cause (common with
/// thiserror `{source}` interpolation) only the top line is shown.
pub fn format_error(err: &anyhow::Error) -> String {
    let top = err.to_string();
    let chain_redundant = err
        .chain()
        .skip(1)
        .all(|cause| top.contains(&cause.to_string()));
    if chain_redundant {
        return top;
    }

    let mut buf = top;
    for (i, cause) in err.chain().skip(1).enumerate() {
        buf.push_str(&format!("\n\nCaused by:\n    {}: {}", i, cause));
    }
    buf
}

#[cfg(test)]
#[path = "lib_tests.rs"]
mod tests;
