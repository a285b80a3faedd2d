// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `vset --kv key=value` - publish outputs of the running step

use anyhow::Result;
use clap::Parser;
use vc_core::{parse_pair, OutputRecord};
use vc_storage::OutputStore;

#[derive(Parser, Debug)]
#[command(name = "vset", version, about = "Set outputs of the current Vulcan step")]
pub struct SetArgs {
    /// Output to set (repeatable)
    #[arg(long = "kv", value_name = "KEY=VALUE", required = true)]
    pub kv: Vec<String>,
}

pub fn handle(args: SetArgs) -> Result<()> {
    set_outputs(&OutputStore::from_env(), &args.kv)
}

/// Validate every pair, then write them under the active step.
///
/// Nothing is written if any pair is malformed. Without an active step the
/// outputs are discarded.
pub fn set_outputs(store: &OutputStore, pairs: &[String]) -> Result<()> {
    let records = pairs
        .iter()
        .map(|pair| parse_pair(pair))
        .collect::<Result<Vec<OutputRecord>, _>>()?;
    for record in records {
        if !store.set_output(&record.key, &record.value)? {
            tracing::debug!(key = %record.key, "no active step, output discarded");
        }
    }
    Ok(())
}

#[cfg(test)]
#[path = "set_tests.rs"]
mod tests;
