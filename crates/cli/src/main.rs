// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! vulcan - run the jobs of a project file

use clap::Parser;
use vulcan_cli::commands::run::{handle, RunArgs};

#[tokio::main]
async fn main() {
    let args = RunArgs::parse();
    vulcan_cli::init_logging(args.verbose);
    if let Err(e) = handle(args).await {
        vulcan_cli::exit_with(e);
    }
}
