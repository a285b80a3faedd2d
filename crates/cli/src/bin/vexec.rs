// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! vexec - container re-entry point

use clap::Parser;
use vulcan_cli::commands::exec::{handle, ExecArgs};

#[tokio::main]
async fn main() {
    let args = ExecArgs::parse();
    vulcan_cli::init_logging(args.verbose);
    if let Err(e) = handle(args).await {
        vulcan_cli::exit_with(e);
    }
}
