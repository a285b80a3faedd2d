// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! vset - publish step outputs

use clap::Parser;
use vulcan_cli::commands::set::{handle, SetArgs};

fn main() {
    let args = SetArgs::parse();
    vulcan_cli::init_logging(false);
    if let Err(e) = handle(args) {
        vulcan_cli::exit_with(e);
    }
}
