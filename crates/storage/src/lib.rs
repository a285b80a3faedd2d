// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! File-backed output store shared by a job's steps and their processes

pub mod env;
mod store;

pub use store::{OutputStore, StoreDocument, StoreError, DEFAULT_LOCK_TIMEOUT};
