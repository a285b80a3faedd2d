// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! Command-line tokenizer for step commands.
//!
//! Turns a rendered, shell-like step line into an argument vector without
//! invoking a shell. Quoting and flag syntax are handled by an explicit
//! state machine (see [`State`]).
//!
//! # Quick Start
//!
//! ```ignore
//! use vc_shell::{argv, tokenize};
//!
//! assert_eq!(tokenize("cmd -k=v 'a b'")?, ["cmd", "k", "v", "a b"]);
//! assert_eq!(argv("cmd -k=v 'a b'")?, ["cmd", "-k", "v", "a b"]);
//! # Ok::<(), vc_shell::TokenizeError>(())
//! ```

pub mod span;
mod tokenize_error;
mod tokenizer;

pub use span::{context_snippet, Span};
pub use tokenize_error::TokenizeError;
pub use tokenizer::{argv, join, tokenize, words, State, Word, WordKind};
