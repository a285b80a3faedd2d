// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Tokenizer error types.

use crate::span::{context_snippet, Span};
use crate::tokenizer::State;
use thiserror::Error;

/// Errors produced while tokenizing a command line.
///
/// Use [`TokenizeError::context`] to render the offending part of the line.
///
/// ```ignore
/// use vc_shell::{tokenize, TokenizeError};
///
/// let err = tokenize("cmd -fl@g").unwrap_err();
/// assert!(matches!(err, TokenizeError::InvalidFlagKey { .. }));
/// assert!(err.to_string().contains("fl"));
/// ```
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TokenizeError {
    /// A flag name hit a character other than space, `=` or end of line.
    #[error("invalid flag key {key}")]
    InvalidFlagKey {
        /// The flag name read before the offending character.
        key: String,
        /// Span of the flag (marker included) up to the offending character.
        span: Span,
    },

    /// The machine entered a state with no handler.
    #[error("no such state {state:?} at position {position}")]
    NoSuchState { state: State, position: usize },
}

impl TokenizeError {
    pub fn span(&self) -> Option<Span> {
        match self {
            TokenizeError::InvalidFlagKey { span, .. } => Some(*span),
            TokenizeError::NoSuchState { .. } => None,
        }
    }

    /// Render the (trimmed) input line with carets under the error span.
    pub fn context(&self, input: &str) -> Option<String> {
        Some(context_snippet(input.trim(), self.span()?))
    }
}
