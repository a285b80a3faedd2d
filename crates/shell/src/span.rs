// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Byte ranges within a tokenized command line.

use serde::{Deserialize, Serialize};

/// A span representing a range in the (trimmed) command line.
///
/// Spans use byte offsets so they can slice the line directly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Span {
    /// Start byte offset (inclusive)
    pub start: usize,
    /// End byte offset (exclusive)
    pub end: usize,
}

impl Span {
    #[inline]
    pub fn new(start: usize, end: usize) -> Self {
        debug_assert!(start <= end, "span start must not exceed end");
        Self { start, end }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.end.saturating_sub(self.start)
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    /// Extract the spanned text, or an empty string when out of bounds.
    #[inline]
    pub fn slice<'a>(&self, source: &'a str) -> &'a str {
        source.get(self.start..self.end).unwrap_or("")
    }
}

/// Render `line` with carets under `span`.
///
/// ```text
/// cmd -fl@g
///     ^^^
/// ```
pub fn context_snippet(line: &str, span: Span) -> String {
    let start = span.start.min(line.len());
    let caret_pos = line.get(..start).map(|s| s.chars().count()).unwrap_or(0);
    let caret_len = span.slice(line).chars().count().max(1);
    format!(
        "{}\n{}{}",
        line,
        " ".repeat(caret_pos),
        "^".repeat(caret_len)
    )
}
