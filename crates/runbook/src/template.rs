// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Step line templating
//!
//! Lines reference scope values as `{{.key}}`; whitespace inside the braces
//! is allowed (`{{ .key }}`). Nothing else is a valid action.

use regex::Regex;
use std::sync::LazyLock;
use thiserror::Error;
use vc_core::ArgsMap;

/// Inner text of a field reference: `.name`
// Allow expect here as the regex is compile-time verified to be valid
#[allow(clippy::expect_used)]
static FIELD_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\.([A-Za-z_][A-Za-z0-9_]*)$").expect("constant regex pattern is valid")
});

/// Errors from [`render`]
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TemplateError {
    #[error("template references undefined key '{key}' at offset {offset}")]
    UndefinedKey { key: String, offset: usize },
    #[error("unsupported template action '{{{{{action}}}}}' at offset {offset}")]
    UnsupportedAction { action: String, offset: usize },
    #[error("unterminated '{{{{' at offset {offset}")]
    Unterminated { offset: usize },
}

/// Substitute every `{{.key}}` in `template` with its value from `scope`.
pub fn render(template: &str, scope: &ArgsMap) -> Result<String, TemplateError> {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;
    let mut offset = 0;
    while let Some(open) = rest.find("{{") {
        out.push_str(&rest[..open]);
        let start = offset + open;
        let after = &rest[open + 2..];
        let Some(close) = after.find("}}") else {
            return Err(TemplateError::Unterminated { offset: start });
        };
        let action = after[..close].trim();
        let Some(caps) = FIELD_PATTERN.captures(action) else {
            return Err(TemplateError::UnsupportedAction {
                action: action.to_string(),
                offset: start,
            });
        };
        let key = &caps[1];
        match scope.get(key) {
            Some(value) => out.push_str(value),
            None => {
                return Err(TemplateError::UndefinedKey {
                    key: key.to_string(),
                    offset: start,
                })
            }
        }
        let consumed = open + 2 + close + 2;
        rest = &rest[consumed..];
        offset += consumed;
    }
    out.push_str(rest);
    Ok(out)
}

#[cfg(test)]
#[path = "template_tests.rs"]
mod tests;
