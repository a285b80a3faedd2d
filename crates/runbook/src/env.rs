// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Environment variable expansion and environment files

use regex::Regex;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;
use thiserror::Error;
use vc_core::ArgsMap;

/// `${NAME}` or `$NAME`
#[allow(clippy::expect_used)]
static ENV_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\$\{([A-Za-z_][A-Za-z0-9_]*)\}|\$([A-Za-z_][A-Za-z0-9_]*)")
        .expect("constant regex pattern is valid")
});

/// Errors from environment file handling
#[derive(Debug, Error)]
pub enum EnvFileError {
    #[error("failed to read env file {}: {source}", path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("env pair '{0}' is malformed, expected KEY=VALUE")]
    MalformedPair(String),
}

/// Expand a value against the process environment.
///
/// See [`expand_value_with`].
pub fn expand_value(value: &str) -> String {
    expand_value_with(value, |name| std::env::var(name).ok())
}

/// Expand `$NAME` / `${NAME}` references in a value that starts with `$`.
///
/// The value is trimmed first. Values not starting with `$` are returned
/// trimmed but otherwise untouched. Unset variables expand to nothing; if
/// the whole expansion is empty the trimmed literal is kept.
pub fn expand_value_with<F>(value: &str, lookup: F) -> String
where
    F: Fn(&str) -> Option<String>,
{
    let trimmed = value.trim();
    if !trimmed.starts_with('$') {
        return trimmed.to_string();
    }
    let expanded = ENV_PATTERN.replace_all(trimmed, |caps: &regex::Captures| {
        let name = caps.get(1).or_else(|| caps.get(2)).map_or("", |m| m.as_str());
        lookup(name).unwrap_or_default()
    });
    if expanded.is_empty() {
        trimmed.to_string()
    } else {
        expanded.into_owned()
    }
}

/// Expand every value of an argument map in place.
pub fn expand_args(args: &mut ArgsMap) {
    for value in args.values_mut() {
        *value = expand_value(value);
    }
}

/// Parse `KEY=VALUE` lines. Blank lines and `#` comments are skipped; the
/// value is everything after the first `=`. Lines without a key and `=` are
/// skipped with a warning.
pub fn parse_env_lines(content: &str, path: &Path) -> Vec<(String, String)> {
    let mut pairs = Vec::new();
    for (index, raw) in content.lines().enumerate() {
        let line = raw.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        match line.split_once('=') {
            Some((key, value)) if !key.trim().is_empty() => {
                pairs.push((key.trim().to_string(), value.trim().to_string()));
            }
            _ => tracing::warn!(
                path = %path.display(),
                line = index + 1,
                text = line,
                "skipping env file line without KEY=VALUE"
            ),
        }
    }
    pairs
}

/// Read an environment file.
pub fn load_env_file(path: &Path) -> Result<Vec<(String, String)>, EnvFileError> {
    let content = std::fs::read_to_string(path).map_err(|source| EnvFileError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(parse_env_lines(&content, path))
}

/// Parse `--env K=V` pairs. The value may contain `=`.
pub fn parse_env_pairs<I, S>(pairs: I) -> Result<Vec<(String, String)>, EnvFileError>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    pairs
        .into_iter()
        .map(|pair| {
            let pair = pair.as_ref().trim();
            match pair.split_once('=') {
                Some((key, value)) if !key.trim().is_empty() => {
                    Ok((key.trim().to_string(), value.to_string()))
                }
                _ => Err(EnvFileError::MalformedPair(pair.to_string())),
            }
        })
        .collect()
}

#[cfg(test)]
#[path = "env_tests.rs"]
mod tests;
