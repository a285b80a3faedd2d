// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Output store.
//!
//! One JSON document holds the active step and every published output,
//! keyed `steps_<step>_outputs_<key>`. Each operation opens the document
//! under an exclusive advisory lock, applies its change and releases the
//! lock; no handle outlives a call. Lock acquisition is bounded and a
//! timeout is fatal.

use chrono::{DateTime, Utc};
use fs2::FileExt;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::fs::{self, File, OpenOptions};
use std::io::{BufReader, BufWriter};
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};
use thiserror::Error;
use vc_core::{is_identifier, output_key, output_prefix, OutputRecord};

/// How long an operation waits for the store lock.
pub const DEFAULT_LOCK_TIMEOUT: Duration = Duration::from_secs(1);

const LOCK_POLL_INTERVAL: Duration = Duration::from_millis(10);

/// Errors from output store operations
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("failed to open db {}: lock not acquired within {timeout:?}", path.display())]
    LockTimeout { path: PathBuf, timeout: Duration },
    #[error("failed to open db {}: {source}", path.display())]
    Open {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("corrupt output store {}: {source}", path.display())]
    Corrupt {
        path: PathBuf,
        source: serde_json::Error,
    },
    #[error("failed to write output store {}: {source}", path.display())]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to encode output store: {0}")]
    Encode(#[from] serde_json::Error),
}

/// Persisted store contents.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoreDocument {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub current_step: Option<String>,
    #[serde(default)]
    pub outputs: IndexMap<String, String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

/// Handle to a store file. Cheap to clone; holds no open resources.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputStore {
    path: PathBuf,
    lock_timeout: Duration,
}

/// Exclusive lock held for the duration of one operation.
struct LockGuard {
    file: File,
}

impl Drop for LockGuard {
    fn drop(&mut self) {
        let _ = FileExt::unlock(&self.file);
    }
}

impl OutputStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            lock_timeout: DEFAULT_LOCK_TIMEOUT,
        }
    }

    /// Store at the location resolved from the environment.
    pub fn from_env() -> Self {
        let store = Self::new(crate::env::store_path());
        match crate::env::lock_timeout_ms() {
            Some(timeout) => store.with_lock_timeout(timeout),
            None => store,
        }
    }

    pub fn with_lock_timeout(mut self, timeout: Duration) -> Self {
        self.lock_timeout = timeout;
        self
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn lock_path(&self) -> PathBuf {
        self.path.with_extension("lock")
    }

    fn lock(&self) -> Result<LockGuard, StoreError> {
        let open_err = |source| StoreError::Open {
            path: self.path.clone(),
            source,
        };
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(open_err)?;
        }
        let file = OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(false)
            .open(self.lock_path())
            .map_err(open_err)?;

        let deadline = Instant::now() + self.lock_timeout;
        loop {
            match file.try_lock_exclusive() {
                Ok(()) => return Ok(LockGuard { file }),
                Err(_) if Instant::now() < deadline => std::thread::sleep(LOCK_POLL_INTERVAL),
                Err(e) => {
                    tracing::error!(
                        path = %self.path.display(),
                        error = %e,
                        "output store lock timed out"
                    );
                    return Err(StoreError::LockTimeout {
                        path: self.path.clone(),
                        timeout: self.lock_timeout,
                    });
                }
            }
        }
    }

    fn read(&self) -> Result<StoreDocument, StoreError> {
        let file = match File::open(&self.path) {
            Ok(f) => f,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Ok(StoreDocument::default())
            }
            Err(source) => {
                return Err(StoreError::Open {
                    path: self.path.clone(),
                    source,
                })
            }
        };
        serde_json::from_reader(BufReader::new(file)).map_err(|source| StoreError::Corrupt {
            path: self.path.clone(),
            source,
        })
    }

    /// Write to a temp file, sync, then rename over the store.
    fn write(&self, doc: &StoreDocument) -> Result<(), StoreError> {
        let write_err = |source| StoreError::Write {
            path: self.path.clone(),
            source,
        };
        let tmp_path = self.path.with_extension("tmp");
        {
            let file = File::create(&tmp_path).map_err(write_err)?;
            let mut writer = BufWriter::new(file);
            serde_json::to_writer_pretty(&mut writer, doc)?;
            let file = writer
                .into_inner()
                .map_err(|e| write_err(e.into_error()))?;
            file.sync_all().map_err(write_err)?;
        }
        fs::rename(&tmp_path, &self.path).map_err(write_err)
    }

    fn view<T>(&self, f: impl FnOnce(&StoreDocument) -> T) -> Result<T, StoreError> {
        let _guard = self.lock()?;
        let doc = self.read()?;
        Ok(f(&doc))
    }

    fn update<T>(&self, f: impl FnOnce(&mut StoreDocument) -> T) -> Result<T, StoreError> {
        let _guard = self.lock()?;
        let mut doc = self.read()?;
        let result = f(&mut doc);
        doc.updated_at = Some(Utc::now());
        self.write(&doc)?;
        Ok(result)
    }

    /// Mark `id` as the active step. A blank id is a no-op.
    pub fn set_current_step(&self, id: &str) -> Result<(), StoreError> {
        let id = id.trim();
        if id.is_empty() {
            return Ok(());
        }
        self.update(|doc| doc.current_step = Some(id.to_string()))?;
        tracing::debug!(step = id, "current step set");
        Ok(())
    }

    /// Forget the active step; later `set_output` calls are discarded.
    pub fn clear_current_step(&self) -> Result<(), StoreError> {
        self.update(|doc| doc.current_step = None)
    }

    pub fn current_step(&self) -> Result<Option<String>, StoreError> {
        self.view(|doc| doc.current_step.clone())
    }

    /// Record an output for the active step, overwriting an earlier value.
    ///
    /// Without an active step nothing is written. Returns whether the
    /// output was recorded. Keys that are not identifiers are still stored
    /// but templates cannot reference them, so they are warned about.
    pub fn set_output(&self, key: &str, value: &str) -> Result<bool, StoreError> {
        if !is_identifier(key) {
            tracing::warn!(key, "output key is not an identifier, templates cannot reference it");
        }
        let recorded = self.update(|doc| match &doc.current_step {
            Some(step) => {
                doc.outputs
                    .insert(output_key(step, key), value.to_string());
                true
            }
            None => false,
        })?;
        if recorded {
            tracing::debug!(key, "output recorded");
        } else {
            tracing::debug!(key, "no active step, output discarded");
        }
        Ok(recorded)
    }

    /// Every persisted output, keyed by its namespaced name.
    pub fn get_all_outputs(&self) -> Result<IndexMap<String, String>, StoreError> {
        self.view(|doc| doc.outputs.clone())
    }

    /// Outputs produced by one step, with bare keys.
    pub fn outputs_for_step(&self, id: &str) -> Result<Vec<OutputRecord>, StoreError> {
        let prefix = output_prefix(id);
        self.view(|doc| {
            doc.outputs
                .iter()
                .filter_map(|(k, v)| {
                    k.strip_prefix(&prefix)
                        .map(|key| OutputRecord::new(key, v.clone()))
                })
                .collect()
        })
    }

    /// Drop the active step and all outputs.
    pub fn reset(&self) -> Result<(), StoreError> {
        self.update(|doc| *doc = StoreDocument::default())?;
        tracing::debug!(path = %self.path.display(), "output store reset");
        Ok(())
    }
}

#[cfg(test)]
#[path = "store_tests.rs"]
mod tests;
