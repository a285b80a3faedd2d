// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Per-invocation execution settings

use crate::env::CONFIG_DIR_NAME;
use crate::error::EngineError;
use std::ffi::OsString;
use std::path::{Path, PathBuf};
use vc_storage::{OutputStore, StoreError};

/// Everything a job run needs to know about its surroundings.
///
/// Built once by the entry binary and handed to the [`Engine`](crate::Engine);
/// nothing here is read from process-wide state after construction.
#[derive(Debug, Clone)]
pub struct ExecutionContext {
    /// Directory containing `.vulcan/`.
    pub project_root: PathBuf,
    /// The loaded project file.
    pub config_file: PathBuf,
    /// Working directory of step processes.
    pub workdir: PathBuf,
    /// Root for per-step output files.
    pub state_dir: PathBuf,
    pub store: OutputStore,
    pub toolchain_dir: Option<PathBuf>,
    pub plugin_dir: Option<PathBuf>,
    /// Home directory used to expand `~` artifact paths.
    pub home_dir: Option<PathBuf>,
    /// Stream container logs live instead of only on failure.
    pub verbose: bool,
    /// Explicit environment for containers; `None` forwards the host's.
    pub env_override: Option<Vec<(String, String)>>,
}

impl ExecutionContext {
    /// Context rooted at `project_root`, with state locations taken from the
    /// environment.
    pub fn new(project_root: impl Into<PathBuf>, config_file: impl Into<PathBuf>) -> Self {
        let project_root = project_root.into();
        Self {
            workdir: project_root.clone(),
            project_root,
            config_file: config_file.into(),
            state_dir: vc_storage::env::state_dir(),
            store: OutputStore::from_env(),
            toolchain_dir: None,
            plugin_dir: None,
            home_dir: dirs::home_dir(),
            verbose: false,
            env_override: None,
        }
    }

    /// Keep state (store and step output files) under `dir`.
    pub fn with_state_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.state_dir = dir.into();
        self.store = OutputStore::new(self.state_dir.join("outputs.json"));
        self
    }

    pub fn with_store(mut self, store: OutputStore) -> Self {
        self.store = store;
        self
    }

    pub fn with_workdir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.workdir = dir.into();
        self
    }

    pub fn with_toolchain_dir(mut self, dir: Option<PathBuf>) -> Self {
        self.toolchain_dir = dir;
        self
    }

    pub fn with_plugin_dir(mut self, dir: Option<PathBuf>) -> Self {
        self.plugin_dir = dir;
        self
    }

    pub fn with_home_dir(mut self, dir: Option<PathBuf>) -> Self {
        self.home_dir = dir;
        self
    }

    pub fn with_verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    pub fn with_env_override(mut self, env: Option<Vec<(String, String)>>) -> Self {
        self.env_override = env;
        self
    }

    pub fn config_dir(&self) -> PathBuf {
        self.project_root.join(CONFIG_DIR_NAME)
    }

    /// Output file a step with `id` writes `key=value` lines to.
    pub fn step_output_file(&self, id: &str) -> PathBuf {
        self.state_dir.join("output").join(id)
    }

    /// Run a store operation on the blocking pool.
    ///
    /// Store calls sleep while polling for the file lock.
    pub(crate) async fn store_call<T, F>(&self, f: F) -> Result<T, EngineError>
    where
        T: Send + 'static,
        F: FnOnce(&OutputStore) -> Result<T, StoreError> + Send + 'static,
    {
        let store = self.store.clone();
        Ok(tokio::task::spawn_blocking(move || f(&store)).await??)
    }

    /// `PATH` for step processes: toolchain and plugin directories first,
    /// then the inherited search path. `None` when neither is configured.
    pub fn search_path(&self) -> Option<OsString> {
        let extra: Vec<&Path> = [&self.toolchain_dir, &self.plugin_dir]
            .into_iter()
            .filter_map(|d| d.as_deref())
            .collect();
        if extra.is_empty() {
            return None;
        }
        let inherited = std::env::var_os("PATH").unwrap_or_default();
        let dirs = extra
            .into_iter()
            .map(Path::to_path_buf)
            .chain(std::env::split_paths(&inherited));
        std::env::join_paths(dirs).ok()
    }
}
