// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Test helpers for behavioral specifications.
//!
//! Provides a small DSL for running the vulcan binaries against a
//! throwaway project directory.

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic, dead_code)]

use std::path::{Path, PathBuf};
use std::process::{Command, Output};

/// Path of a binary built by Cargo for this package's integration tests.
pub fn binary_path(name: &str) -> PathBuf {
    let path = match name {
        "vulcan" => env!("CARGO_BIN_EXE_vulcan"),
        "vexec" => env!("CARGO_BIN_EXE_vexec"),
        "vset" => env!("CARGO_BIN_EXE_vset"),
        other => panic!("no binary named {}", other),
    };
    PathBuf::from(path)
}

/// Fluent builder around one binary invocation
pub struct CliBuilder {
    program: PathBuf,
    args: Vec<String>,
    dir: Option<PathBuf>,
    envs: Vec<(String, String)>,
    removed: Vec<String>,
}

impl CliBuilder {
    pub fn new(binary: &str) -> Self {
        Self {
            program: binary_path(binary),
            args: Vec::new(),
            dir: None,
            envs: Vec::new(),
            removed: vec!["RUST_LOG".to_string()],
        }
    }

    /// Add CLI arguments
    pub fn args(mut self, args: &[&str]) -> Self {
        self.args.extend(args.iter().map(|s| s.to_string()));
        self
    }

    /// Set working directory
    pub fn pwd(mut self, path: impl Into<PathBuf>) -> Self {
        self.dir = Some(path.into());
        self
    }

    /// Set an environment variable
    pub fn env(mut self, key: &str, value: impl AsRef<std::ffi::OsStr>) -> Self {
        self.envs.push((
            key.to_string(),
            value.as_ref().to_string_lossy().into_owned(),
        ));
        self
    }

    /// Drop a variable inherited from the test process
    pub fn env_remove(mut self, key: &str) -> Self {
        self.removed.push(key.to_string());
        self
    }

    pub fn command(self) -> Command {
        let mut cmd = Command::new(&self.program);
        cmd.args(&self.args);
        if let Some(dir) = &self.dir {
            cmd.current_dir(dir);
        }
        for key in &self.removed {
            cmd.env_remove(key);
        }
        for (k, v) in &self.envs {
            cmd.env(k, v);
        }
        cmd
    }

    /// Run and assert the command exits 0
    pub fn passes(self) -> RunAssert {
        let output = self.command().output().expect("command should run");
        assert!(
            output.status.success(),
            "expected command to pass, got {:?}\nstdout: {}\nstderr: {}",
            output.status,
            String::from_utf8_lossy(&output.stdout),
            String::from_utf8_lossy(&output.stderr)
        );
        RunAssert { output }
    }

    /// Run and assert the command exits non-zero
    pub fn fails(self) -> RunAssert {
        let output = self.command().output().expect("command should run");
        assert!(
            !output.status.success(),
            "expected command to fail, it passed\nstdout: {}\nstderr: {}",
            String::from_utf8_lossy(&output.stdout),
            String::from_utf8_lossy(&output.stderr)
        );
        RunAssert { output }
    }
}

/// Assertions over a finished run
pub struct RunAssert {
    output: Output,
}

impl RunAssert {
    pub fn stdout(&self) -> String {
        String::from_utf8_lossy(&self.output.stdout).into_owned()
    }

    pub fn stderr(&self) -> String {
        String::from_utf8_lossy(&self.output.stderr).into_owned()
    }

    pub fn code(&self) -> Option<i32> {
        self.output.status.code()
    }

    /// Assert stdout equals expected exactly (with diff on failure).
    pub fn stdout_eq(self, expected: &str) -> Self {
        let stdout = self.stdout();
        similar_asserts::assert_eq!(stdout, expected);
        self
    }

    /// Assert stderr equals expected exactly (with diff on failure).
    pub fn stderr_eq(self, expected: &str) -> Self {
        let stderr = self.stderr();
        similar_asserts::assert_eq!(stderr, expected);
        self
    }

    pub fn stdout_has(self, expected: &str) -> Self {
        let stdout = self.stdout();
        assert!(
            stdout.contains(expected),
            "stdout does not contain '{}'\nstdout: {}",
            expected,
            stdout
        );
        self
    }

    pub fn stderr_has(self, expected: &str) -> Self {
        let stderr = self.stderr();
        assert!(
            stderr.contains(expected),
            "stderr does not contain '{}'\nstderr: {}",
            expected,
            stderr
        );
        self
    }

    pub fn stderr_lacks(self, unexpected: &str) -> Self {
        let stderr = self.stderr();
        assert!(
            !stderr.contains(unexpected),
            "stderr should not contain '{}'\nstderr: {}",
            unexpected,
            stderr
        );
        self
    }
}

/// Temporary project directory with an isolated state directory.
pub struct Project {
    dir: tempfile::TempDir,
    state_dir: tempfile::TempDir,
    home_dir: tempfile::TempDir,
}

impl Project {
    pub fn empty() -> Self {
        Self {
            dir: tempfile::tempdir().unwrap(),
            state_dir: tempfile::tempdir().unwrap(),
            home_dir: tempfile::tempdir().unwrap(),
        }
    }

    /// A project with `.vulcan/<action>.yaml` already written
    pub fn with_action(action: &str, yaml: &str) -> Self {
        let project = Self::empty();
        project.file(format!(".vulcan/{action}.yaml"), yaml);
        project
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    pub fn state_path(&self) -> &Path {
        self.state_dir.path()
    }

    /// Parsed output store document, if any step has written one
    pub fn store(&self) -> Option<serde_json::Value> {
        let text = std::fs::read_to_string(self.state_path().join("outputs.json")).ok()?;
        Some(serde_json::from_str(&text).unwrap())
    }

    /// Write a file at the given path (parent directories created automatically)
    pub fn file(&self, path: impl AsRef<Path>, content: &str) {
        let full_path = self.dir.path().join(path.as_ref());
        if let Some(parent) = full_path.parent() {
            std::fs::create_dir_all(parent).unwrap();
        }
        std::fs::write(full_path, content).unwrap();
    }

    pub fn exists(&self, path: impl AsRef<Path>) -> bool {
        self.dir.path().join(path).exists()
    }

    pub fn read(&self, path: impl AsRef<Path>) -> String {
        std::fs::read_to_string(self.dir.path().join(path)).unwrap()
    }

    /// Toolchain directory exposing the built `vset` binary to steps
    pub fn toolchain_with_vset(&self) -> PathBuf {
        let dir = self.home_dir.path().join("toolchains");
        std::fs::create_dir_all(&dir).unwrap();
        std::os::unix::fs::symlink(binary_path("vset"), dir.join("vset")).unwrap();
        dir
    }

    fn isolated(&self, binary: &str) -> CliBuilder {
        CliBuilder::new(binary)
            .pwd(self.path())
            .env("VULCAN_STATE_DIR", self.state_path())
            .env("VULCAN_HOME", self.home_dir.path())
            .env_remove("VULCAN_OUTPUT_STORE")
            .env_remove("VULCAN_STEP_OUTPUT")
    }

    pub fn vulcan(&self) -> CliBuilder {
        self.isolated("vulcan")
    }

    pub fn vexec(&self) -> CliBuilder {
        self.isolated("vexec")
    }

    pub fn vset(&self) -> CliBuilder {
        self.isolated("vset")
    }
}
