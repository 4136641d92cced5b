//! Port trait definitions for the Application layer.
//!
//! Ports are the interfaces (contracts) that infrastructure must fulfill.
//! This file imports only from `crate::domain` and the shared job types,
//! never from `crate::infra`.

use std::path::{Path, PathBuf};
use std::process::Output;
use std::time::Duration;

use anyhow::Result;
use netjanitor_common::{CleanableJob, RunningJob};

use crate::domain::JobFileError;

// ── Command Runner Port ───────────────────────────────────────────────────────

/// Abstracts process execution so infrastructure can be swapped or mocked.
#[allow(async_fn_in_trait)]
pub trait CommandRunner {
    /// Run a program and capture its output.
    ///
    /// Implementations should delegate to `run_with_timeout` using the
    /// instance's configured default timeout.
    async fn run(&self, program: &str, args: &[&str]) -> Result<Output>;
    /// Run a program with a custom timeout override.
    ///
    /// # Errors
    ///
    /// Returns an error if the process cannot be spawned or exceeds `timeout`.
    /// On timeout, the child process must be killed (not left orphaned).
    async fn run_with_timeout(
        &self,
        program: &str,
        args: &[&str],
        timeout: Duration,
    ) -> Result<Output>;
}

// ── Network Runtime Port ──────────────────────────────────────────────────────

/// The two container-runtime operations the janitor needs.
#[allow(async_fn_in_trait)]
pub trait NetworkRuntime {
    /// List every network name the runtime knows, unfiltered.
    ///
    /// # Errors
    ///
    /// Returns an error if the runtime cannot be reached or reports failure.
    async fn list_networks(&self) -> Result<Vec<String>>;
    /// Remove a network by name.
    ///
    /// # Errors
    ///
    /// Returns an error if the runtime refuses or cannot be reached.
    async fn remove_network(&self, name: &str) -> Result<()>;
}

// ── Job Store Port ────────────────────────────────────────────────────────────

/// Read-only view of the scheduler's job directory and the working
/// directories its jobs run in. Synchronous; all calls are plain file I/O.
pub trait JobStore {
    /// Regular files directly under `dir` whose base name satisfies
    /// `matches`.
    ///
    /// # Errors
    ///
    /// Returns an error if `dir` cannot be listed.
    fn job_files(&self, dir: &Path, matches: &dyn Fn(&str) -> bool) -> Result<Vec<PathBuf>>;

    /// Load a scheduler job file.
    ///
    /// # Errors
    ///
    /// Returns `JobFileError` for open, read, or parse failures.
    fn read_cleanable_job(&self, path: &Path) -> Result<CleanableJob, JobFileError>;

    /// Returns `true` if the working directory can still be opened.
    fn working_directory_exists(&self, dir: &Path) -> bool;

    /// Load the running-job file at `path`.
    ///
    /// `Ok(None)` means the file cannot be opened at all (usually absent).
    ///
    /// # Errors
    ///
    /// Returns `JobFileError` if the file opened but could not be read or
    /// parsed.
    fn read_running_job(&self, path: &Path) -> Result<Option<RunningJob>, JobFileError>;
}
