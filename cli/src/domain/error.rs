//! Typed domain error enums.
//!
//! All error types implement `thiserror::Error` and convert to `anyhow::Error`
//! via the `?` operator.

use std::path::PathBuf;
use std::time::Duration;

use thiserror::Error;

// ── Job file errors ───────────────────────────────────────────────────────────

/// Failure to load a job descriptor from disk. Each variant carries the
/// offending path.
#[derive(Debug, Error)]
pub enum JobFileError {
    #[error("failed to open {}", path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to read {}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to unmarshal JSON from {}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

impl JobFileError {
    /// Path of the file that could not be loaded.
    #[must_use]
    pub fn path(&self) -> &std::path::Path {
        match self {
            Self::Open { path, .. } | Self::Read { path, .. } | Self::Parse { path, .. } => path,
        }
    }
}

// ── Runtime errors ────────────────────────────────────────────────────────────

/// Errors from invoking the container runtime CLI.
#[derive(Debug, Error)]
pub enum RuntimeError {
    #[error("failed to run {program}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed waiting for {program}")]
    Wait {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("{program} timed out after {}", humantime::format_duration(*timeout))]
    Timeout { program: String, timeout: Duration },

    #[error("`{command}` exited with {status}: {stderr}")]
    Failed {
        command: String,
        status: String,
        stderr: String,
    },
}

// ── Config errors ─────────────────────────────────────────────────────────────

/// Errors raised while resolving configuration at startup.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("error parsing duration '{value}' for {key}")]
    InvalidDuration {
        key: &'static str,
        value: String,
        #[source]
        source: humantime::DurationError,
    },

    #[error("{key} must be greater than zero")]
    ZeroDuration { key: &'static str },

    #[error("{key} must not be empty")]
    Empty { key: &'static str },
}
