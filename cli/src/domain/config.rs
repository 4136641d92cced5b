//! Domain types and validators for janitor configuration.
//!
//! Pure functions only, no I/O.

use std::path::PathBuf;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::domain::error::ConfigError;

// ── Defaults ─────────────────────────────────────────────────────────────────

pub const DEFAULT_DOCKER_BIN: &str = "/usr/bin/docker";
pub const DEFAULT_JOB_DIR: &str = "/opt/image-janitor";
pub const DEFAULT_INTERVAL: &str = "15s";
pub const DEFAULT_COMMAND_TIMEOUT: &str = "30s";

// ── Config layers ────────────────────────────────────────────────────────────

/// One source of settings: the YAML config file, or the environment and
/// command line. Unset fields fall through to the layer below.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConfigLayer {
    /// Path to the docker binary.
    pub docker: Option<PathBuf>,
    /// Directory holding `<uuid>.json` job files.
    pub dir: Option<PathBuf>,
    /// Pause between cycles, humantime syntax (`15s`, `1m`).
    pub sleep: Option<String>,
    /// Upper bound for a single docker invocation.
    pub timeout: Option<String>,
}

impl ConfigLayer {
    /// Overlay `upper` on top of `self`; fields set in `upper` win.
    #[must_use]
    pub fn merge(self, upper: ConfigLayer) -> ConfigLayer {
        ConfigLayer {
            docker: upper.docker.or(self.docker),
            dir: upper.dir.or(self.dir),
            sleep: upper.sleep.or(self.sleep),
            timeout: upper.timeout.or(self.timeout),
        }
    }
}

// ── Resolved config ──────────────────────────────────────────────────────────

/// Fully resolved janitor settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JanitorConfig {
    pub docker_bin: PathBuf,
    pub job_dir: PathBuf,
    pub interval: Duration,
    pub command_timeout: Duration,
}

impl Default for JanitorConfig {
    fn default() -> Self {
        Self {
            docker_bin: PathBuf::from(DEFAULT_DOCKER_BIN),
            job_dir: PathBuf::from(DEFAULT_JOB_DIR),
            interval: Duration::from_secs(15),
            command_timeout: Duration::from_secs(30),
        }
    }
}

impl JanitorConfig {
    /// Resolve a merged layer into concrete settings, applying defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if a duration does not parse, is zero, or a path is
    /// empty.
    pub fn resolve(layer: ConfigLayer) -> Result<Self, ConfigError> {
        let docker_bin = non_empty_path("docker", layer.docker, DEFAULT_DOCKER_BIN)?;
        let job_dir = non_empty_path("dir", layer.dir, DEFAULT_JOB_DIR)?;
        let interval = parse_duration(
            "sleep",
            layer.sleep.as_deref().unwrap_or(DEFAULT_INTERVAL),
        )?;
        let command_timeout = parse_duration(
            "timeout",
            layer.timeout.as_deref().unwrap_or(DEFAULT_COMMAND_TIMEOUT),
        )?;
        Ok(Self {
            docker_bin,
            job_dir,
            interval,
            command_timeout,
        })
    }
}

fn non_empty_path(
    key: &'static str,
    value: Option<PathBuf>,
    default: &str,
) -> Result<PathBuf, ConfigError> {
    let path = value.unwrap_or_else(|| PathBuf::from(default));
    if path.as_os_str().is_empty() {
        return Err(ConfigError::Empty { key });
    }
    Ok(path)
}

/// Parse a humantime duration (`15s`, `1m30s`, `500ms`) that must be
/// non-zero.
///
/// # Errors
///
/// Returns `ConfigError::InvalidDuration` or `ConfigError::ZeroDuration`.
pub fn parse_duration(key: &'static str, value: &str) -> Result<Duration, ConfigError> {
    let duration =
        humantime::parse_duration(value.trim()).map_err(|source| ConfigError::InvalidDuration {
            key,
            value: value.to_string(),
            source,
        })?;
    if duration.is_zero() {
        return Err(ConfigError::ZeroDuration { key });
    }
    Ok(duration)
}

// ── Unit tests ───────────────────────────────────────────────────────────────
