//! Naming conventions linking job files to runtime networks.
//!
//! A job file is named `<uuid>.json`. The job's compose project creates a
//! network named after the uuid with the hyphens dropped, plus `_default`.

use std::fmt;
use std::path::Path;
use std::sync::LazyLock;

use regex::Regex;

/// Job file names accepted by the directory scanner.
pub const JOB_FILE_PATTERN: &str =
    r"(?i)^[0-9a-f]{8}-[0-9a-f]{4}-[0-9a-f]{4}-[0-9a-f]{4}-[0-9a-f]{12}\.json$";

/// Runtime network names owned by the janitor.
pub const NETWORK_PATTERN: &str = r"(?i)^[0-9a-f]{32}_default$";

/// Suffix the compose project appends to its default network.
pub const NETWORK_SUFFIX: &str = "_default";

const JOB_FILE_EXTENSION: &str = ".json";

static JOB_FILE_RE: LazyLock<Regex> = LazyLock::new(|| {
    #[allow(clippy::expect_used)]
    Regex::new(JOB_FILE_PATTERN).expect("valid regex")
});

static NETWORK_RE: LazyLock<Regex> = LazyLock::new(|| {
    #[allow(clippy::expect_used)]
    Regex::new(NETWORK_PATTERN).expect("valid regex")
});

/// Returns `true` when `file_name` (a base name, no directory) looks like a
/// job file.
#[must_use]
pub fn is_job_file_name(file_name: &str) -> bool {
    JOB_FILE_RE.is_match(file_name)
}

/// Returns `true` when a runtime-reported network follows the janitor's
/// naming convention. Anything else is never touched.
#[must_use]
pub fn is_janitor_network(name: &str) -> bool {
    NETWORK_RE.is_match(name)
}

/// Job identifier taken from a job file's base name.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct JobUuid(String);

impl JobUuid {
    /// Derive the uuid from a job file path.
    ///
    /// Only the base name matters: the directory is dropped, then a trailing
    /// `.json` (any case) is stripped.
    #[must_use]
    pub fn from_job_file(path: &Path) -> Self {
        let base = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        let stem_len = base.len().saturating_sub(JOB_FILE_EXTENSION.len());
        let stem = match base.get(stem_len..) {
            Some(ext) if ext.eq_ignore_ascii_case(JOB_FILE_EXTENSION) => &base[..stem_len],
            _ => base.as_str(),
        };
        Self(stem.to_string())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The network the job's compose project creates.
    #[must_use]
    pub fn network_name(&self) -> NetworkName {
        let compact: String = self
            .0
            .chars()
            .filter(|c| *c != '-')
            .map(|c| c.to_ascii_lowercase())
            .collect();
        NetworkName(format!("{compact}{NETWORK_SUFFIX}"))
    }
}

impl fmt::Display for JobUuid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Runtime network name derived from a [`JobUuid`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NetworkName(String);

impl NetworkName {
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    #[must_use]
    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for NetworkName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for NetworkName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
