//! Job directory scan.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use netjanitor_common::{JobUuid, NetworkName, is_job_file_name};

use crate::application::ports::JobStore;

/// A job file found in the job directory, with its derived identifiers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JobFile {
    pub path: PathBuf,
    pub uuid: JobUuid,
    pub network: NetworkName,
}

impl JobFile {
    #[must_use]
    pub fn from_path(path: PathBuf) -> Self {
        let uuid = JobUuid::from_job_file(&path);
        let network = uuid.network_name();
        Self {
            path,
            uuid,
            network,
        }
    }
}

/// List the job files in `dir` and derive each job's network name.
///
/// # Errors
///
/// Returns an error if the directory cannot be listed. No partial results.
pub fn scan_job_dir(store: &impl JobStore, dir: &Path) -> Result<Vec<JobFile>> {
    let mut paths = store
        .job_files(dir, &is_job_file_name)
        .with_context(|| format!("failed to get job files from {}", dir.display()))?;
    paths.sort();
    tracing::debug!(dir = %dir.display(), count = paths.len(), "scanned job directory");
    Ok(paths.into_iter().map(JobFile::from_path).collect())
}
