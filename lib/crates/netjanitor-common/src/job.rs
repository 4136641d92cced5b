use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// Name of the file a running job keeps inside its working directory.
pub const RUNNING_JOB_FILE: &str = "job";

/// The fields of a scheduler job file (`<job dir>/<uuid>.json`) the janitor
/// cares about. Other fields in the file are ignored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CleanableJob {
    /// Invocation id of the job submission.
    #[serde(rename = "uuid")]
    pub invocation_id: String,
    /// Working directory the job runs in on this host.
    pub local_working_directory: PathBuf,
}

impl CleanableJob {
    /// Path of the running-job file inside this job's working directory.
    #[must_use]
    pub fn running_job_path(&self) -> PathBuf {
        self.local_working_directory.join(RUNNING_JOB_FILE)
    }

    /// Returns `true` when `running` reports the same invocation as this job.
    #[must_use]
    pub fn is_same_invocation(&self, running: &RunningJob) -> bool {
        self.invocation_id == running.invocation_id
    }

    #[must_use]
    pub fn working_directory(&self) -> &Path {
        &self.local_working_directory
    }
}

/// The job file maintained by the executing job in its working directory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunningJob {
    #[serde(rename = "uuid")]
    pub invocation_id: String,
}
