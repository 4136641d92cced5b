//! Liveness verdicts for individual job files.

use std::path::PathBuf;

use serde::Serialize;

/// What the classifier concluded about one job file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "verdict", rename_all = "snake_case")]
pub enum JobVerdict {
    /// The job file itself could not be loaded; its opinion is ignored.
    JobFileUnreadable { error: String },
    /// The working directory is gone, so the job has finished.
    WorkingDirectoryGone,
    /// The working directory exists but holds no openable running-job file.
    NotSelfReporting,
    /// A running-job file exists but could not be read or parsed.
    RunningJobUnreadable { error: String },
    /// The running-job file reports the same invocation.
    StillRunning,
    /// The working directory was reused by another invocation.
    InvocationMismatch { running_invocation: String },
}

impl JobVerdict {
    /// Effect on the job's network: `Some(true)` removable, `Some(false)`
    /// keep, `None` leave the current value alone.
    #[must_use]
    pub fn decision(&self) -> Option<bool> {
        match self {
            Self::WorkingDirectoryGone => Some(true),
            Self::RunningJobUnreadable { .. } | Self::StillRunning => Some(false),
            Self::JobFileUnreadable { .. }
            | Self::NotSelfReporting
            | Self::InvocationMismatch { .. } => None,
        }
    }
}

/// A verdict together with the job file and network it concerns.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct JobOutcome {
    pub job_file: PathBuf,
    pub job_uuid: String,
    pub network: String,
    #[serde(flatten)]
    pub verdict: JobVerdict,
}
