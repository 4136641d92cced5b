pub mod job;
pub mod naming;

pub use job::{CleanableJob, RUNNING_JOB_FILE, RunningJob};
pub use naming::{
    JOB_FILE_PATTERN, JobUuid, NETWORK_PATTERN, NETWORK_SUFFIX, NetworkName, is_job_file_name,
    is_janitor_network,
};
