//! Liveness classification.
//!
//! Seeds a [`RemovabilityTable`] from the runtime inventory, then lets every
//! job file adjust the entry for its own network:
//!
//! | job file / working dir state            | effect       |
//! |------------------------------------------|--------------|
//! | job file unreadable                      | none         |
//! | working directory gone                   | removable    |
//! | no openable `job` file in working dir    | none         |
//! | `job` file unreadable                    | keep         |
//! | `job` file has the same invocation id    | keep         |
//! | `job` file has another invocation id     | none         |
//!
//! The latest decision for a network wins.

use crate::application::ports::JobStore;
use crate::application::services::scan::JobFile;
use crate::domain::{JobOutcome, JobVerdict, RemovabilityTable};

/// Result of classifying one inventory snapshot against one job snapshot.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Classification {
    pub table: RemovabilityTable,
    pub outcomes: Vec<JobOutcome>,
}

/// Build this cycle's removability table.
pub fn classify(inventory: &[String], jobs: &[JobFile], store: &impl JobStore) -> Classification {
    let mut table = RemovabilityTable::seed(inventory.iter().cloned());
    for network in table.removable() {
        tracing::info!(network, "adding network to the list of removable networks");
    }

    let mut outcomes = Vec::with_capacity(jobs.len());
    for job in jobs {
        let verdict = judge(store, job);
        apply(&mut table, job, &verdict);
        outcomes.push(JobOutcome {
            job_file: job.path.clone(),
            job_uuid: job.uuid.to_string(),
            network: job.network.to_string(),
            verdict,
        });
    }

    tracing::debug!(
        networks = table.len(),
        kept = table.kept().count(),
        jobs = outcomes.len(),
        "classification complete"
    );
    Classification { table, outcomes }
}

/// Decide what a single job file says about its network.
pub fn judge(store: &impl JobStore, job: &JobFile) -> JobVerdict {
    let cleanable = match store.read_cleanable_job(&job.path) {
        Ok(cleanable) => cleanable,
        Err(e) => {
            let job_file = e.path().display().to_string();
            let error = format!("{:#}", anyhow::Error::new(e));
            tracing::warn!(%job_file, %error, "failed to parse job file, skipping");
            return JobVerdict::JobFileUnreadable { error };
        }
    };

    let working_dir = cleanable.working_directory();
    if !store.working_directory_exists(working_dir) {
        tracing::info!(
            working_dir = %working_dir.display(),
            network = %job.network,
            "working directory does not exist, marking network for removal"
        );
        return JobVerdict::WorkingDirectoryGone;
    }

    let running_path = cleanable.running_job_path();
    match store.read_running_job(&running_path) {
        Ok(None) => {
            tracing::debug!(
                running_job = %running_path.display(),
                network = %job.network,
                "no running job file, leaving network decision unchanged"
            );
            JobVerdict::NotSelfReporting
        }
        Err(e) => {
            let running_job = e.path().display().to_string();
            let error = format!("{:#}", anyhow::Error::new(e));
            tracing::warn!(
                %running_job,
                network = %job.network,
                %error,
                "failed to parse running job file, keeping network"
            );
            JobVerdict::RunningJobUnreadable { error }
        }
        Ok(Some(running)) if cleanable.is_same_invocation(&running) => {
            tracing::info!(
                invocation_id = %running.invocation_id,
                network = %job.network,
                "running job matches cleanable job, skipping clean up"
            );
            JobVerdict::StillRunning
        }
        Ok(Some(running)) => {
            tracing::warn!(
                job_invocation = %cleanable.invocation_id,
                running_invocation = %running.invocation_id,
                network = %job.network,
                "working directory belongs to another invocation, leaving network decision unchanged"
            );
            JobVerdict::InvocationMismatch {
                running_invocation: running.invocation_id,
            }
        }
    }
}

fn apply(table: &mut RemovabilityTable, job: &JobFile, verdict: &JobVerdict) {
    match verdict.decision() {
        Some(true) => {
            if !table.mark_removable(&job.network) {
                tracing::warn!(
                    network = %job.network,
                    job_file = %job.path.display(),
                    "derived network does not follow the naming convention, not removing"
                );
            }
        }
        Some(false) => table.mark_kept(&job.network),
        None => {}
    }
}
