//! Summary of one reconciliation cycle, emitted with `--json`.

use serde::Serialize;

use crate::domain::verdict::JobOutcome;

/// Why the removal step of a cycle did not run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SkipReason {
    /// The runtime could not list its networks.
    InventoryUnavailable,
    /// The job directory could not be listed, so job liveness is unknown.
    JobDirectoryUnreadable,
    /// Dry run requested.
    DryRun,
}

/// A removal request the runtime rejected.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RemovalFailure {
    pub network: String,
    pub error: String,
}

/// Everything a cycle saw and did.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CycleReport {
    /// Number of names the runtime reported.
    pub networks_seen: usize,
    /// Per-job classifier outcomes.
    pub jobs: Vec<JobOutcome>,
    /// Networks classified removable.
    pub removable: Vec<String>,
    /// Networks the runtime removed.
    pub removed: Vec<String>,
    /// Networks the runtime refused to remove.
    pub failed: Vec<RemovalFailure>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub skipped: Option<SkipReason>,
}

impl CycleReport {
    /// Returns `true` if any removal request failed.
    #[must_use]
    pub fn has_failures(&self) -> bool {
        !self.failed.is_empty()
    }
}
