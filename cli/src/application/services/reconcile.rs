//! Reconciliation cycle and polling loop.
//!
//! A cycle fetches the network inventory, scans the job directory, classifies
//! every network, then asks the runtime to remove the removable ones. Nothing
//! carries over between cycles.

use std::path::PathBuf;
use std::time::Duration;

use tokio::time::MissedTickBehavior;
use tokio_util::sync::CancellationToken;

use crate::application::ports::{JobStore, NetworkRuntime};
use crate::application::services::classify::classify;
use crate::application::services::scan::scan_job_dir;
use crate::domain::{CycleReport, RemovalFailure, SkipReason};

/// Per-cycle settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CycleOptions {
    /// Directory holding the scheduler's job files.
    pub job_dir: PathBuf,
    /// Classify and report, but never call `remove_network`.
    pub dry_run: bool,
}

/// Run one full reconciliation cycle.
///
/// Never fails: every error is logged and reflected in the returned report.
pub async fn run_cycle(
    runtime: &impl NetworkRuntime,
    store: &impl JobStore,
    opts: &CycleOptions,
) -> CycleReport {
    let mut skipped = None;

    let inventory = match runtime.list_networks().await {
        Ok(names) => names,
        Err(e) => {
            tracing::error!(error = %format!("{e:#}"), "failed to list networks, skipping removals this cycle");
            skipped = Some(SkipReason::InventoryUnavailable);
            Vec::new()
        }
    };

    let jobs = match scan_job_dir(store, &opts.job_dir) {
        Ok(jobs) => jobs,
        Err(e) => {
            tracing::error!(error = %format!("{e:#}"), "failed to get job files, skipping removals this cycle");
            skipped.get_or_insert(SkipReason::JobDirectoryUnreadable);
            Vec::new()
        }
    };

    let classification = classify(&inventory, &jobs, store);
    let removable: Vec<String> = classification
        .table
        .removable()
        .map(ToString::to_string)
        .collect();

    if skipped.is_none() && opts.dry_run {
        skipped = Some(SkipReason::DryRun);
    }

    let mut report = CycleReport {
        networks_seen: inventory.len(),
        jobs: classification.outcomes,
        removable,
        skipped,
        ..CycleReport::default()
    };

    match skipped {
        None => {
            remove_all(runtime, &mut report).await;
            if report.has_failures() {
                tracing::warn!(
                    failed = report.failed.len(),
                    "some networks could not be removed, retrying next cycle"
                );
            }
        }
        Some(SkipReason::DryRun) => {
            for network in &report.removable {
                tracing::info!(network = %network, "dry run: would remove network");
            }
        }
        Some(reason) => {
            tracing::warn!(?reason, candidates = report.removable.len(), "removal step skipped");
        }
    }

    report
}

async fn remove_all(runtime: &impl NetworkRuntime, report: &mut CycleReport) {
    for network in &report.removable {
        tracing::info!(network = %network, "removing network");
        match runtime.remove_network(network).await {
            Ok(()) => report.removed.push(network.clone()),
            Err(e) => {
                let error = format!("{e:#}");
                tracing::warn!(network = %network, %error, "failed to remove network");
                report.failed.push(RemovalFailure {
                    network: network.clone(),
                    error,
                });
            }
        }
    }
}

/// Run cycles every `interval` until `cancel` fires.
///
/// The first cycle starts immediately. A cycle in progress always runs to
/// completion; cancellation is observed between cycles. `on_report` is
/// called after every cycle.
pub async fn run_loop(
    runtime: &impl NetworkRuntime,
    store: &impl JobStore,
    opts: &CycleOptions,
    interval: Duration,
    cancel: CancellationToken,
    mut on_report: impl FnMut(&CycleReport),
) {
    let mut ticker = tokio::time::interval(interval);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
    tracing::info!(
        interval_ms = u64::try_from(interval.as_millis()).unwrap_or(u64::MAX),
        job_dir = %opts.job_dir.display(),
        dry_run = opts.dry_run,
        "network janitor started"
    );

    loop {
        tokio::select! {
            biased;
            () = cancel.cancelled() => {
                tracing::info!("network janitor shutting down");
                break;
            }
            _ = ticker.tick() => {
                let report = run_cycle(runtime, store, opts).await;
                tracing::debug!(
                    seen = report.networks_seen,
                    removable = report.removable.len(),
                    removed = report.removed.len(),
                    failed = report.failed.len(),
                    "cycle complete"
                );
                on_report(&report);
            }
        }
    }
}
