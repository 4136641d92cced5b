//! End-to-end cycle tests over real job directories and an in-memory runtime.

#![allow(clippy::expect_used, clippy::unwrap_used)]

use netjanitor_cli::application::services::{CycleOptions, run_cycle};
use netjanitor_cli::domain::{JobVerdict, SkipReason};
use netjanitor_cli::infra::{InMemoryRuntime, LocalJobStore};

use crate::helpers::{DEADBEEF, JobFixture, NET_A, NET_B, UUID_A, UUID_B};

#[tokio::test]
async fn test_orphan_network_without_job_file_is_removed() {
    let fx = JobFixture::new();
    let runtime = InMemoryRuntime::with_networks([DEADBEEF, "otherservice"]);

    let report = run_cycle(&runtime, &LocalJobStore, &fx.options()).await;

    assert_eq!(report.networks_seen, 2);
    assert_eq!(report.removed, vec![DEADBEEF]);
    assert!(report.skipped.is_none());
    assert_eq!(runtime.networks(), vec!["otherservice"]);
    assert_eq!(runtime.remove_requests(), vec![DEADBEEF]);
}

#[tokio::test]
async fn test_running_job_keeps_its_network() {
    let fx = JobFixture::new();
    let work = fx.work_dir("a");
    fx.write_job(UUID_A, "inv-1", &work);
    fx.write_running_job(&work, "inv-1");
    let runtime = InMemoryRuntime::with_networks([NET_A]);

    let report = run_cycle(&runtime, &LocalJobStore, &fx.options()).await;

    assert!(report.removable.is_empty());
    assert!(runtime.remove_requests().is_empty());
    assert_eq!(runtime.networks(), vec![NET_A]);
    assert_eq!(report.jobs.len(), 1);
    assert_eq!(report.jobs[0].verdict, JobVerdict::StillRunning);
    assert_eq!(report.jobs[0].network, NET_A);
}

#[tokio::test]
async fn test_finished_job_network_is_removed() {
    let fx = JobFixture::new();
    fx.write_job(UUID_A, "inv-1", &fx.work_dir("gone"));
    let runtime = InMemoryRuntime::with_networks([NET_A]);

    let report = run_cycle(&runtime, &LocalJobStore, &fx.options()).await;

    assert_eq!(report.removed, vec![NET_A]);
    assert_eq!(report.jobs[0].verdict, JobVerdict::WorkingDirectoryGone);
    assert!(runtime.networks().is_empty());
}

#[tokio::test]
async fn test_uppercase_job_file_maps_to_lowercase_network() {
    let fx = JobFixture::new();
    let work = fx.work_dir("a");
    fx.write_job("ABCDEF00-0000-0000-0000-000000000000", "inv-1", &work);
    fx.write_running_job(&work, "inv-1");
    let network = "abcdef00000000000000000000000000_default";
    let runtime = InMemoryRuntime::with_networks([network]);

    let report = run_cycle(&runtime, &LocalJobStore, &fx.options()).await;

    assert!(report.removable.is_empty());
    assert_eq!(report.jobs[0].network, network);
}

#[tokio::test]
async fn test_mixed_cycle_removes_only_finished_and_orphaned() {
    let fx = JobFixture::new();
    let live = fx.work_dir("live");
    fx.write_job(UUID_A, "inv-a", &live);
    fx.write_running_job(&live, "inv-a");
    fx.write_job(UUID_B, "inv-b", &fx.work_dir("finished"));
    let runtime = InMemoryRuntime::with_networks([NET_A, NET_B, DEADBEEF, "bridge", "host"]);

    let report = run_cycle(&runtime, &LocalJobStore, &fx.options()).await;

    let mut removed = report.removed.clone();
    removed.sort();
    assert_eq!(removed, vec![NET_B, DEADBEEF]);
    assert_eq!(runtime.networks(), vec![NET_A, "bridge", "host"]);
}

#[tokio::test]
async fn test_listing_failure_skips_all_removals() {
    let fx = JobFixture::new();
    fx.write_job(UUID_A, "inv-1", &fx.work_dir("gone"));
    let runtime = InMemoryRuntime::with_networks([NET_A]);
    runtime.fail_listing(true);

    let report = run_cycle(&runtime, &LocalJobStore, &fx.options()).await;

    assert_eq!(report.skipped, Some(SkipReason::InventoryUnavailable));
    assert_eq!(report.networks_seen, 0);
    assert!(runtime.remove_requests().is_empty());
    assert_eq!(runtime.networks(), vec![NET_A]);
}

#[tokio::test]
async fn test_missing_job_directory_skips_all_removals() {
    let fx = JobFixture::new();
    let runtime = InMemoryRuntime::with_networks([DEADBEEF]);
    let opts = CycleOptions {
        job_dir: fx.work_dir("no-such-dir"),
        dry_run: false,
    };

    let report = run_cycle(&runtime, &LocalJobStore, &opts).await;

    assert_eq!(report.skipped, Some(SkipReason::JobDirectoryUnreadable));
    assert!(runtime.remove_requests().is_empty());
    assert_eq!(runtime.networks(), vec![DEADBEEF]);
}

#[tokio::test]
async fn test_recovers_on_next_cycle_after_listing_failure() {
    let fx = JobFixture::new();
    let runtime = InMemoryRuntime::with_networks([DEADBEEF]);
    runtime.fail_listing(true);
    let first = run_cycle(&runtime, &LocalJobStore, &fx.options()).await;
    assert!(first.removed.is_empty());

    runtime.fail_listing(false);
    let second = run_cycle(&runtime, &LocalJobStore, &fx.options()).await;
    assert_eq!(second.removed, vec![DEADBEEF]);
    assert!(second.skipped.is_none());
}

#[tokio::test]
async fn test_refused_removal_does_not_stop_others() {
    let fx = JobFixture::new();
    let runtime = InMemoryRuntime::with_networks([NET_A, NET_B]);
    runtime.refuse_removal(NET_A);

    let report = run_cycle(&runtime, &LocalJobStore, &fx.options()).await;

    assert_eq!(report.removed, vec![NET_B]);
    assert_eq!(report.failed.len(), 1);
    assert_eq!(report.failed[0].network, NET_A);
    assert!(report.failed[0].error.contains("active endpoints"));
    assert!(report.has_failures());
    assert_eq!(runtime.networks(), vec![NET_A]);
}

#[tokio::test]
async fn test_refused_removal_is_retried_next_cycle() {
    let fx = JobFixture::new();
    let runtime = InMemoryRuntime::with_networks([NET_A]);
    runtime.refuse_removal(NET_A);

    run_cycle(&runtime, &LocalJobStore, &fx.options()).await;
    run_cycle(&runtime, &LocalJobStore, &fx.options()).await;

    assert_eq!(runtime.remove_requests(), vec![NET_A, NET_A]);
}

#[tokio::test]
async fn test_finished_job_without_network_attempts_removal_and_logs_failure() {
    let fx = JobFixture::new();
    fx.write_job(UUID_A, "inv-1", &fx.work_dir("gone"));
    let runtime = InMemoryRuntime::default();

    let report = run_cycle(&runtime, &LocalJobStore, &fx.options()).await;

    assert_eq!(report.removable, vec![NET_A]);
    assert!(report.removed.is_empty());
    assert_eq!(report.failed.len(), 1);
    assert_eq!(runtime.remove_requests(), vec![NET_A]);
}

#[tokio::test]
async fn test_dry_run_never_removes() {
    let fx = JobFixture::new();
    fx.write_job(UUID_A, "inv-1", &fx.work_dir("gone"));
    let runtime = InMemoryRuntime::with_networks([NET_A, DEADBEEF]);
    let opts = CycleOptions {
        dry_run: true,
        ..fx.options()
    };

    let report = run_cycle(&runtime, &LocalJobStore, &opts).await;

    assert_eq!(report.skipped, Some(SkipReason::DryRun));
    assert_eq!(report.removable.len(), 2);
    assert!(report.removed.is_empty());
    assert!(runtime.remove_requests().is_empty());
}

#[tokio::test]
async fn test_repeated_dry_runs_agree() {
    let fx = JobFixture::new();
    let live = fx.work_dir("live");
    fx.write_job(UUID_A, "inv-a", &live);
    fx.write_running_job(&live, "inv-a");
    fx.write_job(UUID_B, "inv-b", &fx.work_dir("gone"));
    let runtime = InMemoryRuntime::with_networks([NET_A, NET_B, DEADBEEF, "bridge"]);
    let opts = CycleOptions {
        dry_run: true,
        ..fx.options()
    };

    let first = run_cycle(&runtime, &LocalJobStore, &opts).await;
    let second = run_cycle(&runtime, &LocalJobStore, &opts).await;

    assert_eq!(first, second);
}

#[tokio::test]
async fn test_working_directory_reused_by_other_invocation_keeps_seed() {
    let fx = JobFixture::new();
    let work = fx.work_dir("reused");
    fx.write_job(UUID_A, "inv-old", &work);
    fx.write_running_job(&work, "inv-new");
    let runtime = InMemoryRuntime::with_networks([NET_A]);

    let report = run_cycle(&runtime, &LocalJobStore, &fx.options()).await;

    assert_eq!(
        report.jobs[0].verdict,
        JobVerdict::InvocationMismatch {
            running_invocation: "inv-new".into()
        }
    );
    assert_eq!(report.removed, vec![NET_A]);
}

#[tokio::test]
async fn test_corrupt_running_job_file_keeps_network() {
    let fx = JobFixture::new();
    let work = fx.work_dir("a");
    fx.write_job(UUID_A, "inv-1", &work);
    fx.write_raw_running_job(&work, "{ truncated");
    let runtime = InMemoryRuntime::with_networks([NET_A]);

    let report = run_cycle(&runtime, &LocalJobStore, &fx.options()).await;

    assert!(matches!(
        report.jobs[0].verdict,
        JobVerdict::RunningJobUnreadable { .. }
    ));
    assert!(runtime.remove_requests().is_empty());
}

#[tokio::test]
async fn test_working_directory_without_running_job_keeps_seed() {
    let fx = JobFixture::new();
    let work = fx.work_dir("quiet");
    std::fs::create_dir_all(&work).unwrap();
    fx.write_job(UUID_A, "inv-1", &work);
    let runtime = InMemoryRuntime::with_networks([NET_A]);

    let report = run_cycle(&runtime, &LocalJobStore, &fx.options()).await;

    assert_eq!(report.jobs[0].verdict, JobVerdict::NotSelfReporting);
    assert_eq!(report.removed, vec![NET_A]);
}

#[tokio::test]
async fn test_corrupt_job_file_is_ignored() {
    let fx = JobFixture::new();
    fx.write_raw_job(UUID_A, "not json at all");
    let runtime = InMemoryRuntime::with_networks([NET_A]);

    let report = run_cycle(&runtime, &LocalJobStore, &fx.options()).await;

    assert!(matches!(
        report.jobs[0].verdict,
        JobVerdict::JobFileUnreadable { .. }
    ));
    // seeded as removable and never overridden
    assert_eq!(report.removed, vec![NET_A]);
}

#[tokio::test]
async fn test_non_matching_files_in_job_directory_are_ignored() {
    let fx = JobFixture::new();
    std::fs::write(fx.job_dir().join("notes.txt"), "hello").unwrap();
    std::fs::write(fx.job_dir().join("not-a-uuid.json"), "{}").unwrap();
    std::fs::create_dir(fx.job_dir().join(format!("{UUID_A}.json"))).unwrap();
    let runtime = InMemoryRuntime::with_networks(["bridge"]);

    let report = run_cycle(&runtime, &LocalJobStore, &fx.options()).await;

    assert!(report.jobs.is_empty());
    assert!(runtime.remove_requests().is_empty());
}

#[tokio::test]
async fn test_report_serializes_with_verdict_tags() {
    let fx = JobFixture::new();
    fx.write_job(UUID_A, "inv-1", &fx.work_dir("gone"));
    let runtime = InMemoryRuntime::with_networks([NET_A]);

    let report = run_cycle(&runtime, &LocalJobStore, &fx.options()).await;
    let value = serde_json::to_value(&report).unwrap();

    assert_eq!(value["networks_seen"], 1);
    assert_eq!(value["jobs"][0]["verdict"], "working_directory_gone");
    assert_eq!(value["jobs"][0]["network"], NET_A);
    assert_eq!(value["removed"][0], NET_A);
    assert!(value.get("skipped").is_none());
}
