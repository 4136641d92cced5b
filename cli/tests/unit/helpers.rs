//! Shared test helpers: on-disk job directory fixtures.

#![allow(dead_code, clippy::expect_used)]

use std::path::{Path, PathBuf};

use netjanitor_cli::application::services::CycleOptions;
use tempfile::TempDir;

/// A scratch job directory plus a place for working directories.
pub struct JobFixture {
    root: TempDir,
}

impl JobFixture {
    pub fn new() -> Self {
        let root = TempDir::new().expect("tempdir");
        std::fs::create_dir(root.path().join("jobs")).expect("mkdir jobs");
        std::fs::create_dir(root.path().join("work")).expect("mkdir work");
        Self { root }
    }

    pub fn job_dir(&self) -> PathBuf {
        self.root.path().join("jobs")
    }

    /// Path for a working directory; not created.
    pub fn work_dir(&self, name: &str) -> PathBuf {
        self.root.path().join("work").join(name)
    }

    /// Write `<uuid>.json` into the job directory.
    pub fn write_job(&self, uuid: &str, invocation: &str, working_dir: &Path) -> PathBuf {
        let body = serde_json::json!({
            "uuid": invocation,
            "local_working_directory": working_dir,
            "submitter": "someone",
        });
        self.write_raw_job(uuid, &body.to_string())
    }

    /// Write arbitrary content as `<uuid>.json`.
    pub fn write_raw_job(&self, uuid: &str, content: &str) -> PathBuf {
        let path = self.job_dir().join(format!("{uuid}.json"));
        std::fs::write(&path, content).expect("write job file");
        path
    }

    /// Create `working_dir` with a `job` file reporting `invocation`.
    pub fn write_running_job(&self, working_dir: &Path, invocation: &str) {
        self.write_raw_running_job(
            working_dir,
            &serde_json::json!({ "uuid": invocation }).to_string(),
        );
    }

    /// Create `working_dir` with arbitrary `job` file content.
    pub fn write_raw_running_job(&self, working_dir: &Path, content: &str) {
        std::fs::create_dir_all(working_dir).expect("mkdir working dir");
        std::fs::write(working_dir.join("job"), content).expect("write running job");
    }

    pub fn options(&self) -> CycleOptions {
        CycleOptions {
            job_dir: self.job_dir(),
            dry_run: false,
        }
    }
}

pub const UUID_A: &str = "11111111-1111-1111-1111-111111111111";
pub const NET_A: &str = "11111111111111111111111111111111_default";
pub const UUID_B: &str = "22222222-2222-2222-2222-222222222222";
pub const NET_B: &str = "22222222222222222222222222222222_default";
pub const DEADBEEF: &str = "deadbeefdeadbeefdeadbeefdeadbeef_default";
