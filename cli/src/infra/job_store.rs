//! `JobStore` over plain `std::fs`.

use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use netjanitor_common::{CleanableJob, RunningJob};
use serde::de::DeserializeOwned;

use crate::application::ports::JobStore;
use crate::domain::JobFileError;

/// Production `JobStore` reading the local filesystem.
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalJobStore;

impl JobStore for LocalJobStore {
    fn job_files(&self, dir: &Path, matches: &dyn Fn(&str) -> bool) -> Result<Vec<PathBuf>> {
        let entries =
            std::fs::read_dir(dir).with_context(|| format!("listing {}", dir.display()))?;

        let mut files = Vec::new();
        for entry in entries {
            let entry = entry.with_context(|| format!("listing {}", dir.display()))?;
            let file_name = entry.file_name();
            let Some(name) = file_name.to_str() else {
                continue;
            };
            if !matches(name) {
                continue;
            }
            let path = entry.path();
            // Follows symlinks: a link to a regular file counts, anything else is skipped.
            match std::fs::metadata(&path) {
                Ok(meta) if meta.is_file() => files.push(path),
                Ok(_) => tracing::debug!(path = %path.display(), "skipping non-regular entry"),
                Err(e) => {
                    tracing::debug!(path = %path.display(), error = %e, "skipping unreadable entry");
                }
            }
        }
        Ok(files)
    }

    fn read_cleanable_job(&self, path: &Path) -> Result<CleanableJob, JobFileError> {
        let file = File::open(path).map_err(|source| JobFileError::Open {
            path: path.to_path_buf(),
            source,
        })?;
        read_json(file, path)
    }

    fn working_directory_exists(&self, dir: &Path) -> bool {
        match File::open(dir) {
            Ok(_) => true,
            Err(e) => {
                tracing::debug!(dir = %dir.display(), error = %e, "working directory not openable");
                false
            }
        }
    }

    fn read_running_job(&self, path: &Path) -> Result<Option<RunningJob>, JobFileError> {
        let file = match File::open(path) {
            Ok(file) => file,
            Err(e) => {
                tracing::debug!(path = %path.display(), error = %e, "running job file not openable");
                return Ok(None);
            }
        };
        read_json(file, path).map(Some)
    }
}

fn read_json<T: DeserializeOwned>(mut file: File, path: &Path) -> Result<T, JobFileError> {
    let mut buf = Vec::new();
    file.read_to_end(&mut buf)
        .map_err(|source| JobFileError::Read {
            path: path.to_path_buf(),
            source,
        })?;
    serde_json::from_slice(&buf).map_err(|source| JobFileError::Parse {
        path: path.to_path_buf(),
        source,
    })
}
