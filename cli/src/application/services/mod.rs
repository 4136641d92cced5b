//! Application services: use-case orchestration.
//!
//! Each service module implements a single use-case by composing domain logic
//! with port trait calls. Services import only from `crate::domain` and
//! `crate::application::ports`, never from `crate::infra`.

pub mod classify;
pub mod reconcile;
pub mod scan;

pub use classify::{Classification, classify};
pub use reconcile::{CycleOptions, run_cycle, run_loop};
pub use scan::{JobFile, scan_job_dir};
