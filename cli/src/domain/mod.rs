//! Domain layer: pure business logic, types, and validation.
//!
//! This module has zero imports from `crate::infra`, `crate::application`,
//! `tokio`, `std::fs`, or `std::process`. All functions are synchronous and
//! take data in, returning data out.

pub mod config;
pub mod error;
pub mod removability;
pub mod report;
pub mod verdict;

pub use config::{ConfigLayer, JanitorConfig};
pub use error::{ConfigError, JobFileError, RuntimeError};
pub use removability::RemovabilityTable;
pub use report::{CycleReport, RemovalFailure, SkipReason};
pub use verdict::{JobOutcome, JobVerdict};
