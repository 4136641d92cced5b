//! Infrastructure layer: concrete implementations of application port traits.
//!
//! This module contains all I/O-performing code: process execution, docker
//! invocation, filesystem access, and config file loading.
//!
//! Imports from `crate::domain` and `crate::application::ports` are allowed.

pub mod command_runner;
pub mod config;
pub mod docker;
pub mod job_store;
pub mod memory;

pub use command_runner::TokioCommandRunner;
pub use docker::DockerCli;
pub use job_store::LocalJobStore;
pub use memory::InMemoryRuntime;
