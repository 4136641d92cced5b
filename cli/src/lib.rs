//! netjanitor library, exposing modules for integration testing.

#![cfg_attr(test, allow(clippy::expect_used))]

pub mod application;
pub mod domain;
pub mod infra;
