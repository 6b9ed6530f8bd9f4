//! Common test utilities for CLI and scenario tests.
//!
//! This module provides:
//! - `TestEnv`: isolated project directory plus helpers to run the CLI
//! - Fixtures: reusable component sources

#![allow(dead_code)]

pub mod env;
pub mod fixtures;

pub use env::*;
pub use fixtures::*;
