//! Scenario tests.
//!
//! Scenarios drive the engine the way a host does (start, artifacts written,
//! shutdown) against a real source tree and real change notifications.
//!
//! Run with: cargo test --test scenarios

mod common;

#[path = "scenarios/session.rs"]
mod session;

#[path = "scenarios/incremental_rebuild.rs"]
mod incremental_rebuild;

#[path = "scenarios/new_directories.rs"]
mod new_directories;
