//! Watch mode
//!
//! Implements incremental rebuilds with:
//! - per-component debouncing (100ms by default)
//! - source-root boundary enforcement
//! - recursive or per-directory change sources behind one port
//! - graceful Ctrl+C shutdown
//! - NDJSON output for CI

mod coordinator;
mod event;
mod timeouts;

pub use coordinator::{
    ChangeOutcome, CoordinatorOptions, RebuildCoordinator, Rebuilder, SessionState, TeardownReport,
};
pub use event::{BuildEvent, DEFAULT_DEBOUNCE_MS, POLL_INTERVAL};
pub use timeouts::{PendingRebuild, RebuildTimeouts};
