//! Infrastructure Layer
//!
//! Concrete implementations of domain ports.
//! This layer handles all I/O operations.
//!
//! ## Structure
//!
//! - `fs/` - File system implementations (Local, in-memory for tests)
//! - `compiler` - External stylesheet compiler invoked as a subprocess
//! - `watch/` - notify-backed change sources (recursive, per-directory)

pub mod compiler;
pub mod fs;
pub mod watch;

// Re-export for convenience
pub use compiler::{CommandCompiler, NoCompiler};
pub use fs::LocalFs;
pub use watch::{
    select_change_source, AutoSource, DirectoryTreeSource, RecursiveSource, WatcherSet,
};
