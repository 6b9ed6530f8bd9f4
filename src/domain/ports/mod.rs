//! Domain Ports (Interfaces)
//!
//! These traits define the boundaries of the engine.
//! Infrastructure layer provides concrete implementations.

pub mod change_source;
pub mod file_system;
pub mod style_compiler;

pub use change_source::{ChangeKind, ChangeNotice, ChangeSource, WatchStrategy};
pub use file_system::{DirEntry, EntryKind, FileSystem, FsResult};
pub use style_compiler::{CompileError, StyleCompiler};
