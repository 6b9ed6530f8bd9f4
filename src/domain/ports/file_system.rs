//! FileSystem port - abstraction over file I/O operations
//!
//! The engine consumes directory listing, read, write and recursive mkdir
//! as capabilities so the addressing and assembly logic can be exercised
//! against an in-memory tree as well as the local disk.

use std::path::Path;

/// Result type for file system operations
pub type FsResult<T> = std::io::Result<T>;

/// Kind of a directory entry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    File,
    Dir,
}

/// A single directory listing entry
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirEntry {
    pub name: String,
    pub kind: EntryKind,
}

impl DirEntry {
    pub fn file(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: EntryKind::File,
        }
    }

    pub fn dir(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: EntryKind::Dir,
        }
    }

    pub fn is_dir(&self) -> bool {
        self.kind == EntryKind::Dir
    }

    pub fn is_file(&self) -> bool {
        self.kind == EntryKind::File
    }
}

/// Abstract file system interface
///
/// Implementations:
/// - `LocalFs` - standard file I/O with atomic writes
/// - `MemoryFs` - in-memory tree for testing
pub trait FileSystem {
    /// Read file content as string
    fn read(&self, path: &Path) -> FsResult<String>;

    /// Write content to file, replacing any previous version in full
    fn write(&self, path: &Path, content: &str) -> FsResult<()>;

    /// Check if a file or directory exists
    fn exists(&self, path: &Path) -> bool;

    /// Check if path is an existing directory
    fn is_dir(&self, path: &Path) -> bool;

    /// List a directory, sorted by name
    fn list_dir(&self, path: &Path) -> FsResult<Vec<DirEntry>>;

    /// Create directory and parents; succeeds if it already exists
    fn create_dir_all(&self, path: &Path) -> FsResult<()>;
}
