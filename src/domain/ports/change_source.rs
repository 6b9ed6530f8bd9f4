//! ChangeSource port - filesystem change notification
//!
//! One contract, two implementations (native recursive subscription and a
//! per-directory subscription tree), selected once at setup time. The
//! rebuild coordinator is written against this trait only.

use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::mpsc::Sender;

use serde::{Deserialize, Serialize};

use crate::error::ComponentResult;

/// Simplified event kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ChangeKind {
    Create,
    Modify,
    Remove,
    Rename,
    Other,
}

/// A single changed path delivered by a change source
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChangeNotice {
    pub path: PathBuf,
    pub kind: ChangeKind,
}

impl ChangeNotice {
    pub fn new(path: impl Into<PathBuf>, kind: ChangeKind) -> Self {
        Self {
            path: path.into(),
            kind,
        }
    }
}

/// How a change source achieves coverage of the source tree
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum WatchStrategy {
    /// Try recursive first, fall back to per-directory
    #[default]
    Auto,
    /// One native recursive subscription on the source root
    Recursive,
    /// One subscription per directory, extended as directories appear
    PerDirectory,
}

impl fmt::Display for WatchStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            WatchStrategy::Auto => "auto",
            WatchStrategy::Recursive => "recursive",
            WatchStrategy::PerDirectory => "per-directory",
        };
        f.write_str(label)
    }
}

/// Change notification capability
pub trait ChangeSource {
    /// Strategy this source implements
    fn strategy(&self) -> WatchStrategy;

    /// Start delivering notices for everything under `root` into `sink`
    fn subscribe(&mut self, root: &Path, sink: Sender<ChangeNotice>) -> ComponentResult<()>;

    /// Extend coverage after a notice, returning how many subscriptions were added.
    ///
    /// Sources that already cover new directories keep the default.
    fn extend(&mut self, _notice: &ChangeNotice) -> ComponentResult<usize> {
        Ok(0)
    }

    /// Release every subscription handle, returning how many were released
    fn unsubscribe(&mut self) -> usize;

    /// Number of live subscription handles
    fn handle_count(&self) -> usize;
}
