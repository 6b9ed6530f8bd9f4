//! Per-directory subscription tree
//!
//! Used when the backend cannot watch recursively. Every directory under
//! the root gets its own non-recursive registration at subscribe time, and
//! directories created later are registered as their create notices arrive.
//! Symlinked directories are not followed, so coverage never leaves the root.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::mpsc::Sender;

use notify::RecursiveMode;
use tracing::{debug, warn};

use super::NotifyBackend;
use crate::domain::ports::change_source::{ChangeKind, ChangeNotice, ChangeSource, WatchStrategy};
use crate::error::{ComponentError, ComponentResult};

#[derive(Default)]
pub struct DirectoryTreeSource {
    root: Option<PathBuf>,
    backend: Option<NotifyBackend>,
}

impl DirectoryTreeSource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `dir` and every directory below it, returning how many were new
    fn watch_tree(&mut self, dir: &Path) -> ComponentResult<usize> {
        let Some(backend) = self.backend.as_mut() else {
            return Ok(0);
        };

        let mut added = 0;
        let mut stack = vec![dir.to_path_buf()];
        while let Some(current) = stack.pop() {
            match backend.watch(&current, RecursiveMode::NonRecursive) {
                Ok(true) => added += 1,
                Ok(false) => {}
                // vanished between listing and registering
                Err(e) if !current.exists() => {
                    debug!(path = %current.display(), error = %e, "directory disappeared");
                    continue;
                }
                Err(e) => return Err(e),
            }

            let entries = match fs::read_dir(&current) {
                Ok(entries) => entries,
                Err(e) => {
                    warn!(path = %current.display(), error = %e, "cannot list directory");
                    continue;
                }
            };
            for entry in entries.flatten() {
                let is_real_dir = entry
                    .file_type()
                    .map(|t| t.is_dir() && !t.is_symlink())
                    .unwrap_or(false);
                if is_real_dir {
                    stack.push(entry.path());
                }
            }
        }
        Ok(added)
    }
}

impl ChangeSource for DirectoryTreeSource {
    fn strategy(&self) -> WatchStrategy {
        WatchStrategy::PerDirectory
    }

    fn subscribe(&mut self, root: &Path, sink: Sender<ChangeNotice>) -> ComponentResult<()> {
        if !root.is_dir() {
            return Err(ComponentError::Watch {
                path: root.to_path_buf(),
                message: "not a directory".to_string(),
            });
        }
        self.backend = Some(NotifyBackend::new(root, sink)?);
        self.root = Some(root.to_path_buf());
        let added = self.watch_tree(root)?;
        debug!(root = %root.display(), directories = added, "watching each directory");
        Ok(())
    }

    fn extend(&mut self, notice: &ChangeNotice) -> ComponentResult<usize> {
        if !matches!(
            notice.kind,
            ChangeKind::Create | ChangeKind::Rename | ChangeKind::Other
        ) {
            return Ok(0);
        }
        let inside = self
            .root
            .as_ref()
            .is_some_and(|root| notice.path.starts_with(root));
        let is_real_dir = fs::symlink_metadata(&notice.path)
            .map(|m| m.is_dir())
            .unwrap_or(false);
        if !inside || !is_real_dir {
            return Ok(0);
        }

        let added = self.watch_tree(&notice.path)?;
        if added > 0 {
            debug!(path = %notice.path.display(), added, "extended directory subscriptions");
        }
        Ok(added)
    }

    fn unsubscribe(&mut self) -> usize {
        self.root = None;
        self.backend
            .take()
            .map(|mut backend| backend.release_all())
            .unwrap_or(0)
    }

    fn handle_count(&self) -> usize {
        self.backend.as_ref().map(NotifyBackend::len).unwrap_or(0)
    }
}
