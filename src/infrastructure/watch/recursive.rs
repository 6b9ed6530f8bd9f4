//! Native recursive subscription on the source root

use std::path::Path;
use std::sync::mpsc::Sender;

use notify::RecursiveMode;
use tracing::debug;

use super::NotifyBackend;
use crate::domain::ports::change_source::{ChangeNotice, ChangeSource, WatchStrategy};
use crate::error::ComponentResult;

#[derive(Default)]
pub struct RecursiveSource {
    backend: Option<NotifyBackend>,
}

impl RecursiveSource {
    pub fn new() -> Self {
        Self::default()
    }
}

impl ChangeSource for RecursiveSource {
    fn strategy(&self) -> WatchStrategy {
        WatchStrategy::Recursive
    }

    fn subscribe(&mut self, root: &Path, sink: Sender<ChangeNotice>) -> ComponentResult<()> {
        let mut backend = NotifyBackend::new(root, sink)?;
        backend.watch(root, RecursiveMode::Recursive)?;
        debug!(root = %root.display(), "watching recursively");
        self.backend = Some(backend);
        Ok(())
    }

    fn unsubscribe(&mut self) -> usize {
        self.backend
            .take()
            .map(|mut backend| backend.release_all())
            .unwrap_or(0)
    }

    fn handle_count(&self) -> usize {
        self.backend.as_ref().map(NotifyBackend::len).unwrap_or(0)
    }
}
