//! notify-backed change sources
//!
//! Both sources own a single `RecommendedWatcher` whose callback forwards
//! notices into the coordinator's channel. They differ only in how they
//! cover the tree:
//!
//! - [`RecursiveSource`] registers the source root once, recursively
//! - [`DirectoryTreeSource`] registers every directory non-recursively and
//!   extends coverage as directories are created
//!
//! Every registered path is tracked in a [`WatcherSet`] so teardown can
//! release each one exactly once.

mod directory_tree;
mod recursive;

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};
use std::sync::mpsc::Sender;

use notify::event::ModifyKind;
use notify::{Config, Event, EventKind, RecommendedWatcher, RecursiveMode, Watcher};
use tracing::{debug, warn};

use crate::domain::ports::change_source::{ChangeKind, ChangeNotice, ChangeSource, WatchStrategy};
use crate::error::{ComponentError, ComponentResult};

pub use directory_tree::DirectoryTreeSource;
pub use recursive::RecursiveSource;

/// Registry of live subscriptions, keyed by watched path
#[derive(Debug, Default)]
pub struct WatcherSet {
    paths: BTreeSet<PathBuf>,
}

impl WatcherSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a subscription; `false` if `path` is already subscribed
    pub fn insert(&mut self, path: impl Into<PathBuf>) -> bool {
        self.paths.insert(path.into())
    }

    pub fn contains(&self, path: &Path) -> bool {
        self.paths.contains(path)
    }

    pub fn len(&self) -> usize {
        self.paths.len()
    }

    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }

    /// Remove every subscription, handing each path out exactly once
    pub fn drain(&mut self) -> Vec<PathBuf> {
        std::mem::take(&mut self.paths).into_iter().collect()
    }
}

/// Map a notify event kind onto the port's simplified kinds
pub(crate) fn change_kind(kind: &EventKind) -> ChangeKind {
    match kind {
        EventKind::Create(_) => ChangeKind::Create,
        EventKind::Modify(ModifyKind::Name(_)) => ChangeKind::Rename,
        EventKind::Modify(_) => ChangeKind::Modify,
        EventKind::Remove(_) => ChangeKind::Remove,
        _ => ChangeKind::Other,
    }
}

/// One notify watcher plus the paths registered on it
pub(crate) struct NotifyBackend {
    watcher: RecommendedWatcher,
    subscriptions: WatcherSet,
}

impl NotifyBackend {
    /// Create a watcher that forwards every non-access event into `sink`
    pub(crate) fn new(root: &Path, sink: Sender<ChangeNotice>) -> ComponentResult<Self> {
        let watcher = RecommendedWatcher::new(
            move |res: Result<Event, notify::Error>| match res {
                Ok(event) => {
                    // reads and closes are noise for a build tool
                    if matches!(event.kind, EventKind::Access(_)) {
                        return;
                    }
                    let kind = change_kind(&event.kind);
                    for path in event.paths {
                        let _ = sink.send(ChangeNotice::new(path, kind));
                    }
                }
                Err(e) => warn!(error = %e, "file watcher reported an error"),
            },
            Config::default(),
        )
        .map_err(|e| watch_error(root, e))?;

        Ok(Self {
            watcher,
            subscriptions: WatcherSet::new(),
        })
    }

    /// Register `path`; returns `false` if it was already registered
    pub(crate) fn watch(&mut self, path: &Path, mode: RecursiveMode) -> ComponentResult<bool> {
        if self.subscriptions.contains(path) {
            return Ok(false);
        }
        self.watcher
            .watch(path, mode)
            .map_err(|e| watch_error(path, e))?;
        self.subscriptions.insert(path);
        Ok(true)
    }

    pub(crate) fn len(&self) -> usize {
        self.subscriptions.len()
    }

    /// Unregister every path, returning how many were released
    pub(crate) fn release_all(&mut self) -> usize {
        let paths = self.subscriptions.drain();
        for path in &paths {
            // A directory deleted while watched is already gone from the backend
            if let Err(e) = self.watcher.unwatch(path) {
                debug!(path = %path.display(), error = %e, "unwatch failed");
            }
        }
        paths.len()
    }
}

fn watch_error(path: &Path, e: notify::Error) -> ComponentError {
    ComponentError::Watch {
        path: path.to_path_buf(),
        message: e.to_string(),
    }
}

/// Recursive when the backend allows it, per-directory otherwise
#[derive(Default)]
pub struct AutoSource {
    active: Option<Box<dyn ChangeSource>>,
}

impl AutoSource {
    pub fn new() -> Self {
        Self::default()
    }
}

impl ChangeSource for AutoSource {
    fn strategy(&self) -> WatchStrategy {
        self.active
            .as_ref()
            .map(|s| s.strategy())
            .unwrap_or(WatchStrategy::Auto)
    }

    fn subscribe(&mut self, root: &Path, sink: Sender<ChangeNotice>) -> ComponentResult<()> {
        let mut recursive = RecursiveSource::new();
        match recursive.subscribe(root, sink.clone()) {
            Ok(()) => {
                self.active = Some(Box::new(recursive));
            }
            Err(e) => {
                warn!(error = %e, "recursive watching unavailable, watching each directory");
                let mut tree = DirectoryTreeSource::new();
                tree.subscribe(root, sink)?;
                self.active = Some(Box::new(tree));
            }
        }
        Ok(())
    }

    fn extend(&mut self, notice: &ChangeNotice) -> ComponentResult<usize> {
        match self.active.as_mut() {
            Some(source) => source.extend(notice),
            None => Ok(0),
        }
    }

    fn unsubscribe(&mut self) -> usize {
        self.active
            .take()
            .map(|mut source| source.unsubscribe())
            .unwrap_or(0)
    }

    fn handle_count(&self) -> usize {
        self.active.as_ref().map(|s| s.handle_count()).unwrap_or(0)
    }
}

/// Change source for a configured strategy
pub fn select_change_source(strategy: WatchStrategy) -> Box<dyn ChangeSource> {
    match strategy {
        WatchStrategy::Auto => Box::new(AutoSource::new()),
        WatchStrategy::Recursive => Box::new(RecursiveSource::new()),
        WatchStrategy::PerDirectory => Box::new(DirectoryTreeSource::new()),
    }
}
