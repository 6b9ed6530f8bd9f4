//! Rebuild coordinator
//!
//! Session states: `Idle -> Watching -> TearingDown -> Idle`.
//!
//! While watching, each change notice goes through the same steps:
//!
//! 1. new directories extend the change source's coverage (per-directory mode)
//! 2. files with irrelevant extensions are dropped quietly
//! 3. paths outside the source root are dropped and logged
//! 4. the path is resolved to a component and its debounce deadline is
//!    (re)scheduled
//!
//! Due rebuilds are replayed into a [`Rebuilder`], which for real sessions is
//! the same [`ComponentAssembler`] the full build used.
//!
//! Time is passed in explicitly so the debounce behavior can be tested
//! without sleeping; only [`RebuildCoordinator::pump`] reads the clock.

use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::{channel, Receiver, RecvTimeoutError};
use std::sync::Arc;
use std::time::{Duration, Instant};

use tracing::{debug, error, info, warn};

use super::event::{BuildEvent, POLL_INTERVAL};
use super::timeouts::RebuildTimeouts;
use crate::assembler::ComponentAssembler;
use crate::domain::ports::change_source::{ChangeNotice, ChangeSource};
use crate::domain::ports::file_system::FileSystem;
use crate::error::{ComponentError, ComponentResult};
use crate::models::{AssembledComponent, ComponentIdentity};
use crate::tree::{SourceBoundary, TreeResolver};

/// Something that can rebuild one component on demand
pub trait Rebuilder {
    /// Rebuild `identity`; `Ok(None)` when it has nothing on disk to assemble
    fn rebuild(
        &mut self,
        identity: &ComponentIdentity,
    ) -> ComponentResult<Option<AssembledComponent>>;
}

impl<F: FileSystem> Rebuilder for ComponentAssembler<F> {
    fn rebuild(
        &mut self,
        identity: &ComponentIdentity,
    ) -> ComponentResult<Option<AssembledComponent>> {
        self.assemble_if_present(identity)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Idle,
    Watching,
    TearingDown,
}

/// What happened to one change notice
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChangeOutcome {
    /// No session is watching
    Inactive,
    /// Extension is not one of the watched part extensions
    Irrelevant,
    /// Path lies outside the source root
    OutsideBoundary,
    /// Inside the root but not addressable as a component (the root itself,
    /// a root file that is not a part)
    Unresolved,
    Scheduled {
        identity: ComponentIdentity,
        /// An earlier pending rebuild of the same component was replaced
        replaced: bool,
    },
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TeardownReport {
    pub watchers_released: usize,
    pub timers_cancelled: usize,
}

#[derive(Debug, Clone)]
pub struct CoordinatorOptions {
    pub debounce: Duration,
    /// Part extensions that trigger rebuilds, without the leading dot
    pub extensions: Vec<String>,
}

impl Default for CoordinatorOptions {
    fn default() -> Self {
        Self {
            debounce: Duration::from_millis(super::event::DEFAULT_DEBOUNCE_MS),
            extensions: vec!["liquid".into(), "scss".into(), "js".into()],
        }
    }
}

type EventSink = Box<dyn Fn(BuildEvent)>;

pub struct RebuildCoordinator {
    resolver: TreeResolver,
    boundary: SourceBoundary,
    options: CoordinatorOptions,
    state: SessionState,
    timeouts: RebuildTimeouts,
    source: Option<Box<dyn ChangeSource>>,
    notices: Option<Receiver<ChangeNotice>>,
    emit: EventSink,
}

impl RebuildCoordinator {
    pub fn new(resolver: &TreeResolver, options: CoordinatorOptions) -> Self {
        let boundary = SourceBoundary::new(resolver.source_root());
        // resolve against the same normalized root the boundary reports paths under
        let resolver = TreeResolver::new(boundary.root(), resolver.output_root());
        Self {
            resolver,
            boundary,
            options,
            state: SessionState::Idle,
            timeouts: RebuildTimeouts::new(),
            source: None,
            notices: None,
            emit: Box::new(|_| {}),
        }
    }

    /// Route events to `sink` instead of dropping them
    pub fn with_events(mut self, sink: impl Fn(BuildEvent) + 'static) -> Self {
        self.emit = Box::new(sink);
        self
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn pending(&self) -> usize {
        self.timeouts.len()
    }

    pub fn watcher_count(&self) -> usize {
        self.source.as_ref().map(|s| s.handle_count()).unwrap_or(0)
    }

    /// Move from `Idle` to `Watching` by subscribing `source` to the source root.
    ///
    /// Returns `Ok(false)` without touching `source` if already watching.
    pub fn start(&mut self, mut source: Box<dyn ChangeSource>) -> ComponentResult<bool> {
        if self.state != SessionState::Idle {
            debug!(state = ?self.state, "watch already started");
            return Ok(false);
        }

        let (tx, rx) = channel();
        source.subscribe(self.boundary.root(), tx)?;

        let event = BuildEvent::WatchStarted {
            source: self.boundary.root().display().to_string(),
            strategy: source.strategy().to_string(),
            watchers: source.handle_count(),
        };
        info!(
            root = %self.boundary.root().display(),
            strategy = %source.strategy(),
            watchers = source.handle_count(),
            "watching for changes"
        );

        self.source = Some(source);
        self.notices = Some(rx);
        self.state = SessionState::Watching;
        (self.emit)(event);
        Ok(true)
    }

    /// Handle a notice from the change source, extending coverage first
    pub fn handle_notice(&mut self, notice: &ChangeNotice, now: Instant) -> ChangeOutcome {
        if let Some(source) = self.source.as_mut() {
            if let Err(e) = source.extend(notice) {
                warn!(path = %notice.path.display(), error = %e, "could not watch new directory");
            }
        }
        self.handle_change(&notice.path, now)
    }

    /// Filter, bound-check and resolve one changed path, then debounce it
    pub fn handle_change(&mut self, path: &Path, now: Instant) -> ChangeOutcome {
        if self.state != SessionState::Watching {
            return ChangeOutcome::Inactive;
        }

        // bound-check before filtering: an escape is reported whatever its extension
        let contained = match self.boundary.contain(path) {
            Ok(contained) => contained,
            Err(e) => {
                warn!(path = %path.display(), "ignoring change outside the source root");
                (self.emit)(BuildEvent::ChangeIgnored {
                    path: path.display().to_string(),
                    reason: e.to_string(),
                });
                return ChangeOutcome::OutsideBoundary;
            }
        };

        if !self.is_relevant(path) {
            return ChangeOutcome::Irrelevant;
        }

        let Some(identity) = self.resolver.resolve(&contained) else {
            let relative = self.relative(&contained);
            debug!(path = %relative, "change does not belong to a component");
            (self.emit)(BuildEvent::ChangeIgnored {
                path: relative,
                reason: "not part of any component".to_string(),
            });
            return ChangeOutcome::Unresolved;
        };

        let relative = self.relative(&contained);
        debug!(path = %relative, component = %identity.name, "change scheduled");
        (self.emit)(BuildEvent::FileChanged {
            path: relative,
            component: identity.name.clone(),
        });

        let replaced =
            self.timeouts
                .schedule(identity.clone(), contained, now, self.options.debounce);
        ChangeOutcome::Scheduled { identity, replaced }
    }

    pub fn next_deadline(&self) -> Option<Instant> {
        self.timeouts.next_deadline()
    }

    /// Run every rebuild whose debounce window has elapsed by `now`.
    ///
    /// Returns how many rebuilds were attempted. A failed rebuild is logged
    /// and reported; it never ends the session.
    pub fn fire_due(&mut self, now: Instant, rebuilder: &mut impl Rebuilder) -> usize {
        let due = self.timeouts.take_due(now);
        let attempted = due.len();

        for pending in due {
            let name = pending.identity.name.clone();
            match rebuilder.rebuild(&pending.identity) {
                Ok(Some(assembled)) => {
                    (self.emit)(BuildEvent::RebuildComplete {
                        component: name,
                        document: assembled.document.display().to_string(),
                        events: pending.events,
                    });
                }
                Ok(None) => {
                    info!(component = %name, "nothing left to assemble");
                    (self.emit)(BuildEvent::ChangeIgnored {
                        path: self.relative(&pending.trigger),
                        reason: format!("component '{name}' has no parts on disk"),
                    });
                }
                Err(e) => {
                    error!(component = %name, error = %e, "rebuild failed");
                    (self.emit)(BuildEvent::Error {
                        message: format!("{name}: {e}"),
                    });
                }
            }
        }
        attempted
    }

    /// Wait up to `max_wait` (less if a deadline comes sooner) for notices,
    /// handle them, then fire due rebuilds
    pub fn pump(
        &mut self,
        rebuilder: &mut impl Rebuilder,
        max_wait: Duration,
    ) -> ComponentResult<usize> {
        let mut rebuilt = 0;
        let Some(notices) = self.notices.take() else {
            return Ok(0);
        };

        let wait = self
            .next_deadline()
            .map(|deadline| deadline.saturating_duration_since(Instant::now()))
            .map_or(max_wait, |until| until.min(max_wait));

        let received = notices.recv_timeout(wait);
        let result = match received {
            Ok(notice) => {
                let mut batch = vec![notice];
                batch.extend(notices.try_iter());
                for notice in &batch {
                    // overdue rebuilds must not be pushed back by a later notice
                    rebuilt += self.fire_due(Instant::now(), rebuilder);
                    self.handle_notice(notice, Instant::now());
                }
                Ok(())
            }
            Err(RecvTimeoutError::Timeout) => Ok(()),
            Err(RecvTimeoutError::Disconnected) => Err(ComponentError::Watch {
                path: self.boundary.root().to_path_buf(),
                message: "change notifications stopped".to_string(),
            }),
        };
        self.notices = Some(notices);
        result?;

        rebuilt += self.fire_due(Instant::now(), rebuilder);
        Ok(rebuilt)
    }

    /// Pump until `running` is cleared, then tear down
    pub fn run(
        &mut self,
        rebuilder: &mut impl Rebuilder,
        running: Arc<AtomicBool>,
    ) -> ComponentResult<TeardownReport> {
        while running.load(Ordering::SeqCst) && self.state == SessionState::Watching {
            if let Err(e) = self.pump(rebuilder, POLL_INTERVAL) {
                (self.emit)(BuildEvent::Error {
                    message: e.to_string(),
                });
                self.teardown();
                return Err(e);
            }
        }
        Ok(self.teardown())
    }

    /// Release every subscription and cancel every pending rebuild.
    ///
    /// Leaves the coordinator `Idle`, so a later `start` may watch again.
    pub fn teardown(&mut self) -> TeardownReport {
        if self.state == SessionState::Idle && self.source.is_none() {
            return TeardownReport::default();
        }
        self.state = SessionState::TearingDown;

        let report = TeardownReport {
            watchers_released: self
                .source
                .take()
                .map(|mut source| source.unsubscribe())
                .unwrap_or(0),
            timers_cancelled: self.timeouts.cancel_all(),
        };
        self.notices = None;
        self.state = SessionState::Idle;

        info!(
            watchers = report.watchers_released,
            timers = report.timers_cancelled,
            "stopped watching"
        );
        (self.emit)(BuildEvent::Shutdown {
            watchers_released: report.watchers_released,
            timers_cancelled: report.timers_cancelled,
        });
        report
    }

    fn is_relevant(&self, path: &Path) -> bool {
        path.extension()
            .and_then(|e| e.to_str())
            .is_some_and(|ext| self.options.extensions.iter().any(|e| e == ext))
    }

    fn relative(&self, path: &Path) -> String {
        let relative: PathBuf = path
            .strip_prefix(self.boundary.root())
            .map(Path::to_path_buf)
            .unwrap_or_else(|_| path.to_path_buf());
        relative.display().to_string()
    }
}

impl Drop for RebuildCoordinator {
    fn drop(&mut self) {
        if self.source.is_some() {
            self.teardown();
        }
    }
}
