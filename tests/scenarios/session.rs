//! Helpers shared by watch scenarios.

use std::cell::RefCell;
use std::path::{Path, PathBuf};
use std::rc::Rc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

use shopify_components::config::{Config, StyleConfig, WatchConfig};
use shopify_components::domain::ports::WatchStrategy;
use shopify_components::{BuildEvent, ComponentsPlugin, TeardownReport};
use tempfile::TempDir;

/// Settle time after subscribing and after the last edit
pub const SETTLE: Duration = Duration::from_millis(400);

pub struct Project {
    pub dir: TempDir,
}

impl Project {
    pub fn new(files: &[(&str, &str)]) -> Self {
        let dir = tempfile::tempdir().unwrap();
        let project = Self { dir };
        for (relative, content) in files {
            write(&project.path(relative), content);
        }
        project
    }

    /// Canonical, so notify reports paths under the configured prefix
    pub fn root(&self) -> PathBuf {
        self.dir.path().canonicalize().unwrap()
    }

    pub fn path(&self, relative: &str) -> PathBuf {
        self.root().join(relative)
    }

    pub fn read(&self, relative: &str) -> String {
        std::fs::read_to_string(self.path(relative)).unwrap()
    }

    pub fn config(&self, strategy: WatchStrategy, debounce_ms: u64) -> Config {
        Config {
            src_dir: self.path("src"),
            output_dir: self.path("out"),
            watch_mode: true,
            debounce_delay: debounce_ms,
            style: StyleConfig { compiler: vec![] },
            watch: WatchConfig {
                strategy,
                ..WatchConfig::default()
            },
            ..Config::default()
        }
    }
}

pub fn write(path: &Path, content: &str) {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).unwrap();
    }
    std::fs::write(path, content).unwrap();
}

pub struct SessionOutcome {
    pub events: Vec<BuildEvent>,
    pub teardown: TeardownReport,
}

impl SessionOutcome {
    pub fn rebuilds_of(&self, component: &str) -> usize {
        self.events
            .iter()
            .filter(|e| matches!(e, BuildEvent::RebuildComplete { component: c, .. } if c == component))
            .count()
    }
}

/// Build, start watching, run `edits` on another thread, then shut down
pub fn watch_session(config: &Config, edits: impl FnOnce() + Send + 'static) -> SessionOutcome {
    let events = Rc::new(RefCell::new(Vec::new()));
    let sink = events.clone();
    let mut plugin =
        ComponentsPlugin::from_config(config).with_events(move |e| sink.borrow_mut().push(e));

    plugin.on_start().unwrap();
    assert!(plugin.on_artifacts_written().unwrap());

    let running = Arc::new(AtomicBool::new(true));
    let stop = running.clone();
    let editor = thread::spawn(move || {
        thread::sleep(SETTLE);
        edits();
        thread::sleep(SETTLE * 3);
        stop.store(false, Ordering::SeqCst);
    });

    let teardown = plugin.watch_until(running).unwrap();
    editor.join().unwrap();

    let events = events.borrow().clone();
    SessionOutcome { events, teardown }
}
