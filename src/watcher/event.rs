//! Build and watch event types

use std::fmt;
use std::time::Duration;

/// Default debounce window in milliseconds
pub const DEFAULT_DEBOUNCE_MS: u64 = 100;

/// How often the watch loop re-checks the shutdown flag while idle
pub const POLL_INTERVAL: Duration = Duration::from_millis(50);

/// Build and watch events for human and NDJSON output
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum BuildEvent {
    BuildStarted {
        source: String,
    },
    ComponentBuilt {
        component: String,
        document: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        stylesheet: Option<String>,
    },
    ComponentFailed {
        component: String,
        message: String,
    },
    BuildComplete {
        built: usize,
        failed: usize,
    },
    WatchStarted {
        source: String,
        strategy: String,
        watchers: usize,
    },
    FileChanged {
        path: String,
        component: String,
    },
    ChangeIgnored {
        path: String,
        reason: String,
    },
    RebuildComplete {
        component: String,
        document: String,
        events: usize,
    },
    Error {
        message: String,
    },
    Shutdown {
        watchers_released: usize,
        timers_cancelled: usize,
    },
}

impl BuildEvent {
    pub fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_else(|_| "{}".to_string())
    }

    pub fn is_error(&self) -> bool {
        matches!(
            self,
            BuildEvent::ComponentFailed { .. } | BuildEvent::Error { .. }
        )
    }
}

impl fmt::Display for BuildEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BuildEvent::BuildStarted { source } => write!(f, "Building components from {source}"),
            BuildEvent::ComponentBuilt {
                component,
                document,
                stylesheet,
            } => {
                write!(f, "  built {component} -> {document}")?;
                if let Some(css) = stylesheet {
                    write!(f, " (+ {css})")?;
                }
                Ok(())
            }
            BuildEvent::ComponentFailed { component, message } => {
                write!(f, "  failed {component}: {message}")
            }
            BuildEvent::BuildComplete { built, failed } => {
                write!(f, "Built {built} component(s), {failed} failed")
            }
            BuildEvent::WatchStarted {
                source,
                strategy,
                watchers,
            } => write!(
                f,
                "Watching {source} ({strategy}, {watchers} watcher(s)). Press Ctrl+C to stop."
            ),
            BuildEvent::FileChanged { path, component } => {
                write!(f, "Changed {path} ({component})")
            }
            BuildEvent::ChangeIgnored { path, reason } => write!(f, "Ignored {path}: {reason}"),
            BuildEvent::RebuildComplete {
                component,
                document,
                events,
            } => write!(f, "Rebuilt {component} -> {document} ({events} change(s))"),
            BuildEvent::Error { message } => write!(f, "Error: {message}"),
            BuildEvent::Shutdown {
                watchers_released,
                timers_cancelled,
            } => write!(
                f,
                "Stopped watching ({watchers_released} watcher(s) released, {timers_cancelled} pending rebuild(s) cancelled)"
            ),
        }
    }
}
