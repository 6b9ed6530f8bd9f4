//! Configuration type definitions

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::domain::ports::change_source::WatchStrategy;
use crate::error::ComponentResult;
use crate::tree::normalize_lexically;

use super::loader::{self, ConfigWarning};

/// Stylesheet compiler configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StyleConfig {
    /// `[program, args...]` reading Sass on stdin and writing CSS to stdout.
    /// Empty means always use the structural fallback.
    #[serde(default = "default_compiler")]
    pub compiler: Vec<String>,
}

impl Default for StyleConfig {
    fn default() -> Self {
        Self {
            compiler: default_compiler(),
        }
    }
}

fn default_compiler() -> Vec<String> {
    ["sass", "--stdin", "--no-source-map", "--style=expanded"]
        .into_iter()
        .map(String::from)
        .collect()
}

/// Settings extraction configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SchemaConfig {
    /// Evaluate settings descriptions exactly before falling back to scanning
    #[serde(default = "default_true")]
    pub evaluate: bool,
}

impl Default for SchemaConfig {
    fn default() -> Self {
        Self { evaluate: true }
    }
}

/// Watch mode configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WatchConfig {
    #[serde(default)]
    pub strategy: WatchStrategy,

    /// Part extensions that trigger rebuilds, without the leading dot
    #[serde(default = "default_extensions")]
    pub extensions: Vec<String>,
}

impl Default for WatchConfig {
    fn default() -> Self {
        Self {
            strategy: WatchStrategy::default(),
            extensions: default_extensions(),
        }
    }
}

fn default_extensions() -> Vec<String> {
    vec!["liquid".to_string(), "scss".to_string(), "js".to_string()]
}

fn default_true() -> bool {
    true
}

fn default_src_dir() -> PathBuf {
    PathBuf::from("src")
}

fn default_output_dir() -> PathBuf {
    PathBuf::from("shopify_bundle")
}

fn default_debounce_delay() -> u64 {
    crate::watcher::DEFAULT_DEBOUNCE_MS
}

/// Main configuration structure
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Root of discoverable components
    #[serde(default = "default_src_dir")]
    pub src_dir: PathBuf,

    /// Root where composite documents land
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,

    /// Where stylesheet artifacts land; `<output_dir>/assets` when unset
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub assets_dir: Option<PathBuf>,

    /// Keep watching and rebuilding after the first build
    #[serde(default)]
    pub watch_mode: bool,

    /// Debounce window per component, in milliseconds
    #[serde(default = "default_debounce_delay")]
    pub debounce_delay: u64,

    #[serde(default)]
    pub style: StyleConfig,

    #[serde(default)]
    pub schema: SchemaConfig,

    #[serde(default)]
    pub watch: WatchConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            src_dir: default_src_dir(),
            output_dir: default_output_dir(),
            assets_dir: None,
            watch_mode: false,
            debounce_delay: default_debounce_delay(),
            style: StyleConfig::default(),
            schema: SchemaConfig::default(),
            watch: WatchConfig::default(),
        }
    }
}

/// Values given on the command line; `None` leaves the lower layers alone
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConfigOverrides {
    pub src_dir: Option<PathBuf>,
    pub output_dir: Option<PathBuf>,
    pub assets_dir: Option<PathBuf>,
    pub debounce_delay: Option<u64>,
    pub watch_mode: Option<bool>,
    pub strategy: Option<WatchStrategy>,
}

impl Config {
    /// Load configuration from a TOML file
    pub fn load(path: &Path) -> ComponentResult<Self> {
        let (config, _warnings) = loader::load_with_warnings(path)?;
        Ok(config)
    }

    /// Load configuration and collect non-fatal warnings (e.g. unknown keys).
    ///
    /// Relative paths in the file are resolved against the file's directory.
    pub fn load_with_warnings(path: &Path) -> ComponentResult<(Self, Vec<ConfigWarning>)> {
        loader::load_with_warnings(path)
    }

    /// Explicit file, project file, user file or defaults, then environment
    pub fn discover(
        project_root: &Path,
        explicit: Option<&Path>,
    ) -> ComponentResult<(Self, Vec<ConfigWarning>)> {
        loader::discover(project_root, explicit)
    }

    /// Apply environment variable overrides (SHOPIFY_COMPONENTS_* prefix)
    pub fn with_env_overrides(self) -> Self {
        loader::with_env_overrides(self, |key| std::env::var(key).ok())
    }

    /// Apply command line overrides
    pub fn with_overrides(mut self, overrides: &ConfigOverrides) -> Self {
        if let Some(src) = &overrides.src_dir {
            self.src_dir = src.clone();
        }
        if let Some(out) = &overrides.output_dir {
            self.output_dir = out.clone();
        }
        if let Some(assets) = &overrides.assets_dir {
            self.assets_dir = Some(assets.clone());
        }
        if let Some(delay) = overrides.debounce_delay {
            self.debounce_delay = delay;
        }
        if let Some(watch) = overrides.watch_mode {
            self.watch_mode = watch;
        }
        if let Some(strategy) = overrides.strategy {
            self.watch.strategy = strategy;
        }
        self
    }

    /// Make every path absolute against `base` and normalize it
    pub fn resolve_paths(mut self, base: &Path) -> Self {
        let absolute = |p: &Path| {
            if p.is_absolute() {
                normalize_lexically(p)
            } else {
                normalize_lexically(&base.join(p))
            }
        };
        self.src_dir = absolute(&self.src_dir);
        self.output_dir = absolute(&self.output_dir);
        self.assets_dir = self.assets_dir.as_deref().map(absolute);
        self
    }

    /// Effective assets directory
    pub fn assets_dir(&self) -> PathBuf {
        self.assets_dir
            .clone()
            .unwrap_or_else(|| self.output_dir.join("assets"))
    }

    pub fn debounce(&self) -> Duration {
        Duration::from_millis(self.debounce_delay)
    }
}
