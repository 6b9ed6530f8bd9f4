//! Configuration loading

use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use crate::domain::ports::change_source::WatchStrategy;
use crate::error::{ComponentError, ComponentResult};

use super::types::Config;

/// Project configuration file name
pub const PROJECT_CONFIG_FILE: &str = "components.toml";
/// Prefix of environment variable overrides
pub const ENV_PREFIX: &str = "SHOPIFY_COMPONENTS_";

/// Non-fatal configuration warning surfaced to CLI users.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigWarning {
    pub key: String,
    pub file: PathBuf,
    pub line: Option<usize>,
    pub suggestion: Option<String>,
}

/// Load configuration and collect non-fatal warnings (e.g. unknown keys).
pub fn load_with_warnings(path: &Path) -> ComponentResult<(Config, Vec<ConfigWarning>)> {
    let content = fs::read_to_string(path).map_err(|e| ComponentError::Config {
        file: path.to_path_buf(),
        message: e.to_string(),
    })?;

    let mut unknown_paths: Vec<String> = Vec::new();
    let deserializer = toml::de::Deserializer::new(&content);

    let config: Config = serde_ignored::deserialize(deserializer, |p| {
        unknown_paths.push(p.to_string());
    })
    .map_err(|e| ComponentError::Config {
        file: path.to_path_buf(),
        message: e.to_string(),
    })?;

    let warnings = unknown_paths
        .into_iter()
        .map(|path_str| {
            let key = path_str
                .split('.')
                .next_back()
                .unwrap_or(path_str.as_str())
                .to_string();
            ConfigWarning {
                key: key.clone(),
                file: path.to_path_buf(),
                line: find_line_number(&content, &key),
                suggestion: suggest_key(&key),
            }
        })
        .collect();

    // Paths in a config file are relative to the file
    let base = path.parent().unwrap_or_else(|| Path::new(""));
    Ok((config.resolve_paths(base), warnings))
}

/// Explicit file, else project file, else user file, else defaults; then env
pub fn discover(
    project_root: &Path,
    explicit: Option<&Path>,
) -> ComponentResult<(Config, Vec<ConfigWarning>)> {
    let candidate = match explicit {
        Some(path) if path.is_absolute() => Some(path.to_path_buf()),
        Some(path) => Some(project_root.join(path)),
        None => [Some(project_root.join(PROJECT_CONFIG_FILE)), user_config_path()]
            .into_iter()
            .flatten()
            .find(|p| p.is_file()),
    };

    let (config, warnings) = match candidate {
        Some(path) => {
            debug!(path = %path.display(), "loading configuration");
            load_with_warnings(&path)?
        }
        None => (Config::default(), Vec::new()),
    };

    Ok((config.with_env_overrides(), warnings))
}

/// `<config dir>/shopify-components/config.toml`
pub fn user_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("shopify-components").join("config.toml"))
}

/// Apply `SHOPIFY_COMPONENTS_*` overrides read through `lookup`
pub fn with_env_overrides(mut config: Config, lookup: impl Fn(&str) -> Option<String>) -> Config {
    let var = |name: &str| lookup(&format!("{ENV_PREFIX}{name}")).filter(|v| !v.trim().is_empty());

    if let Some(src) = var("SRC_DIR") {
        config.src_dir = PathBuf::from(src);
    }
    if let Some(out) = var("OUTPUT_DIR") {
        config.output_dir = PathBuf::from(out);
    }
    if let Some(assets) = var("ASSETS_DIR") {
        config.assets_dir = Some(PathBuf::from(assets));
    }

    if let Some(delay) = var("DEBOUNCE_MS") {
        match delay.trim().parse::<u64>() {
            Ok(ms) => config.debounce_delay = ms,
            Err(_) => warn!(
                value = %delay,
                "{ENV_PREFIX}DEBOUNCE_MS is not a number of milliseconds, ignoring"
            ),
        }
    }

    if let Some(watch) = var("WATCH") {
        match parse_flag(&watch) {
            Some(flag) => config.watch_mode = flag,
            None => warn!(value = %watch, "{ENV_PREFIX}WATCH is not a boolean, ignoring"),
        }
    }

    if let Some(strategy) = var("WATCH_STRATEGY") {
        match strategy.trim().to_lowercase().as_str() {
            "auto" => config.watch.strategy = WatchStrategy::Auto,
            "recursive" => config.watch.strategy = WatchStrategy::Recursive,
            "per-directory" | "per_directory" => {
                config.watch.strategy = WatchStrategy::PerDirectory
            }
            other => warn!(
                value = %other,
                "{ENV_PREFIX}WATCH_STRATEGY must be auto, recursive or per-directory, ignoring"
            ),
        }
    }

    config
}

fn parse_flag(value: &str) -> Option<bool> {
    match value.trim().to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

fn find_line_number(content: &str, needle: &str) -> Option<usize> {
    for (i, line) in content.lines().enumerate() {
        if line.contains(needle) {
            return Some(i + 1);
        }
    }
    None
}

fn suggest_key(unknown: &str) -> Option<String> {
    const CANDIDATES: &[&str] = &[
        "src_dir",
        "output_dir",
        "assets_dir",
        "watch_mode",
        "debounce_delay",
        "style",
        "compiler",
        "schema",
        "evaluate",
        "watch",
        "strategy",
        "extensions",
    ];

    let mut best: Option<(&str, usize)> = None;
    for candidate in CANDIDATES {
        let dist = levenshtein(unknown, candidate);
        best = match best {
            None => Some((candidate, dist)),
            Some((_, best_dist)) if dist < best_dist => Some((candidate, dist)),
            Some(current) => Some(current),
        };
    }

    match best {
        Some((candidate, dist)) if dist <= 2 => Some(candidate.to_string()),
        _ => None,
    }
}

fn levenshtein(a: &str, b: &str) -> usize {
    if a == b {
        return 0;
    }

    let a_bytes = a.as_bytes();
    let b_bytes = b.as_bytes();

    let mut prev: Vec<usize> = (0..=b_bytes.len()).collect();
    let mut curr = vec![0usize; b_bytes.len() + 1];

    for (i, &ac) in a_bytes.iter().enumerate() {
        curr[0] = i + 1;
        for (j, &bc) in b_bytes.iter().enumerate() {
            let cost = if ac == bc { 0 } else { 1 };
            curr[j + 1] =
                std::cmp::min(std::cmp::min(prev[j + 1] + 1, curr[j] + 1), prev[j] + cost);
        }
        prev.clone_from_slice(&curr);
    }

    prev[b_bytes.len()]
}
