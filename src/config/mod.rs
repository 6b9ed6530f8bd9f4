//! Configuration module
//!
//! Configuration hierarchy, highest priority first:
//! 1. CLI flags
//! 2. Environment variables (SHOPIFY_COMPONENTS_*)
//! 3. Config file (`--config`, else `components.toml` in the project root,
//!    else `<user config dir>/shopify-components/config.toml`)
//! 4. Built-in defaults

mod loader;
mod types;

pub use loader::{user_config_path, ConfigWarning, ENV_PREFIX, PROJECT_CONFIG_FILE};
pub use types::{Config, ConfigOverrides, SchemaConfig, StyleConfig, WatchConfig};
