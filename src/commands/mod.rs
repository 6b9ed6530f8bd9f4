pub mod build;
pub mod components;
mod project_root;
pub mod resolve;
pub mod watch;

use anyhow::{Context, Result};
use shopify_components::config::Config;

use crate::cli::Cli;
use crate::ui::output::print_config_warnings;

/// Resolve the effective configuration for this invocation.
///
/// File and environment paths are relative to the project root; paths given
/// on the command line are relative to the current directory.
pub fn load_config(cli: &Cli) -> Result<Config> {
    let cwd = std::env::current_dir().context("cannot determine the current directory")?;
    let project_root = match &cli.config {
        Some(_) => cwd.clone(),
        None => project_root::discover_project_root(&cwd),
    };

    let (config, warnings) = Config::discover(&project_root, cli.config.as_deref())?;
    print_config_warnings(&warnings);

    Ok(config
        .resolve_paths(&project_root)
        .with_overrides(&cli.overrides())
        .resolve_paths(&cwd))
}
