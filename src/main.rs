//! Shopify Components CLI
//!
//! Usage: shopify-components <COMMAND>
//!
//! Commands:
//!   build       Assemble every component once (`--watch` to keep going)
//!   watch       Build, then rebuild components as their parts change
//!   resolve     Show which component a source path belongs to
//!   components  List discoverable components

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

mod cli;
mod commands;
mod ui;

use cli::{Cli, Commands};

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let config = commands::load_config(&cli)?;

    match cli.command {
        Commands::Build { .. } => commands::build::cmd_build(&config, cli.json),
        Commands::Watch => commands::watch::cmd_watch(&config, cli.json),
        Commands::Resolve { path } => commands::resolve::cmd_resolve(&config, &path, cli.json),
        Commands::Components => commands::components::cmd_components(&config, cli.json),
    }
}

/// Diagnostics go to stderr so `--json` output on stdout stays clean.
/// `RUST_LOG` wins over `-v`.
fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("shopify_components={level}")));

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false),
        )
        .with(filter)
        .init();
}
