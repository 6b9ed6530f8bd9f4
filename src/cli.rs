use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use shopify_components::config::ConfigOverrides;
use shopify_components::domain::ports::WatchStrategy;

/// Shopify Components - assemble multi-file Liquid components
#[derive(Parser, Debug)]
#[command(name = "shopify-components")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Output events as NDJSON (one JSON object per line)
    #[arg(long, global = true)]
    pub json: bool,

    /// Verbosity level (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Config file (default: components.toml in the current directory)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Component source directory
    #[arg(long = "src", global = true)]
    pub src_dir: Option<PathBuf>,

    /// Output directory for composite documents
    #[arg(long = "out", global = true)]
    pub output_dir: Option<PathBuf>,

    /// Output directory for compiled stylesheets (default: <out>/assets)
    #[arg(long = "assets", global = true)]
    pub assets_dir: Option<PathBuf>,

    /// Debounce window per component in milliseconds
    #[arg(long = "debounce", global = true)]
    pub debounce_ms: Option<u64>,

    /// How the source tree is watched
    #[arg(long, value_enum, global = true)]
    pub strategy: Option<StrategyArg>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Assemble every component once
    Build {
        /// Keep watching and rebuilding after the build
        #[arg(short, long)]
        watch: bool,
    },

    /// Build, then rebuild components as their parts change
    Watch,

    /// Show which component a source path belongs to
    Resolve {
        /// Changed file, absolute or relative to the current directory
        path: PathBuf,
    },

    /// List discoverable components
    Components,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum StrategyArg {
    Auto,
    Recursive,
    PerDirectory,
}

impl From<StrategyArg> for WatchStrategy {
    fn from(arg: StrategyArg) -> Self {
        match arg {
            StrategyArg::Auto => WatchStrategy::Auto,
            StrategyArg::Recursive => WatchStrategy::Recursive,
            StrategyArg::PerDirectory => WatchStrategy::PerDirectory,
        }
    }
}

impl Cli {
    /// Command line layer of the configuration hierarchy
    pub fn overrides(&self) -> ConfigOverrides {
        let watch_mode = match self.command {
            Commands::Build { watch: true } | Commands::Watch => Some(true),
            _ => None,
        };
        ConfigOverrides {
            src_dir: self.src_dir.clone(),
            output_dir: self.output_dir.clone(),
            assets_dir: self.assets_dir.clone(),
            debounce_delay: self.debounce_ms,
            watch_mode,
            strategy: self.strategy.map(WatchStrategy::from),
        }
    }
}
