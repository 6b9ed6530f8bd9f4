//! Shopify Components - multi-file Liquid component bundler
//!
//! Each component lives in its own directory as a template (`.liquid`), an
//! optional stylesheet (`.scss`) and an optional settings description
//! (`schema.js`). The engine assembles them into one composite Liquid
//! document per component, writes the compiled stylesheet next to the theme
//! assets, and in watch mode rebuilds only the component whose part changed.

pub mod assembler;
pub mod config;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod models;
pub mod plugin;
pub mod schema;
pub mod style;
pub mod tree;
pub mod watcher;

// Re-exports for convenience
pub use assembler::{BuildReport, ComponentAssembler, FailedComponent};
pub use config::{Config, ConfigOverrides};
pub use error::{ComponentError, ComponentResult};
pub use models::{AssembledComponent, ComponentIdentity, ComponentParts, PartKind};
pub use plugin::ComponentsPlugin;
pub use tree::{SourceBoundary, TreeResolver};
pub use watcher::{BuildEvent, RebuildCoordinator, TeardownReport};
