//! Settings extraction
//!
//! A settings description (`schema.js`) is source text, not data. Two
//! strategies turn it into a [`SettingsDocument`]:
//!
//! 1. literal evaluation (exact): the exported literal is evaluated by a
//!    capability-free evaluator, see [`literal`]
//! 2. pattern scanning (approximate): a line scanner over a fixed grammar
//!    subset, see [`scanner`]
//!
//! Evaluation runs first unless disabled. If both strategies fail, the
//! component gets an empty settings document and assembly carries on.

pub mod literal;
pub mod scanner;
pub mod settings;

use thiserror::Error;
use tracing::{debug, warn};

use crate::models::SettingsSource;

pub use settings::{Setting, SettingKind, SettingOption, SettingsDocument};

/// Why a strategy could not extract settings
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SchemaError {
    #[error("line {line}: {message}")]
    Syntax { line: usize, message: String },

    #[error("unknown identifier '{0}'")]
    UnknownIdentifier(String),

    #[error("nothing is exported")]
    NoExport,

    #[error("exported value is not an object")]
    NotAnObject,

    #[error("no recognizable settings shape")]
    NoMatch,
}

/// Settings document plus the strategy that produced it
#[derive(Debug, Clone, PartialEq)]
pub struct ExtractedSettings {
    pub document: SettingsDocument,
    pub source: SettingsSource,
}

/// Extracts settings documents from settings descriptions
#[derive(Debug, Clone, Copy)]
pub struct SchemaExtractor {
    evaluate: bool,
}

impl Default for SchemaExtractor {
    fn default() -> Self {
        Self { evaluate: true }
    }
}

impl SchemaExtractor {
    pub fn new(evaluate: bool) -> Self {
        Self { evaluate }
    }

    /// Extract a settings document. Never fails; see module docs.
    pub fn extract(&self, schema_text: &str, component_name: &str) -> ExtractedSettings {
        if self.evaluate {
            match literal::evaluate_exports(schema_text)
                .and_then(|raw| settings::normalize(&raw, component_name))
            {
                Ok(document) => {
                    debug!(component = component_name, "settings evaluated");
                    return ExtractedSettings {
                        document,
                        source: SettingsSource::Evaluated,
                    };
                }
                Err(e) => {
                    warn!(
                        component = component_name,
                        error = %e,
                        "could not evaluate settings description, scanning instead"
                    );
                }
            }
        }

        match scanner::scan(schema_text).and_then(|raw| settings::normalize(&raw, component_name)) {
            Ok(document) => {
                debug!(component = component_name, "settings scanned");
                ExtractedSettings {
                    document,
                    source: SettingsSource::Scanned,
                }
            }
            Err(e) => {
                warn!(
                    component = component_name,
                    error = %e,
                    "could not extract settings, using an empty settings document"
                );
                ExtractedSettings {
                    document: SettingsDocument::empty(component_name),
                    source: SettingsSource::Degraded,
                }
            }
        }
    }
}
