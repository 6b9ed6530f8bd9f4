//! Core data models for component assembly

use std::fmt;
use std::path::{Path, PathBuf};

use serde::Serialize;

/// Extension of template fragments and of the composite document
pub const TEMPLATE_EXTENSION: &str = "liquid";
/// Extension of stylesheet fragments
pub const STYLESHEET_EXTENSION: &str = "scss";
/// File name of a component directory's settings description
pub const SCHEMA_FILE_NAME: &str = "schema.js";
/// Suffix of a top-level component's settings description (`<name>.schema.js`)
pub const ROOT_SCHEMA_SUFFIX: &str = ".schema.js";
/// Extension of side-channel stylesheet artifacts
pub const CSS_EXTENSION: &str = "css";

/// The unit of assembly.
///
/// Identity is a pure function of tree position: two change events that
/// resolve to equal identities are the same component and are coalesced.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct ComponentIdentity {
    /// Output file name stem and default CSS class
    pub name: String,
    /// Absolute directory holding the component's parts
    pub source_dir: PathBuf,
    /// Absolute directory the composite document is written to
    pub output_dir: PathBuf,
}

impl ComponentIdentity {
    pub fn new(
        name: impl Into<String>,
        source_dir: impl Into<PathBuf>,
        output_dir: impl Into<PathBuf>,
    ) -> Self {
        Self {
            name: name.into(),
            source_dir: source_dir.into(),
            output_dir: output_dir.into(),
        }
    }

    /// Path of the composite document: `<output_dir>/<name>.liquid`
    pub fn document_path(&self) -> PathBuf {
        self.output_dir
            .join(format!("{}.{}", self.name, TEMPLATE_EXTENSION))
    }

    /// Whether this component lives directly in the source root.
    ///
    /// Top-level components share their directory with each other, so their
    /// parts are matched by exact stem only.
    pub fn is_top_level(&self, source_root: &Path) -> bool {
        self.source_dir == source_root
    }
}

impl fmt::Display for ComponentIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name, self.source_dir.display())
    }
}

/// Kinds of part a component directory may hold
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PartKind {
    Template,
    Stylesheet,
    Schema,
}

impl PartKind {
    /// Classify a file name as a component part, if it is one
    pub fn classify(file_name: &str) -> Option<Self> {
        if file_name == SCHEMA_FILE_NAME || file_name.ends_with(ROOT_SCHEMA_SUFFIX) {
            return Some(PartKind::Schema);
        }
        match Path::new(file_name).extension().and_then(|e| e.to_str()) {
            Some(TEMPLATE_EXTENSION) => Some(PartKind::Template),
            Some(STYLESHEET_EXTENSION) => Some(PartKind::Stylesheet),
            _ => None,
        }
    }
}

/// Located parts of a component; every part is optional on disk.
///
/// Holds paths only. Contents are read fresh on every assembly so a build
/// always reflects the current disk state.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ComponentParts {
    pub template: Option<PathBuf>,
    pub stylesheet: Option<PathBuf>,
    pub schema: Option<PathBuf>,
}

impl ComponentParts {
    pub fn is_empty(&self) -> bool {
        self.template.is_none() && self.stylesheet.is_none() && self.schema.is_none()
    }
}

/// How the embedded stylesheet was produced
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StyleSource {
    /// Output of the external compiler, verbatim
    Compiled,
    /// Output of the structural fallback rewrite
    Fallback,
}

/// How the embedded settings document was produced
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SettingsSource {
    /// Exact: the exported literal was evaluated
    Evaluated,
    /// Approximate: the pattern scanner matched the text
    Scanned,
    /// Both strategies failed; empty settings document
    Degraded,
}

/// Outcome of assembling one component
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AssembledComponent {
    pub identity: ComponentIdentity,
    /// Composite document that was written
    pub document: PathBuf,
    /// Side-channel stylesheet that was written, if the component is styled
    pub stylesheet: Option<PathBuf>,
    pub style_source: Option<StyleSource>,
    pub settings_source: Option<SettingsSource>,
}
