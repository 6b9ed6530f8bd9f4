//! Component assembly
//!
//! Turns a component's parts into one composite document:
//!
//! ```text
//! <template body>{% stylesheet %}
//! <css>{% endstylesheet %}
//!
//!
//!
//! {% schema %}
//! <settings JSON>
//! {% endschema %}
//! ```
//!
//! The style block is present only for styled components and the settings
//! block only when a settings description exists. Styled components also get
//! a standalone copy of their CSS in the assets directory.
//!
//! Full builds and rebuilds both go through [`ComponentAssembler::assemble`];
//! there is no incremental special case.

use std::path::{Path, PathBuf};

use serde::Serialize;
use tracing::{debug, error, info, warn};

use crate::domain::ports::file_system::FileSystem;
use crate::error::{ComponentError, ComponentResult};
use crate::models::{AssembledComponent, ComponentIdentity, ComponentParts};
use crate::schema::SchemaExtractor;
use crate::style::StyleTransformer;
use crate::tree::TreeResolver;

/// A component whose assembly failed during a full build
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FailedComponent {
    pub identity: ComponentIdentity,
    pub error: String,
}

/// Result of a full build pass
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct BuildReport {
    pub built: Vec<AssembledComponent>,
    pub failed: Vec<FailedComponent>,
}

impl BuildReport {
    pub fn is_success(&self) -> bool {
        self.failed.is_empty()
    }
}

/// Assembles components read from, and written to, a [`FileSystem`]
pub struct ComponentAssembler<F: FileSystem> {
    fs: F,
    resolver: TreeResolver,
    assets_dir: PathBuf,
    styles: StyleTransformer,
    schemas: SchemaExtractor,
}

impl<F: FileSystem> ComponentAssembler<F> {
    pub fn new(
        fs: F,
        resolver: TreeResolver,
        assets_dir: impl Into<PathBuf>,
        styles: StyleTransformer,
        schemas: SchemaExtractor,
    ) -> Self {
        Self {
            fs,
            resolver,
            assets_dir: assets_dir.into(),
            styles,
            schemas,
        }
    }

    pub fn resolver(&self) -> &TreeResolver {
        &self.resolver
    }

    pub fn assets_dir(&self) -> &Path {
        &self.assets_dir
    }

    pub fn locate_parts(&self, identity: &ComponentIdentity) -> ComponentResult<ComponentParts> {
        self.resolver.locate_parts(&self.fs, identity)
    }

    /// Enumerate and assemble every component.
    ///
    /// Only a missing or unreadable source tree fails the pass; a component
    /// that cannot be written is recorded in the report and the pass goes on.
    pub fn build_all(&self) -> ComponentResult<BuildReport> {
        let components = self.resolver.enumerate(&self.fs)?;
        let mut report = BuildReport::default();

        for identity in components {
            match self.assemble(&identity) {
                Ok(assembled) => report.built.push(assembled),
                Err(e) => {
                    error!(component = %identity.name, error = %e, "component failed to build");
                    report.failed.push(FailedComponent {
                        identity,
                        error: e.to_string(),
                    });
                }
            }
        }

        info!(
            built = report.built.len(),
            failed = report.failed.len(),
            "full build finished"
        );
        Ok(report)
    }

    /// Assemble a component that was just resolved from a change.
    ///
    /// Returns `None` without writing anything when none of its parts are on
    /// disk (a stray file in the source root, a deleted directory).
    pub fn assemble_if_present(
        &self,
        identity: &ComponentIdentity,
    ) -> ComponentResult<Option<AssembledComponent>> {
        let parts = self.locate_parts(identity)?;
        if parts.is_empty() {
            debug!(component = %identity.name, "no parts on disk, nothing to assemble");
            return Ok(None);
        }
        self.assemble_parts(identity, &parts).map(Some)
    }

    /// Assemble one component and write its outputs
    pub fn assemble(&self, identity: &ComponentIdentity) -> ComponentResult<AssembledComponent> {
        let parts = self.locate_parts(identity)?;
        self.assemble_parts(identity, &parts)
    }

    fn assemble_parts(
        &self,
        identity: &ComponentIdentity,
        parts: &ComponentParts,
    ) -> ComponentResult<AssembledComponent> {
        let name = identity.name.as_str();
        let mut document = String::new();

        if let Some(path) = &parts.template {
            let body = self.fs.read(path).map_err(|source| ComponentError::ReadPart {
                path: path.clone(),
                source,
            })?;
            document.push_str(&body);
        }

        let mut stylesheet = None;
        let mut style_source = None;
        if let Some(path) = &parts.stylesheet {
            match self.fs.read(path) {
                Ok(text) => {
                    let style = self.styles.transform(&text, name);
                    document.push_str("{% stylesheet %}\n");
                    document.push_str(&style.css);
                    document.push_str("{% endstylesheet %}\n\n");
                    style_source = Some(style.source);
                    stylesheet = self.write_stylesheet_artifact(identity, &style.css);
                }
                Err(e) => warn!(
                    component = name,
                    path = %path.display(),
                    error = %e,
                    "could not read stylesheet, skipping style block"
                ),
            }
        }

        let mut settings_source = None;
        if let Some(path) = &parts.schema {
            match self.fs.read(path) {
                Ok(text) => {
                    let extracted = self.schemas.extract(&text, name);
                    document.push_str("\n\n{% schema %}\n");
                    document.push_str(&extracted.document.to_json_pretty());
                    document.push_str("\n{% endschema %}\n");
                    settings_source = Some(extracted.source);
                }
                Err(e) => warn!(
                    component = name,
                    path = %path.display(),
                    error = %e,
                    "could not read settings description, skipping settings block"
                ),
            }
        }

        let target = identity.document_path();
        self.fs
            .create_dir_all(&identity.output_dir)
            .map_err(|source| ComponentError::WriteOutput {
                path: identity.output_dir.clone(),
                source,
            })?;
        self.fs
            .write(&target, &document)
            .map_err(|source| ComponentError::WriteOutput {
                path: target.clone(),
                source,
            })?;

        info!(
            component = name,
            relative = %self.resolver.relative_source(&identity.source_dir).display(),
            "assembled"
        );

        Ok(AssembledComponent {
            identity: identity.clone(),
            document: target,
            stylesheet,
            style_source,
            settings_source,
        })
    }

    /// Persist the side-channel stylesheet; failures only cost the artifact
    fn write_stylesheet_artifact(&self, identity: &ComponentIdentity, css: &str) -> Option<PathBuf> {
        let target = self
            .assets_dir
            .join(self.resolver.stylesheet_artifact_name(identity));
        let written = self
            .fs
            .create_dir_all(&self.assets_dir)
            .and_then(|()| self.fs.write(&target, css));
        match written {
            Ok(()) => Some(target),
            Err(e) => {
                warn!(
                    component = %identity.name,
                    path = %target.display(),
                    error = %e,
                    "could not write stylesheet artifact"
                );
                None
            }
        }
    }
}
