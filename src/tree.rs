//! Component addressing
//!
//! Maps tree position to component identity, in both directions:
//!
//! - [`TreeResolver::enumerate`] walks the source tree for a full build
//! - [`TreeResolver::resolve`] maps one changed file back to its component
//!   without re-scanning
//!
//! Both follow the same convention, which keeps full builds and rebuilds
//! writing to the same place:
//!
//! - a template directly in the source root (`src/banner.liquid`) is the
//!   top-level component `banner`, written to the output root; root files
//!   with a dotted stem (`promo.v2.liquid`) belong to no component
//! - any other directory that directly holds a template is a component
//!   named after the directory, written to `<output>/<top-level folder>`
//!   no matter how deeply it is nested

use std::path::{Component, Path, PathBuf};

use tracing::debug;

use crate::domain::ports::file_system::{DirEntry, FileSystem};
use crate::error::{ComponentError, ComponentResult};
use crate::models::{
    ComponentIdentity, ComponentParts, CSS_EXTENSION, ROOT_SCHEMA_SUFFIX, SCHEMA_FILE_NAME,
    STYLESHEET_EXTENSION, TEMPLATE_EXTENSION,
};

/// Source and output roots the addressing scheme is relative to
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TreeResolver {
    source_root: PathBuf,
    output_root: PathBuf,
}

impl TreeResolver {
    pub fn new(source_root: impl Into<PathBuf>, output_root: impl Into<PathBuf>) -> Self {
        Self {
            source_root: source_root.into(),
            output_root: output_root.into(),
        }
    }

    pub fn source_root(&self) -> &Path {
        &self.source_root
    }

    pub fn output_root(&self) -> &Path {
        &self.output_root
    }

    /// Enumerate every component in the source tree, in deterministic order
    pub fn enumerate(&self, fs: &impl FileSystem) -> ComponentResult<Vec<ComponentIdentity>> {
        if !fs.is_dir(&self.source_root) {
            return Err(ComponentError::SourceRootNotFound {
                path: self.source_root.clone(),
            });
        }

        let mut components = Vec::new();
        for entry in fs.list_dir(&self.source_root)? {
            if entry.is_file() && has_extension(&entry.name, TEMPLATE_EXTENSION) {
                match top_level_name(&entry.name) {
                    Some(name) => components.push(ComponentIdentity::new(
                        name,
                        self.source_root.clone(),
                        self.output_root.clone(),
                    )),
                    None => debug!(file = %entry.name, "skipping top-level template with a dotted stem"),
                }
            } else if entry.is_dir() {
                let bucket = self.output_root.join(&entry.name);
                self.descend(fs, &self.source_root.join(&entry.name), &bucket, &mut components)?;
            }
        }

        debug!(count = components.len(), root = %self.source_root.display(), "enumerated components");
        Ok(components)
    }

    fn descend(
        &self,
        fs: &impl FileSystem,
        dir: &Path,
        bucket: &Path,
        components: &mut Vec<ComponentIdentity>,
    ) -> ComponentResult<()> {
        let entries = fs.list_dir(dir).map_err(|source| ComponentError::ReadPart {
            path: dir.to_path_buf(),
            source,
        })?;

        let holds_template = entries
            .iter()
            .any(|e| e.is_file() && has_extension(&e.name, TEMPLATE_EXTENSION));
        if holds_template {
            if let Some(name) = dir.file_name().map(|n| n.to_string_lossy().into_owned()) {
                components.push(ComponentIdentity::new(name, dir, bucket));
            }
        }

        // Nested component directories are discovered independently
        for entry in entries.iter().filter(|e| e.is_dir()) {
            self.descend(fs, &dir.join(&entry.name), bucket, components)?;
        }
        Ok(())
    }

    /// Map a changed file to the component that owns it.
    ///
    /// Pure path arithmetic; returns `None` for paths that are not strictly
    /// inside the source root. Boundary enforcement for symlinks and `..`
    /// happens in the coordinator before this is called.
    pub fn resolve(&self, changed: &Path) -> Option<ComponentIdentity> {
        let relative = changed.strip_prefix(&self.source_root).ok()?;
        let segments: Vec<String> = relative
            .components()
            .map(|c| match c {
                Component::Normal(s) => Some(s.to_string_lossy().into_owned()),
                _ => None,
            })
            .collect::<Option<Vec<_>>>()?;

        match segments.as_slice() {
            [] => None,
            [file] => {
                let name = top_level_name(file)?;
                Some(ComponentIdentity::new(
                    name,
                    self.source_root.clone(),
                    self.output_root.clone(),
                ))
            }
            [bucket, .., parent, _file] => Some(ComponentIdentity::new(
                parent.clone(),
                changed.parent()?,
                self.output_root.join(bucket),
            )),
            // two segments: `<bucket>/<file>`, the bucket is its own parent
            [bucket, _file] => Some(ComponentIdentity::new(
                bucket.clone(),
                changed.parent()?,
                self.output_root.join(bucket),
            )),
        }
    }

    /// Locate a component's parts on disk.
    ///
    /// A missing source directory yields empty parts: on the incremental path
    /// the directory may just have been deleted.
    pub fn locate_parts(
        &self,
        fs: &impl FileSystem,
        identity: &ComponentIdentity,
    ) -> ComponentResult<ComponentParts> {
        let entries = match fs.list_dir(&identity.source_dir) {
            Ok(entries) => entries,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(ComponentParts::default()),
            Err(source) => {
                return Err(ComponentError::ReadPart {
                    path: identity.source_dir.clone(),
                    source,
                })
            }
        };
        let files: Vec<&DirEntry> = entries.iter().filter(|e| e.is_file()).collect();
        let dir = &identity.source_dir;
        let name = identity.name.as_str();

        let exact = |file_name: String| {
            files
                .iter()
                .any(|e| e.name == file_name)
                .then(|| dir.join(&file_name))
        };

        if identity.is_top_level(&self.source_root) {
            return Ok(ComponentParts {
                template: exact(format!("{name}.{TEMPLATE_EXTENSION}")),
                stylesheet: exact(format!("{name}.{STYLESHEET_EXTENSION}")),
                schema: exact(format!("{name}{ROOT_SCHEMA_SUFFIX}")),
            });
        }

        let by_extension = |ext: &str| {
            exact(format!("{name}.{ext}")).or_else(|| {
                files
                    .iter()
                    .find(|e| has_extension(&e.name, ext))
                    .map(|e| dir.join(&e.name))
            })
        };

        Ok(ComponentParts {
            template: by_extension(TEMPLATE_EXTENSION),
            stylesheet: by_extension(STYLESHEET_EXTENSION),
            schema: exact(SCHEMA_FILE_NAME.to_string())
                .or_else(|| exact(format!("{name}{ROOT_SCHEMA_SUFFIX}"))),
        })
    }

    /// File name of the side-channel stylesheet for a component.
    ///
    /// The component's directory relative to the source root, separators
    /// folded into `-`, then `-<name>.css`; `<name>.css` for top-level ones.
    pub fn stylesheet_artifact_name(&self, identity: &ComponentIdentity) -> String {
        let joined = identity
            .source_dir
            .strip_prefix(&self.source_root)
            .map(|relative| {
                relative
                    .components()
                    .filter_map(|c| match c {
                        Component::Normal(s) => Some(s.to_string_lossy().into_owned()),
                        _ => None,
                    })
                    .collect::<Vec<_>>()
                    .join("-")
            })
            .unwrap_or_default();

        if joined.is_empty() {
            format!("{}.{CSS_EXTENSION}", identity.name)
        } else {
            format!("{joined}-{}.{CSS_EXTENSION}", identity.name)
        }
    }

    /// Path of `identity`'s source directory relative to the source root, for logs
    pub fn relative_source<'a>(&self, path: &'a Path) -> &'a Path {
        path.strip_prefix(&self.source_root).unwrap_or(path)
    }
}

/// Containment check for paths reported by change sources.
///
/// Paths are normalized lexically first. A path that still exists is also
/// canonicalized, so a symlink inside the tree that points outside it is
/// rejected. Accepted paths are re-expressed under the configured root so
/// that [`TreeResolver::resolve`] sees the same prefix the full build used.
#[derive(Debug, Clone)]
pub struct SourceBoundary {
    root: PathBuf,
    canonical_root: PathBuf,
}

impl SourceBoundary {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        let root = normalize_lexically(&root.into());
        let canonical_root = root.canonicalize().unwrap_or_else(|_| root.clone());
        Self {
            root,
            canonical_root,
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Return `path` expressed under the root, or `PathEscape`
    pub fn contain(&self, path: &Path) -> ComponentResult<PathBuf> {
        let normalized = if path.is_absolute() {
            normalize_lexically(path)
        } else {
            normalize_lexically(&self.root.join(path))
        };

        if let Ok(canonical) = normalized.canonicalize() {
            return match canonical.strip_prefix(&self.canonical_root) {
                Ok(relative) => Ok(self.root.join(relative)),
                Err(_) => Err(self.escape(path)),
            };
        }

        // Deleted paths can only be checked lexically
        if normalized.starts_with(&self.root) {
            return Ok(normalized);
        }
        match normalized.strip_prefix(&self.canonical_root) {
            Ok(relative) => Ok(self.root.join(relative)),
            Err(_) => Err(self.escape(path)),
        }
    }

    fn escape(&self, path: &Path) -> ComponentError {
        ComponentError::PathEscape {
            path: path.to_path_buf(),
            root: self.root.clone(),
        }
    }
}

/// Resolve `.` and `..` without touching the file system
pub(crate) fn normalize_lexically(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                if !out.pop() {
                    out.push("..");
                }
            }
            other => out.push(other.as_os_str()),
        }
    }
    out
}

fn has_extension(file_name: &str, ext: &str) -> bool {
    Path::new(file_name).extension().and_then(|e| e.to_str()) == Some(ext)
}

/// Component name of a file directly in the source root.
///
/// Only `<stem>.liquid`, `<stem>.scss` and `<stem>.schema.js` with a non-empty,
/// dot-free stem count; these are the exact names `locate_parts` looks for.
fn top_level_name(file_name: &str) -> Option<String> {
    let suffixes = [
        format!(".{TEMPLATE_EXTENSION}"),
        format!(".{STYLESHEET_EXTENSION}"),
        ROOT_SCHEMA_SUFFIX.to_string(),
    ];
    let stem = suffixes
        .iter()
        .find_map(|suffix| file_name.strip_suffix(suffix.as_str()))?;
    (!stem.is_empty() && !stem.contains('.')).then(|| stem.to_string())
}
