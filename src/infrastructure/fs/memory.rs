//! In-memory file system for tests
//!
//! Uses `Arc<Mutex<>>` internally so it can be cloned and shared. Every
//! write is recorded so tests can assert exactly which outputs a rebuild
//! touched.

use std::collections::{BTreeMap, BTreeSet};
use std::io;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use crate::domain::ports::file_system::{DirEntry, FileSystem, FsResult};

#[derive(Default)]
struct Inner {
    files: BTreeMap<PathBuf, String>,
    dirs: BTreeSet<PathBuf>,
    writes: Vec<PathBuf>,
    read_only: BTreeSet<PathBuf>,
}

#[derive(Clone, Default)]
pub struct MemoryFs {
    inner: Arc<Mutex<Inner>>,
}

impl MemoryFs {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a file, creating its ancestor directories
    pub fn add_file(&self, path: impl AsRef<Path>, content: &str) {
        let path = path.as_ref();
        let mut inner = self.inner.lock().unwrap();
        add_ancestors(&mut inner.dirs, path);
        inner.files.insert(path.to_path_buf(), content.to_string());
    }

    pub fn add_dir(&self, path: impl AsRef<Path>) {
        let mut inner = self.inner.lock().unwrap();
        let path = path.as_ref();
        add_ancestors(&mut inner.dirs, path);
        inner.dirs.insert(path.to_path_buf());
    }

    pub fn remove_file(&self, path: impl AsRef<Path>) {
        self.inner.lock().unwrap().files.remove(path.as_ref());
    }

    /// Make writes under `dir` fail with PermissionDenied
    pub fn deny_writes_under(&self, dir: impl AsRef<Path>) {
        self.inner
            .lock()
            .unwrap()
            .read_only
            .insert(dir.as_ref().to_path_buf());
    }

    pub fn file(&self, path: impl AsRef<Path>) -> Option<String> {
        self.inner.lock().unwrap().files.get(path.as_ref()).cloned()
    }

    /// Every path written so far, in write order
    pub fn writes(&self) -> Vec<PathBuf> {
        self.inner.lock().unwrap().writes.clone()
    }

    pub fn clear_writes(&self) {
        self.inner.lock().unwrap().writes.clear();
    }
}

fn add_ancestors(dirs: &mut BTreeSet<PathBuf>, path: &Path) {
    for ancestor in path.ancestors().skip(1) {
        if ancestor.as_os_str().is_empty() {
            break;
        }
        dirs.insert(ancestor.to_path_buf());
    }
}

impl FileSystem for MemoryFs {
    fn read(&self, path: &Path) -> FsResult<String> {
        self.inner
            .lock()
            .unwrap()
            .files
            .get(path)
            .cloned()
            .ok_or_else(|| io::Error::new(io::ErrorKind::NotFound, "file not found"))
    }

    fn write(&self, path: &Path, content: &str) -> FsResult<()> {
        let mut inner = self.inner.lock().unwrap();
        if inner.read_only.iter().any(|dir| path.starts_with(dir)) {
            return Err(io::Error::new(io::ErrorKind::PermissionDenied, "read-only"));
        }
        add_ancestors(&mut inner.dirs, path);
        inner.files.insert(path.to_path_buf(), content.to_string());
        inner.writes.push(path.to_path_buf());
        Ok(())
    }

    fn exists(&self, path: &Path) -> bool {
        let inner = self.inner.lock().unwrap();
        inner.files.contains_key(path) || inner.dirs.contains(path)
    }

    fn is_dir(&self, path: &Path) -> bool {
        self.inner.lock().unwrap().dirs.contains(path)
    }

    fn list_dir(&self, path: &Path) -> FsResult<Vec<DirEntry>> {
        let inner = self.inner.lock().unwrap();
        if !inner.dirs.contains(path) {
            return Err(io::Error::new(io::ErrorKind::NotFound, "directory not found"));
        }
        let child_name = |p: &PathBuf| -> Option<String> {
            (p.parent() == Some(path))
                .then(|| p.file_name().map(|n| n.to_string_lossy().into_owned()))
                .flatten()
        };
        let mut entries: Vec<DirEntry> = inner
            .dirs
            .iter()
            .filter_map(|d| child_name(d).map(DirEntry::dir))
            .chain(
                inner
                    .files
                    .keys()
                    .filter_map(|f| child_name(f).map(DirEntry::file)),
            )
            .collect();
        entries.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(entries)
    }

    fn create_dir_all(&self, path: &Path) -> FsResult<()> {
        let mut inner = self.inner.lock().unwrap();
        if inner.read_only.iter().any(|dir| path.starts_with(dir)) {
            return Err(io::Error::new(io::ErrorKind::PermissionDenied, "read-only"));
        }
        add_ancestors(&mut inner.dirs, path);
        inner.dirs.insert(path.to_path_buf());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn memory_fs_lists_children_only() {
        let fs = MemoryFs::new();
        fs.add_file("/src/hero/hero.liquid", "x");
        fs.add_file("/src/hero/nested/deep.liquid", "y");
        fs.add_file("/src/top.liquid", "z");

        let root = fs.list_dir(Path::new("/src")).unwrap();
        assert_eq!(root, vec![DirEntry::dir("hero"), DirEntry::file("top.liquid")]);

        let hero = fs.list_dir(Path::new("/src/hero")).unwrap();
        assert_eq!(hero, vec![DirEntry::file("hero.liquid"), DirEntry::dir("nested")]);
    }

    #[test]
    fn memory_fs_records_writes() {
        let fs = MemoryFs::new();
        fs.write(Path::new("/out/a.liquid"), "a").unwrap();
        fs.write(Path::new("/out/b.liquid"), "b").unwrap();

        assert_eq!(
            fs.writes(),
            vec![PathBuf::from("/out/a.liquid"), PathBuf::from("/out/b.liquid")]
        );
        assert!(fs.is_dir(Path::new("/out")));
    }
}
