use std::path::{Path, PathBuf};

use shopify_components::config::PROJECT_CONFIG_FILE;

/// Discover the project root directory from an invocation directory.
///
/// Heuristics (first match wins, walking upward from `start`):
/// - `components.toml` (project configuration)
/// - `.git/` or `.git` file (git repo root / worktree)
///
/// Falls back to `start` when no markers are found.
pub(crate) fn discover_project_root(start: &Path) -> PathBuf {
    for dir in start.ancestors() {
        if dir.join(PROJECT_CONFIG_FILE).is_file() {
            return dir.to_path_buf();
        }
        if dir.join(".git").exists() {
            return dir.to_path_buf();
        }
    }
    start.to_path_buf()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn discover_project_root_prefers_nearest_config_file() {
        let dir = tempdir().unwrap();
        let root = dir.path();
        std::fs::create_dir_all(root.join(".git")).unwrap();
        std::fs::create_dir_all(root.join("theme/src")).unwrap();
        std::fs::write(root.join("theme").join(PROJECT_CONFIG_FILE), "").unwrap();

        assert_eq!(discover_project_root(&root.join("theme/src")), root.join("theme"));
    }

    #[test]
    fn discover_project_root_falls_back_to_git() {
        let dir = tempdir().unwrap();
        let root = dir.path();
        std::fs::create_dir_all(root.join(".git")).unwrap();
        std::fs::create_dir_all(root.join("sub/src")).unwrap();

        assert_eq!(discover_project_root(&root.join("sub/src")), root.to_path_buf());
    }
}
