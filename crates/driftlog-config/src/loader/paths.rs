//! Path helpers for layer discovery.

use std::path::{Path, PathBuf};

/// Canonical form of `path`, or the path itself when it cannot be resolved.
pub(super) fn canonical_or_self(path: &Path) -> PathBuf {
    path.canonicalize().unwrap_or_else(|_| path.to_path_buf())
}

/// Nearest ancestor of `cwd` (inclusive) holding one of `markers`.
pub(super) fn find_project_root(cwd: &Path, markers: &[String]) -> Option<PathBuf> {
    cwd.ancestors()
        .find(|ancestor| markers.iter().any(|marker| ancestor.join(marker).exists()))
        .map(Path::to_path_buf)
}

#[cfg(test)]
mod tests {
    use super::find_project_root;
    use pretty_assertions::assert_eq;
    use tempfile::tempdir;

    #[test]
    fn project_root_is_nearest_marked_ancestor() {
        let temp = tempdir().expect("tempdir");
        let root = temp.path().join("repo");
        let nested = root.join("src").join("deep");
        std::fs::create_dir_all(&nested).expect("dirs");
        std::fs::create_dir_all(root.join(".git")).expect("git");
        let markers = vec![".git".to_string()];
        assert_eq!(find_project_root(&nested, &markers), Some(root));
    }
}
