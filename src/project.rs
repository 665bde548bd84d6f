//! Project root discovery.

use std::path::{Path, PathBuf};
use tracing::debug;

/// Find the nearest directory at or above `start` that contains `marker`
/// as a subdirectory.
///
/// Falls back to `start` itself when no ancestor up to the filesystem root
/// carries the marker.
pub fn find_project_root(start: &Path, marker: &str) -> PathBuf {
    for dir in start.ancestors() {
        if dir.join(marker).is_dir() {
            debug!(root = %dir.display(), marker, "found project root");
            return dir.to_path_buf();
        }
    }

    debug!(cwd = %start.display(), marker, "no marker found, using working directory");
    start.to_path_buf()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_marker_in_start_dir() {
        let dir = TempDir::new().unwrap();
        fs::create_dir(dir.path().join(".claude")).unwrap();

        assert_eq!(find_project_root(dir.path(), ".claude"), dir.path());
    }

    #[test]
    fn test_marker_in_ancestor() {
        let dir = TempDir::new().unwrap();
        fs::create_dir(dir.path().join(".claude")).unwrap();
        let nested = dir.path().join("src").join("deep");
        fs::create_dir_all(&nested).unwrap();

        assert_eq!(find_project_root(&nested, ".claude"), dir.path());
    }

    #[test]
    fn test_nearest_marker_wins() {
        let dir = TempDir::new().unwrap();
        fs::create_dir(dir.path().join(".claude")).unwrap();
        let inner = dir.path().join("packages").join("app");
        fs::create_dir_all(inner.join(".claude")).unwrap();
        let start = inner.join("lib");
        fs::create_dir(&start).unwrap();

        assert_eq!(find_project_root(&start, ".claude"), inner);
    }

    #[test]
    fn test_marker_file_is_not_a_root() {
        let dir = TempDir::new().unwrap();
        let nested = dir.path().join("work");
        fs::create_dir(&nested).unwrap();
        let marker = format!(".self-reborn-marker-{}", std::process::id());
        fs::write(nested.join(&marker), "not a directory").unwrap();

        assert_eq!(find_project_root(&nested, &marker), nested);
    }

    #[test]
    fn test_falls_back_to_start() {
        let dir = TempDir::new().unwrap();
        let start = dir.path().join("plain");
        fs::create_dir(&start).unwrap();
        // A marker name unlikely to exist anywhere above the temp dir
        let marker = format!(".self-reborn-test-{}", std::process::id());

        assert_eq!(find_project_root(&start, &marker), start);
    }
}
