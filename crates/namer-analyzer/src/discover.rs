//! Source file discovery.

use std::path::{Path, PathBuf};

use tracing::warn;
use walkdir::{DirEntry, WalkDir};

use crate::extract::SourceLanguage;

/// Default directory depth for [`discover_sources`].
pub const DEFAULT_MAX_DEPTH: usize = 10;

fn is_skipped_dir(entry: &DirEntry) -> bool {
    if entry.depth() == 0 || !entry.file_type().is_dir() {
        return false;
    }
    let name = entry.file_name().to_string_lossy();
    name.starts_with('.') || name == "node_modules"
}

/// JavaScript/TypeScript files under `root`, sorted.
///
/// A file `root` is returned as-is when it has a source extension.
/// `node_modules` and dot-directories are skipped; unreadable entries are
/// logged and ignored.
pub fn discover_sources(root: &Path, max_depth: usize) -> Vec<PathBuf> {
    let mut files: Vec<PathBuf> = WalkDir::new(root)
        .follow_links(false)
        .max_depth(max_depth.saturating_add(1))
        .into_iter()
        .filter_entry(|e| !is_skipped_dir(e))
        .filter_map(|entry| match entry {
            Ok(entry) => Some(entry),
            Err(error) => {
                warn!(%error, "skipping unreadable path");
                None
            }
        })
        .filter(|e| e.file_type().is_file())
        .map(DirEntry::into_path)
        .filter(|p| SourceLanguage::from_path(p).is_some())
        .collect();
    files.sort();
    files
}

#[cfg(test)]
mod tests {
    use std::fs;

    use super::*;

    fn touch(root: &Path, rel: &str) {
        let path = root.join(rel);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, "").unwrap();
    }

    fn rel(root: &Path, files: &[PathBuf]) -> Vec<String> {
        files
            .iter()
            .map(|p| p.strip_prefix(root).unwrap().to_string_lossy().replace('\\', "/"))
            .collect()
    }

    #[test]
    fn finds_sources_and_skips_noise() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path();
        touch(root, "src/app.tsx");
        touch(root, "src/util.js");
        touch(root, "src/styles.css");
        touch(root, "index.mjs");
        touch(root, "node_modules/react/index.js");
        touch(root, ".git/hooks/pre-commit.js");

        let found = discover_sources(root, DEFAULT_MAX_DEPTH);
        assert_eq!(rel(root, &found), ["index.mjs", "src/app.tsx", "src/util.js"]);
    }

    #[test]
    fn respects_max_depth() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path();
        touch(root, "a.ts");
        touch(root, "one/b.ts");
        touch(root, "one/two/c.ts");

        assert_eq!(rel(root, &discover_sources(root, 0)), ["a.ts"]);
        assert_eq!(rel(root, &discover_sources(root, 1)), ["a.ts", "one/b.ts"]);
    }

    #[test]
    fn single_file_root() {
        let dir = tempfile::tempdir().unwrap();
        touch(dir.path(), "solo.ts");
        let file = dir.path().join("solo.ts");
        assert_eq!(discover_sources(&file, DEFAULT_MAX_DEPTH), [file]);
    }

    #[test]
    fn missing_root_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        assert!(discover_sources(&dir.path().join("nope"), DEFAULT_MAX_DEPTH).is_empty());
    }
}
