//! Source-tree enumeration: extension allow-list, directory deny-list.

use crate::config::Config;
use ignore::WalkBuilder;
use std::path::{Path, PathBuf};

/// Collect candidate source files under `root`. A missing or unreadable root
/// yields an empty set; analyzing zero files is a valid, degenerate outcome.
/// No ordering is guaranteed.
pub fn scan_source_files(root: &Path, config: &Config) -> Vec<PathBuf> {
    if !root.is_dir() {
        log::warn!("scan root {} is not a directory, skipping", root.display());
        return Vec::new();
    }

    let walker = WalkBuilder::new(root).hidden(true).git_ignore(true).build();
    let mut files = Vec::new();

    for entry in walker.flatten() {
        let path = entry.path();

        if !path.is_file() {
            continue;
        }
        if is_excluded(path, &config.exclude_dirs) {
            continue;
        }
        let matches_ext = path
            .extension()
            .and_then(|e| e.to_str())
            .is_some_and(|ext| config.extensions.iter().any(|allowed| allowed == ext));
        if matches_ext {
            files.push(path.to_path_buf());
        }
    }

    files
}

fn is_excluded(path: &Path, exclude_dirs: &[String]) -> bool {
    path.components().any(|c| {
        c.as_os_str()
            .to_str()
            .is_some_and(|name| exclude_dirs.iter().any(|d| d == name))
    })
}
