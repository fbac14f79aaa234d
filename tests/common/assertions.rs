//! Assertion helpers for CLI tests.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// List all files in a directory recursively (for debugging)
pub fn list_all_files(dir: &Path) -> Vec<String> {
    let mut files = Vec::new();
    if let Ok(entries) = std::fs::read_dir(dir) {
        for entry in entries.flatten() {
            let path = entry.path();
            if path.is_dir() {
                files.extend(list_all_files(&path));
            } else {
                files.push(path.display().to_string());
            }
        }
    }
    files.sort();
    files
}

/// Relative path -> contents for every file under `root`.
pub fn snapshot_tree(root: &Path) -> BTreeMap<PathBuf, Vec<u8>> {
    let mut snapshot = BTreeMap::new();
    for file in list_all_files(root) {
        let path = PathBuf::from(file);
        let bytes = std::fs::read(&path).expect("Failed to read snapshot file");
        let relative = path
            .strip_prefix(root)
            .expect("file outside snapshot root")
            .to_path_buf();
        snapshot.insert(relative, bytes);
    }
    snapshot
}

/// Assert that stdout or stderr contains expected pattern.
#[macro_export]
macro_rules! assert_output_contains {
    ($result:expr, $pattern:expr) => {
        assert!(
            $result.stdout.contains($pattern) || $result.stderr.contains($pattern),
            "Expected output to contain '{}'\n\
             stdout:\n{}\n\
             stderr:\n{}",
            $pattern,
            $result.stdout,
            $result.stderr
        );
    };
}

/// Assert that a file exists under the project root.
#[macro_export]
macro_rules! assert_produced {
    ($env:expr, $path:expr) => {
        let full_path = $env.project_path($path);
        assert!(
            full_path.exists(),
            "Expected file at '{}', but it doesn't exist.\n\
             Files found:\n  {}",
            $path,
            $crate::common::list_all_files($env.project_root.path()).join("\n  ")
        );
    };
}
