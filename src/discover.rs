//! Java source discovery
//!
//! Walks a source root for `.java` files, skipping anything under a
//! `java.base` directory. Those trees hold copies of the JDK base module
//! sources and must never be compiled as fixtures.

use std::path::{Component, Path, PathBuf};

use ignore::WalkBuilder;

/// Path component that excludes a file from discovery
pub const EXCLUDED_COMPONENT: &str = "java.base";

/// File extension of compilable sources
pub const SOURCE_EXTENSION: &str = "java";

/// A directory of hand-written fixture sources
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceRoot {
    pub dir: PathBuf,
    pub label: String,
}

impl SourceRoot {
    pub fn new(dir: impl Into<PathBuf>, label: impl Into<String>) -> Self {
        Self {
            dir: dir.into(),
            label: label.into(),
        }
    }

    /// The runtime and vm testdata roots, in compile order.
    pub fn defaults() -> Vec<SourceRoot> {
        vec![
            SourceRoot::new("runtime/testdata", crate::config::SUBDIR_RUNTIME),
            SourceRoot::new("vm/testdata", crate::config::SUBDIR_VM),
        ]
    }

    pub fn discover(&self) -> Vec<PathBuf> {
        discover(&self.dir)
    }
}

/// Collect every `.java` file under `root`, sorted by full path.
///
/// A missing root yields an empty list. Unreadable entries are logged and
/// skipped.
pub fn discover(root: &Path) -> Vec<PathBuf> {
    if !root.exists() {
        return Vec::new();
    }

    let walker = WalkBuilder::new(root)
        .standard_filters(false)
        .follow_links(false)
        .build();

    let mut files = Vec::new();
    for entry in walker {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                tracing::warn!("skipping unreadable entry under {}: {}", root.display(), e);
                continue;
            }
        };
        let path = entry.path();
        if !is_source_file(path) || is_excluded(path) {
            continue;
        }
        files.push(path.to_path_buf());
    }

    files.sort();
    files
}

fn is_source_file(path: &Path) -> bool {
    path.extension().map(|e| e == SOURCE_EXTENSION).unwrap_or(false) && path.is_file()
}

/// True if any component of `path` is exactly `java.base`.
pub fn is_excluded(path: &Path) -> bool {
    path.components().any(|c| match c {
        Component::Normal(name) => name == EXCLUDED_COMPONENT,
        _ => false,
    })
}
