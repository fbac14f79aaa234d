//! Run settings and fixed layout constants
//!
//! `Settings` is built once at the CLI boundary and passed down by value;
//! nothing below this module reads the process environment.

use std::path::{Path, PathBuf};

/// Exact `javac --version` output fixtures are authored against
pub const DEFAULT_EXPECTED_JAVAC: &str = "javac 24.0.2";

/// Root for all produced fixtures
pub const DEFAULT_OUT_DIR: &str = "target/test-classes";

/// Manifest of classes to pull out of JDK jmods
pub const DEFAULT_MANIFEST: &str = "class_file/fixtures.toml";

/// Environment variable consulted when `--java-home` is absent
pub const JAVA_HOME_ENV: &str = "JAVA_HOME";

pub const SUBDIR_RUNTIME: &str = "runtime";
pub const SUBDIR_VM: &str = "vm";
pub const SUBDIR_JDK: &str = "jdk";

/// Resolved settings for one fixture run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub expected_javac: String,
    pub out_dir: PathBuf,
    pub manifest_path: PathBuf,
    /// Already resolved from `--java-home` or `JAVA_HOME`
    pub java_home: Option<PathBuf>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            expected_javac: DEFAULT_EXPECTED_JAVAC.to_string(),
            out_dir: PathBuf::from(DEFAULT_OUT_DIR),
            manifest_path: PathBuf::from(DEFAULT_MANIFEST),
            java_home: None,
        }
    }
}

impl Settings {
    pub fn layout(&self) -> OutputLayout {
        OutputLayout::new(&self.out_dir)
    }
}

/// The three class directories under the output root
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputLayout {
    pub root: PathBuf,
    pub runtime: PathBuf,
    pub vm: PathBuf,
    pub jdk: PathBuf,
}

impl OutputLayout {
    pub fn new(root: &Path) -> Self {
        Self {
            root: root.to_path_buf(),
            runtime: root.join(SUBDIR_RUNTIME),
            vm: root.join(SUBDIR_VM),
            jdk: root.join(SUBDIR_JDK),
        }
    }

    /// Output directory for a source root label.
    pub fn for_label(&self, label: &str) -> PathBuf {
        match label {
            SUBDIR_RUNTIME => self.runtime.clone(),
            SUBDIR_VM => self.vm.clone(),
            other => self.root.join(other),
        }
    }
}
