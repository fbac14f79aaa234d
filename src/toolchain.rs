//! External tool resolution and preflight checks
//!
//! javac and jmod are treated as black boxes. We only check that they are
//! on PATH and that javac reports exactly the version fixtures were
//! authored against.

use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::process::Command;

use crate::error::{FixtureError, FixtureResult};

pub const JAVAC: &str = "javac";
pub const JMOD: &str = "jmod";

/// Locates external tools on a search path.
#[derive(Debug, Clone, Default)]
pub struct Toolchain {
    /// Explicit search path; `None` means the process PATH
    search_path: Option<OsString>,
}

impl Toolchain {
    /// Toolchain that searches the process PATH.
    pub fn from_env() -> Self {
        Self::default()
    }

    /// Toolchain that searches only the given PATH-style list.
    pub fn with_search_path(paths: impl Into<OsString>) -> Self {
        Self {
            search_path: Some(paths.into()),
        }
    }

    /// Resolve `name` to an executable, or fail with `ToolMissing`.
    pub fn ensure_tool(&self, name: &str) -> FixtureResult<PathBuf> {
        let found = match &self.search_path {
            Some(paths) => {
                let cwd = std::env::current_dir()?;
                which::which_in(name, Some(paths), cwd)
            }
            None => which::which(name),
        };
        found.map_err(|_| FixtureError::ToolMissing {
            name: name.to_string(),
        })
    }

    /// Check that `javac --version` matches `expected` exactly.
    ///
    /// Returns the resolved javac path so callers compile with the same
    /// binary that was checked.
    pub fn ensure_compiler_version(&self, expected: &str) -> FixtureResult<PathBuf> {
        let javac = self.ensure_tool(JAVAC)?;
        let actual = query_version(&javac)?;
        if actual != expected {
            return Err(FixtureError::VersionMismatch {
                expected: expected.to_string(),
                actual,
            });
        }
        tracing::debug!("using {} ({})", javac.display(), actual);
        Ok(javac)
    }
}

/// Run `<tool> --version` and normalize what it printed.
///
/// Older javac releases print the version on stderr, so stderr is used
/// when stdout is empty.
fn query_version(tool: &Path) -> FixtureResult<String> {
    let output = Command::new(tool)
        .arg("--version")
        .output()
        .map_err(|e| FixtureError::VersionQueryFailed {
            tool: tool.display().to_string(),
            message: e.to_string(),
        })?;

    let stdout = String::from_utf8_lossy(&output.stdout);
    let raw = if stdout.trim().is_empty() {
        String::from_utf8_lossy(&output.stderr).into_owned()
    } else {
        stdout.into_owned()
    };
    Ok(normalize_version(&raw))
}

/// Strip carriage returns and surrounding whitespace.
pub fn normalize_version(raw: &str) -> String {
    raw.replace('\r', "").trim().to_string()
}
