//! Batch compilation of fixture sources
//!
//! One javac invocation per source root. Source paths are passed through
//! an `@argfile` so long lists never hit command-line length limits.

use std::fmt::Write as _;
use std::io::Write as _;
use std::path::{Path, PathBuf};
use std::process::Command;

use crate::error::{FixtureError, FixtureResult};

/// Flags passed to every javac invocation (`-g`: full debug info)
pub const JAVAC_FLAGS: &[&str] = &["-g"];

/// Runs a resolved javac binary.
#[derive(Debug, Clone)]
pub struct Compiler {
    javac: PathBuf,
}

impl Compiler {
    pub fn new(javac: impl Into<PathBuf>) -> Self {
        Self {
            javac: javac.into(),
        }
    }

    /// Compile `sources` into `out_dir`, returning how many files were compiled.
    ///
    /// `out_dir` is created even when there is nothing to compile. A javac
    /// failure is fatal; the argfile is removed either way.
    pub fn compile(&self, sources: &[PathBuf], out_dir: &Path, label: &str) -> FixtureResult<usize> {
        std::fs::create_dir_all(out_dir)?;

        if sources.is_empty() {
            println!("[{}] No .java sources found (excluding java.base).", label);
            return Ok(0);
        }

        for source in sources {
            tracing::info!("[{}] Compiling {}", label, source.display());
        }

        let mut argfile = tempfile::Builder::new()
            .prefix("javac_args_")
            .suffix(".txt")
            .tempfile()?;
        argfile.write_all(format_argfile(sources).as_bytes())?;
        argfile.flush()?;

        let status = Command::new(&self.javac)
            .args(JAVAC_FLAGS)
            .arg("-d")
            .arg(out_dir)
            .arg(format!("@{}", argfile.path().display()))
            .status();

        if let Err(e) = argfile.close() {
            tracing::warn!("failed to remove javac argfile: {}", e);
        }

        let status = status?;
        if !status.success() {
            return Err(FixtureError::CompilerFailed {
                label: label.to_string(),
                code: status.code(),
            });
        }

        println!(
            "[{}] Compiled {} file(s) to {}",
            label,
            sources.len(),
            out_dir.display()
        );
        Ok(sources.len())
    }
}

/// One double-quoted path per line, with `\` and `"` escaped.
pub fn format_argfile(sources: &[PathBuf]) -> String {
    let mut out = String::new();
    for source in sources {
        let escaped = source
            .display()
            .to_string()
            .replace('\\', "\\\\")
            .replace('"', "\\\"");
        let _ = writeln!(out, "\"{}\"", escaped);
    }
    out
}
