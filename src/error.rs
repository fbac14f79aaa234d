//! Error types for classprep
//!
//! Only fatal conditions live here. Recoverable extraction problems are
//! values of [`crate::extract::ExtractIssue`] and never abort a run.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for classprep operations
pub type FixtureResult<T> = Result<T, FixtureError>;

/// Fatal errors that end a fixture run
#[derive(Error, Debug)]
pub enum FixtureError {
    /// Required executable is not on PATH
    #[error("required tool '{name}' not found in PATH")]
    ToolMissing { name: String },

    /// `javac --version` did not match the pinned version exactly
    #[error("expected {expected}, got: {actual}")]
    VersionMismatch { expected: String, actual: String },

    /// The version query itself could not be run
    #[error("failed to query version of {tool}: {message}")]
    VersionQueryFailed { tool: String, message: String },

    /// Neither `--java-home` nor `JAVA_HOME` was provided
    #[error("JAVA_HOME is not set (and --java-home not provided)")]
    MissingJavaHome,

    /// `<java-home>/jmods` does not exist
    #[error("{path} not found")]
    MissingModulesDir { path: PathBuf },

    /// javac exited non-zero while compiling a source root
    #[error("[{label}] javac failed with {}", describe_exit(.code))]
    CompilerFailed { label: String, code: Option<i32> },

    /// `jmod extract` exited non-zero
    #[error("jmod extract failed for {archive} with {}", describe_exit(.code))]
    ArchiveToolFailed { archive: PathBuf, code: Option<i32> },

    /// The manifest is not valid TOML or has the wrong shape
    #[error("invalid manifest {file}: {message}")]
    InvalidManifest { file: PathBuf, message: String },

    /// A manifest class name cannot be mapped to a class-file path
    #[error("invalid class name '{class}' for module '{module}' in {file}")]
    InvalidClassName {
        file: PathBuf,
        module: String,
        class: String,
    },

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl FixtureError {
    /// Process exit code for this error.
    ///
    /// Version drift exits 1, child tool failures propagate the child's
    /// code, and every other precondition failure exits 2.
    pub fn exit_code(&self) -> i32 {
        match self {
            FixtureError::VersionMismatch { .. } => 1,
            FixtureError::CompilerFailed { code, .. }
            | FixtureError::ArchiveToolFailed { code, .. } => match code {
                Some(0) | None => 1,
                Some(code) => *code,
            },
            _ => 2,
        }
    }
}

fn describe_exit(code: &Option<i32>) -> String {
    match code {
        Some(code) => format!("exit code {}", code),
        None => "no exit code (terminated by signal)".to_string(),
    }
}
