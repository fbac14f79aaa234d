//! classprep - Java class-file fixture preparation
//!
//! Compiles the hand-written Java sources under `runtime/testdata` and
//! `vm/testdata`, and extracts named classes from the JDK's jmod archives,
//! so class-file and VM tests have a stable set of `.class` inputs.

pub mod compiler;
pub mod config;
pub mod discover;
pub mod error;
pub mod extract;
pub mod manifest;
pub mod pipeline;
pub mod toolchain;

// Re-exports for convenience
pub use compiler::Compiler;
pub use config::{OutputLayout, Settings};
pub use discover::{discover, SourceRoot};
pub use error::{FixtureError, FixtureResult};
pub use extract::{extract, fqn_to_relative_path, ExtractIssue, ExtractReport, Extractor};
pub use manifest::{ExtractionManifest, ManifestWarning, ModuleClasses};
pub use pipeline::{Pipeline, PipelineReport};
pub use toolchain::Toolchain;
