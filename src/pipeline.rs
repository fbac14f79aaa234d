//! Fixture pipeline
//!
//! Preflight, then compile each source root, then extract JDK classes.
//! Stages only share the filesystem. The manifest is read during
//! preflight so a malformed one fails before anything is compiled.

use crate::compiler::Compiler;
use crate::config::{OutputLayout, Settings};
use crate::discover::SourceRoot;
use crate::error::FixtureResult;
use crate::extract::{self, ExtractReport};
use crate::toolchain::Toolchain;

/// Compiled count for one source root
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompileSummary {
    pub label: String,
    pub compiled: usize,
}

/// Everything a run produced
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PipelineReport {
    pub layout: OutputLayout,
    pub compiled: Vec<CompileSummary>,
    pub extracted: ExtractReport,
}

/// Runs the full fixture preparation for one set of settings.
pub struct Pipeline {
    settings: Settings,
    roots: Vec<SourceRoot>,
    toolchain: Toolchain,
}

impl Pipeline {
    pub fn new(settings: Settings, toolchain: Toolchain) -> Self {
        Self {
            settings,
            roots: SourceRoot::defaults(),
            toolchain,
        }
    }

    /// Replace the default runtime/vm source roots.
    pub fn with_roots(mut self, roots: Vec<SourceRoot>) -> Self {
        self.roots = roots;
        self
    }

    pub fn run(&self) -> FixtureResult<PipelineReport> {
        let javac = self
            .toolchain
            .ensure_compiler_version(&self.settings.expected_javac)?;
        let manifest = extract::load_manifest(&self.settings.manifest_path)?;
        let compiler = Compiler::new(javac);
        let layout = self.settings.layout();

        let mut compiled = Vec::with_capacity(self.roots.len());
        for root in &self.roots {
            let sources = root.discover();
            tracing::debug!(
                "[{}] discovered {} source(s) under {}",
                root.label,
                sources.len(),
                root.dir.display()
            );
            let count = compiler.compile(&sources, &layout.for_label(&root.label), &root.label)?;
            compiled.push(CompileSummary {
                label: root.label.clone(),
                compiled: count,
            });
        }

        let extracted = extract::extract_loaded(
            manifest.as_ref(),
            &self.settings.manifest_path,
            &layout.jdk,
            self.settings.java_home.as_deref(),
            &self.toolchain,
        )?;

        Ok(PipelineReport {
            layout,
            compiled,
            extracted,
        })
    }
}

impl PipelineReport {
    /// Final summary printed to stdout.
    pub fn print_summary(&self) {
        println!("Fixtures ready in: {}", self.layout.root.display());
        println!("  runtime classes: {}", self.layout.runtime.display());
        println!("  vm      classes: {}", self.layout.vm.display());
        println!("  jdk     classes: {}", self.layout.jdk.display());
    }
}
