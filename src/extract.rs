//! JDK class extraction
//!
//! Copies the classes named in the manifest out of `<java-home>/jmods`.
//! Each module archive is unpacked with `jmod extract` into its own
//! temporary directory, which is removed once that module is done.
//!
//! Only precondition failures are fatal. A missing archive, an archive
//! without `classes/`, or a missing class is recorded as an
//! [`ExtractIssue`], logged, and skipped.

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;

use crate::error::{FixtureError, FixtureResult};
use crate::manifest::{ExtractionManifest, ModuleClasses};
use crate::toolchain::{Toolchain, JMOD};

/// Directory under java-home holding one `<module>.jmod` per module
pub const JMODS_DIR: &str = "jmods";

/// Subtree of an extracted jmod that mirrors the package layout
pub const CLASSES_DIR: &str = "classes";

pub const CLASS_EXTENSION: &str = "class";

/// Map `a.b.C` to `a/b/C.class`.
pub fn fqn_to_relative_path(fqn: &str) -> PathBuf {
    let mut path: PathBuf = fqn.split('.').collect();
    path.set_extension(CLASS_EXTENSION);
    path
}

/// A class file copied into the output tree
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractedClass {
    pub module: String,
    pub class: String,
    pub dest: PathBuf,
}

/// Recoverable problem hit during extraction
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExtractIssue {
    /// `<module>.jmod` is not in the jmods directory
    ArchiveMissing { module: String, archive: PathBuf },
    /// The extracted archive has no `classes/` subtree
    NoClassesDir { module: String, archive: PathBuf },
    /// A requested class is not in the extracted tree
    ClassMissing {
        module: String,
        class: String,
        expected: PathBuf,
    },
}

impl ExtractIssue {
    pub fn module(&self) -> &str {
        match self {
            ExtractIssue::ArchiveMissing { module, .. }
            | ExtractIssue::NoClassesDir { module, .. }
            | ExtractIssue::ClassMissing { module, .. } => module,
        }
    }

    fn log(&self) {
        match self {
            ExtractIssue::NoClassesDir { .. } => tracing::warn!("{}", self),
            _ => tracing::error!("{}", self),
        }
    }
}

impl fmt::Display for ExtractIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExtractIssue::ArchiveMissing { archive, .. } => {
                write!(f, "missing {}", archive.display())
            }
            ExtractIssue::NoClassesDir { archive, .. } => {
                write!(f, "no {}/ in {}", CLASSES_DIR, archive.display())
            }
            ExtractIssue::ClassMissing {
                module,
                class,
                expected,
            } => write!(f, "{}:{} not found at {}", module, class, expected.display()),
        }
    }
}

/// What an extraction run produced
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExtractReport {
    pub copied: Vec<ExtractedClass>,
    pub issues: Vec<ExtractIssue>,
}

impl ExtractReport {
    pub fn copied_count(&self) -> usize {
        self.copied.len()
    }

    pub fn is_clean(&self) -> bool {
        self.issues.is_empty()
    }

    fn record(&mut self, issue: ExtractIssue) {
        issue.log();
        self.issues.push(issue);
    }
}

enum ClassOutcome {
    Copied(ExtractedClass),
    Skipped(ExtractIssue),
}

/// Load the manifest ahead of any other work.
///
/// A missing file is `Ok(None)`: extraction is optional. A malformed one
/// is fatal, so callers can fail before spending time compiling.
pub fn load_manifest(manifest_path: &Path) -> FixtureResult<Option<ExtractionManifest>> {
    if !manifest_path.exists() {
        return Ok(None);
    }
    ExtractionManifest::load(manifest_path).map(Some)
}

/// Extract the classes listed in `manifest_path` into `out_dir`.
///
/// `java_home` is the already-resolved JDK root; the caller decides
/// whether it came from a flag or the environment.
pub fn extract(
    manifest_path: &Path,
    out_dir: &Path,
    java_home: Option<&Path>,
    toolchain: &Toolchain,
) -> FixtureResult<ExtractReport> {
    let manifest = load_manifest(manifest_path)?;
    extract_loaded(
        manifest.as_ref(),
        manifest_path,
        out_dir,
        java_home,
        toolchain,
    )
}

/// Extraction for a manifest already returned by [`load_manifest`].
pub fn extract_loaded(
    manifest: Option<&ExtractionManifest>,
    manifest_path: &Path,
    out_dir: &Path,
    java_home: Option<&Path>,
    toolchain: &Toolchain,
) -> FixtureResult<ExtractReport> {
    let Some(manifest) = manifest else {
        println!(
            "No {} found; skipping JDK extraction.",
            manifest_path.display()
        );
        return Ok(ExtractReport::default());
    };
    if manifest.is_empty() {
        println!(
            "{} has no [modules.*] entries; nothing to extract.",
            manifest_path.display()
        );
        return Ok(ExtractReport::default());
    }

    let java_home = java_home.ok_or(FixtureError::MissingJavaHome)?;
    let jmods_dir = java_home.join(JMODS_DIR);
    if !jmods_dir.is_dir() {
        return Err(FixtureError::MissingModulesDir { path: jmods_dir });
    }

    let jmod = toolchain.ensure_tool(JMOD)?;
    let extractor = Extractor::new(jmod, jmods_dir);
    let report = extractor.run(manifest, out_dir)?;

    if report.copied.is_empty() {
        println!("No classes extracted from JDK modules.");
    } else {
        println!(
            "Extracted {} class file(s) to {}",
            report.copied_count(),
            out_dir.display()
        );
    }
    Ok(report)
}

/// Runs `jmod extract` against archives in one jmods directory.
#[derive(Debug, Clone)]
pub struct Extractor {
    jmod: PathBuf,
    jmods_dir: PathBuf,
}

impl Extractor {
    pub fn new(jmod: impl Into<PathBuf>, jmods_dir: impl Into<PathBuf>) -> Self {
        Self {
            jmod: jmod.into(),
            jmods_dir: jmods_dir.into(),
        }
    }

    pub fn archive_path(&self, module: &str) -> PathBuf {
        self.jmods_dir.join(format!("{}.jmod", module))
    }

    /// Process every module of `manifest`, accumulating copies and issues.
    pub fn run(&self, manifest: &ExtractionManifest, out_dir: &Path) -> FixtureResult<ExtractReport> {
        fs::create_dir_all(out_dir)?;

        let mut report = ExtractReport::default();
        for entry in manifest.modules() {
            if entry.classes.is_empty() {
                continue;
            }
            self.extract_module(entry, out_dir, &mut report)?;
        }
        Ok(report)
    }

    fn extract_module(
        &self,
        entry: &ModuleClasses,
        out_dir: &Path,
        report: &mut ExtractReport,
    ) -> FixtureResult<()> {
        let archive = self.archive_path(&entry.module);
        if !archive.is_file() {
            report.record(ExtractIssue::ArchiveMissing {
                module: entry.module.clone(),
                archive,
            });
            return Ok(());
        }

        // Dropped on every early return below, which removes the tree.
        // jmod writes straight into it so nothing lands outside the scope.
        let scratch = tempfile::Builder::new()
            .prefix("jmod_extract_")
            .tempdir()?;
        let extract_dir = scratch.path();

        let status = Command::new(&self.jmod)
            .arg("extract")
            .arg("--dir")
            .arg(extract_dir)
            .arg(&archive)
            .status()?;
        if !status.success() {
            return Err(FixtureError::ArchiveToolFailed {
                archive,
                code: status.code(),
            });
        }

        let classes_root = extract_dir.join(CLASSES_DIR);
        if !classes_root.is_dir() {
            report.record(ExtractIssue::NoClassesDir {
                module: entry.module.clone(),
                archive,
            });
        } else {
            for class in &entry.classes {
                match copy_class(&classes_root, out_dir, &entry.module, class)? {
                    ClassOutcome::Copied(copied) => {
                        println!(
                            "Extracted {}:{} -> {}",
                            copied.module,
                            copied.class,
                            copied.dest.display()
                        );
                        report.copied.push(copied);
                    }
                    ClassOutcome::Skipped(issue) => report.record(issue),
                }
            }
        }

        let scratch_path = scratch.path().to_path_buf();
        if let Err(e) = scratch.close() {
            tracing::warn!(
                "failed to remove extraction dir {}: {}",
                scratch_path.display(),
                e
            );
        }
        Ok(())
    }
}

fn copy_class(
    classes_root: &Path,
    out_dir: &Path,
    module: &str,
    class: &str,
) -> FixtureResult<ClassOutcome> {
    let relative = fqn_to_relative_path(class);
    let src = classes_root.join(&relative);
    if !src.is_file() {
        return Ok(ClassOutcome::Skipped(ExtractIssue::ClassMissing {
            module: module.to_string(),
            class: class.to_string(),
            expected: src,
        }));
    }

    let dest = out_dir.join(&relative);
    if let Some(parent) = dest.parent() {
        fs::create_dir_all(parent)?;
    }
    copy_preserving_mtime(&src, &dest)?;

    Ok(ClassOutcome::Copied(ExtractedClass {
        module: module.to_string(),
        class: class.to_string(),
        dest,
    }))
}

/// `fs::copy` carries permissions; the modification time is set separately.
///
/// Sources may be read-only, so a previous copy is removed rather than
/// overwritten, and the mtime is set through a read-only handle.
fn copy_preserving_mtime(src: &Path, dest: &Path) -> FixtureResult<()> {
    if dest.is_file() {
        fs::remove_file(dest)?;
    }
    fs::copy(src, dest)?;
    let modified = fs::metadata(src)?.modified()?;
    fs::File::open(dest)?.set_modified(modified)?;
    Ok(())
}
