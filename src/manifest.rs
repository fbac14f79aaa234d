//! Extraction manifest loading
//!
//! The manifest names which classes to copy out of which JDK modules:
//!
//! ```toml
//! [modules."java.base"]
//! classes = ["java.lang.Object", "java.util.Map$Entry"]
//! ```
//!
//! Module and class names are validated here, once, so extraction can
//! join them onto paths without further checks.

use std::collections::HashSet;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use serde::de::{Deserializer, MapAccess, Visitor};
use serde::Deserialize;

use crate::error::{FixtureError, FixtureResult};

/// Classes requested from a single module, in manifest order without duplicates
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModuleClasses {
    pub module: String,
    pub classes: Vec<String>,
}

/// Typed, validated manifest
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExtractionManifest {
    modules: Vec<ModuleClasses>,
}

/// Unknown key found while loading; reported, never fatal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ManifestWarning {
    pub key: String,
    pub file: PathBuf,
}

impl fmt::Display for ManifestWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown key '{}' in {}", self.key, self.file.display())
    }
}

#[derive(Debug, Default, Deserialize)]
struct ManifestFile {
    #[serde(default, deserialize_with = "ordered_modules")]
    modules: Vec<(String, ModuleEntry)>,
}

#[derive(Debug, Default, Deserialize)]
struct ModuleEntry {
    #[serde(default)]
    classes: Vec<String>,
}

/// Keep modules in document order instead of hashing them into a map.
fn ordered_modules<'de, D>(deserializer: D) -> Result<Vec<(String, ModuleEntry)>, D::Error>
where
    D: Deserializer<'de>,
{
    struct ModulesVisitor;

    impl<'de> Visitor<'de> for ModulesVisitor {
        type Value = Vec<(String, ModuleEntry)>;

        fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str("a table of module names")
        }

        fn visit_map<A>(self, mut map: A) -> Result<Self::Value, A::Error>
        where
            A: MapAccess<'de>,
        {
            let mut modules = Vec::new();
            while let Some((name, entry)) = map.next_entry::<String, ModuleEntry>()? {
                modules.push((name, entry));
            }
            Ok(modules)
        }
    }

    deserializer.deserialize_map(ModulesVisitor)
}

impl ExtractionManifest {
    /// Load a manifest file, logging any unknown keys.
    pub fn load(path: &Path) -> FixtureResult<Self> {
        let (manifest, warnings) = Self::load_with_warnings(path)?;
        for warning in &warnings {
            tracing::warn!("{}", warning);
        }
        Ok(manifest)
    }

    /// Load a manifest file and return unknown-key warnings alongside it.
    pub fn load_with_warnings(path: &Path) -> FixtureResult<(Self, Vec<ManifestWarning>)> {
        let content = fs::read_to_string(path)?;
        Self::parse(&content, path)
    }

    /// Parse manifest text; `file` is only used for messages.
    pub fn parse(content: &str, file: &Path) -> FixtureResult<(Self, Vec<ManifestWarning>)> {
        let mut unknown_paths: Vec<String> = Vec::new();
        let deserializer = toml::de::Deserializer::new(content);

        let raw: ManifestFile = serde_ignored::deserialize(deserializer, |p| {
            unknown_paths.push(p.to_string());
        })
        .map_err(|e| FixtureError::InvalidManifest {
            file: file.to_path_buf(),
            message: e.to_string(),
        })?;

        let mut modules = Vec::with_capacity(raw.modules.len());
        for (module, entry) in raw.modules {
            if !is_valid_module_name(&module) {
                return Err(FixtureError::InvalidManifest {
                    file: file.to_path_buf(),
                    message: format!("invalid module name '{}'", module),
                });
            }
            let mut seen = HashSet::new();
            let mut classes = Vec::with_capacity(entry.classes.len());
            for class in entry.classes {
                if !is_valid_class_name(&class) {
                    return Err(FixtureError::InvalidClassName {
                        file: file.to_path_buf(),
                        module,
                        class,
                    });
                }
                if seen.insert(class.clone()) {
                    classes.push(class);
                }
            }
            modules.push(ModuleClasses { module, classes });
        }

        let warnings = unknown_paths
            .into_iter()
            .map(|key| ManifestWarning {
                key,
                file: file.to_path_buf(),
            })
            .collect();

        Ok((Self { modules }, warnings))
    }

    /// True when the manifest has no module entries at all.
    pub fn is_empty(&self) -> bool {
        self.modules.is_empty()
    }

    pub fn modules(&self) -> &[ModuleClasses] {
        &self.modules
    }

    /// Total number of requested classes across modules.
    pub fn class_count(&self) -> usize {
        self.modules.iter().map(|m| m.classes.len()).sum()
    }
}

/// Dot-separated, no empty segments, no path separators.
pub fn is_valid_class_name(name: &str) -> bool {
    is_qualified_name(name)
}

/// Module names join onto the jmods directory, so they follow the same
/// rule: `..`, `/abs/path` and `a/b` are all rejected.
pub fn is_valid_module_name(name: &str) -> bool {
    is_qualified_name(name)
}

fn is_qualified_name(name: &str) -> bool {
    !name.is_empty()
        && name
            .split('.')
            .all(|segment| !segment.is_empty() && !segment.contains(['/', '\\']))
}
