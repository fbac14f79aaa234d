//! Property tests for source discovery.

use std::path::{Path, PathBuf};

use proptest::prelude::*;
use tempfile::tempdir;

use classprep::discover;
use classprep::discover::EXCLUDED_COMPONENT;

fn relative_file() -> impl Strategy<Value = (Vec<String>, String, bool)> {
    (
        proptest::collection::vec("[a-z]{1,6}", 0..=3),
        "[A-Z][a-z]{0,6}",
        any::<bool>(),
    )
}

fn materialise(root: &Path, dirs: &[String], name: &str, java: bool) -> PathBuf {
    let mut path = root.to_path_buf();
    for dir in dirs {
        path.push(dir);
    }
    std::fs::create_dir_all(&path).unwrap();
    path.push(if java {
        format!("{}.java", name)
    } else {
        format!("{}.txt", name)
    });
    std::fs::write(&path, "class X {}").unwrap();
    path
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 48,
        .. ProptestConfig::default()
    })]

    /// PROPERTY: discovery is deterministic, sorted, and only returns `.java` files.
    #[test]
    fn property_discover_is_deterministic_and_sorted(
        files in proptest::collection::vec(relative_file(), 0..=12),
    ) {
        let dir = tempdir().unwrap();
        for (dirs, name, java) in &files {
            materialise(dir.path(), dirs, name, *java);
        }

        let first = discover(dir.path());
        let second = discover(dir.path());

        prop_assert_eq!(&first, &second);
        let mut sorted = first.clone();
        sorted.sort();
        prop_assert_eq!(&first, &sorted);
        prop_assert!(first.iter().all(|p| p.extension().is_some_and(|e| e == "java")));
    }

    /// PROPERTY: nothing under a `java.base` component is ever discovered.
    #[test]
    fn property_java_base_is_always_excluded(
        prefix in proptest::collection::vec("[a-z]{1,6}", 0..=2),
        suffix in proptest::collection::vec("[a-z]{1,6}", 0..=2),
        name in "[A-Z][a-z]{0,6}",
    ) {
        let dir = tempdir().unwrap();
        let mut dirs = prefix;
        dirs.push(EXCLUDED_COMPONENT.to_string());
        dirs.extend(suffix);
        let excluded = materialise(dir.path(), &dirs, &name, true);
        let kept = materialise(dir.path(), &["kept".to_string()], &name, true);

        let found = discover(dir.path());

        prop_assert!(!found.contains(&excluded));
        prop_assert_eq!(found, vec![kept]);
    }

    /// PROPERTY: a missing root is an empty result, never a failure.
    #[test]
    fn property_missing_root_is_empty(name in "[a-z]{1,10}") {
        let dir = tempdir().unwrap();
        prop_assert!(discover(&dir.path().join(name)).is_empty());
    }
}
