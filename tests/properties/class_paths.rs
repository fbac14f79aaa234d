//! Property tests for class name to class-file path mapping.

use std::path::PathBuf;

use proptest::prelude::*;

use classprep::fqn_to_relative_path;
use classprep::manifest::is_valid_class_name;

fn segment() -> impl Strategy<Value = String> {
    proptest::string::string_regex("[A-Za-z_$][A-Za-z0-9_$]{0,12}").unwrap()
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 128,
        .. ProptestConfig::default()
    })]

    /// PROPERTY: `a.b.C` maps to segments `a`, `b`, `C.class`.
    #[test]
    fn property_fqn_maps_segment_per_dot(
        segments in proptest::collection::vec(segment(), 1..=6),
    ) {
        let fqn = segments.join(".");
        prop_assert!(is_valid_class_name(&fqn));

        let mut expected: PathBuf = segments[..segments.len() - 1].iter().collect();
        expected.push(format!("{}.class", segments[segments.len() - 1]));

        prop_assert_eq!(fqn_to_relative_path(&fqn), expected);
    }

    /// PROPERTY: names with an empty segment are never valid.
    #[test]
    fn property_empty_segment_is_invalid(
        head in proptest::collection::vec(segment(), 0..=3),
        tail in proptest::collection::vec(segment(), 0..=3),
    ) {
        let mut segments = head;
        segments.push(String::new());
        segments.extend(tail);
        prop_assert!(!is_valid_class_name(&segments.join(".")));
    }
}
