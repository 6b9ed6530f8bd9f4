//! Property tests for component addressing.

use std::collections::BTreeSet;
use std::path::PathBuf;

use proptest::prelude::*;

use shopify_components::infrastructure::LocalFs;
use shopify_components::TreeResolver;

fn segment() -> impl Strategy<Value = String> {
    proptest::string::string_regex("[a-z][a-z0-9_]{0,7}").unwrap()
}

fn component_dirs() -> impl Strategy<Value = BTreeSet<Vec<String>>> {
    proptest::collection::btree_set(proptest::collection::vec(segment(), 1..=3), 0..6)
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 32,
        .. ProptestConfig::default()
    })]

    /// PROPERTY: every part written into the tree resolves to a component the
    /// full build enumerates, with the same identity.
    #[test]
    fn property_resolve_agrees_with_enumerate(
        dirs in component_dirs(),
        top_level in proptest::collection::btree_set(segment(), 0..3),
    ) {
        let tmp = tempfile::tempdir().unwrap();
        let src = tmp.path().join("src");
        std::fs::create_dir_all(&src).unwrap();

        let mut parts: Vec<PathBuf> = Vec::new();
        for dir in &dirs {
            let path = dir.iter().fold(src.clone(), |p, s| p.join(s));
            std::fs::create_dir_all(&path).unwrap();
            let template = path.join(format!("{}.liquid", dir[dir.len() - 1]));
            std::fs::write(&template, "x").unwrap();
            parts.push(template);
        }
        for name in &top_level {
            let template = src.join(format!("{name}.liquid"));
            std::fs::write(&template, "x").unwrap();
            parts.push(template);
        }

        let resolver = TreeResolver::new(&src, tmp.path().join("out"));
        let enumerated = resolver.enumerate(&LocalFs::new()).unwrap();

        for part in &parts {
            let identity = resolver.resolve(part);
            prop_assert!(identity.is_some(), "{} did not resolve", part.display());
            let identity = identity.unwrap();
            prop_assert!(
                enumerated.contains(&identity),
                "{:?} not in {:?}",
                identity,
                enumerated
            );
        }
    }

    /// PROPERTY: resolution never panics and never escapes the root.
    #[test]
    fn property_resolve_stays_under_root(s in "(?s).{0,128}") {
        let resolver = TreeResolver::new("/project/src", "/project/out");
        if let Some(identity) = resolver.resolve(&PathBuf::from("/project/src").join(&s)) {
            prop_assert!(identity.source_dir.starts_with("/project/src"));
            prop_assert!(identity.output_dir.starts_with("/project/out"));
            prop_assert!(!identity.name.is_empty());
        }
    }
}
