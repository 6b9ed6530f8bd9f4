//! Property tests for the structural stylesheet fallback.

use proptest::prelude::*;

use shopify_components::style::fallback_transform;

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 256,
        .. ProptestConfig::default()
    })]

    /// PROPERTY: every parent selector is replaced.
    #[test]
    fn property_no_parent_selector_survives(s in "(?s).{0,256}") {
        let css = fallback_transform(&s, "hero");
        prop_assert!(!css.contains('&'));
    }

    /// PROPERTY: plain CSS without parent selectors or comments passes through.
    #[test]
    fn property_plain_css_is_unchanged(s in "[a-z0-9 {};:.#\n-]{0,256}") {
        prop_assert_eq!(fallback_transform(&s, "hero"), s);
    }
}
