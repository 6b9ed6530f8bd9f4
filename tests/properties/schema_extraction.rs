//! Property tests for settings extraction.

use proptest::prelude::*;

use shopify_components::models::SettingsSource;
use shopify_components::schema::SchemaExtractor;

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 128,
        .. ProptestConfig::default()
    })]

    /// PROPERTY: extraction never panics and always names the document.
    #[test]
    fn property_extract_never_panics(s in "(?s).{0,256}") {
        let extracted = SchemaExtractor::default().extract(&s, "hero");
        prop_assert!(!extracted.document.name.is_empty());
        prop_assert!(!extracted.document.class.is_empty());
    }

    /// PROPERTY: literal settings arrays are extracted exactly, in order.
    #[test]
    fn property_literal_settings_are_evaluated(
        ids in proptest::collection::vec("[a-z_][a-z0-9_]{0,9}", 0..8),
    ) {
        let entries: Vec<String> = ids
            .iter()
            .map(|id| format!("{{ type: 'text', id: '{id}', label: '{id}' }}"))
            .collect();
        let source = format!("module.exports = {{ settings: [{}] }};", entries.join(", "));

        let extracted = SchemaExtractor::default().extract(&source, "hero");

        prop_assert_eq!(extracted.source, SettingsSource::Evaluated);
        let got: Vec<&str> = extracted.document.settings.iter().map(|s| s.id.as_str()).collect();
        let want: Vec<&str> = ids.iter().map(String::as_str).collect();
        prop_assert_eq!(got, want);
    }
}
