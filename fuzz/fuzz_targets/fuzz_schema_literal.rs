#![no_main]

use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(source) = std::str::from_utf8(data) {
        // Settings descriptions are user-authored; evaluation must never panic
        let _ = shopify_components::schema::literal::evaluate_exports(source);
    }
});
