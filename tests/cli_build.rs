//! `build` command: composite documents and stylesheet artifacts on disk.

mod common;

use common::*;

fn hero_project() -> TestEnv {
    TestEnv::builder()
        .with_file("src/hero/hero.liquid", HERO_LIQUID)
        .with_file("src/hero/hero.scss", HERO_SCSS)
        .with_file("src/hero/schema.js", HERO_SCHEMA)
        .with_file("src/snippets/card/card.liquid", CARD_LIQUID)
        .with_file("src/banner.liquid", BANNER_LIQUID)
        .build()
}

#[test]
fn build_writes_one_document_per_component() {
    let env = hero_project();

    let result = env.run(&["build"]);

    assert!(result.success, "build failed:\n{}", result.combined_output());
    assert!(env.project_path("shopify_bundle/hero/hero.liquid").is_file());
    assert!(env.project_path("shopify_bundle/snippets/card.liquid").is_file());
    assert!(env.project_path("shopify_bundle/banner.liquid").is_file());
    assert!(result.stdout.contains("Built 3 component(s), 0 failed"));
}

#[test]
fn build_assembles_template_styles_and_settings_in_order() {
    let env = hero_project();
    assert!(env.run(&["build"]).success);

    let document = env.read("shopify_bundle/hero/hero.liquid");

    assert!(document.starts_with(HERO_LIQUID));
    let styles = document.find("{% stylesheet %}").unwrap();
    let schema = document.find("{% schema %}").unwrap();
    assert!(styles < schema);
    assert!(document.contains(".hero:hover"));
    assert!(document.contains("\"name\": \"Hero\""));
    assert!(document.contains("\"default\": \"Welcome\""));
    assert!(document.ends_with("{% endschema %}\n"));
}

#[test]
fn build_writes_stylesheet_artifacts_only_for_styled_components() {
    let env = hero_project();
    assert!(env.run(&["build"]).success);

    let css = env.read("shopify_bundle/assets/hero-hero.css");
    assert!(css.contains(".hero"));
    assert!(!env.project_path("shopify_bundle/assets/snippets-card-card.css").exists());
    assert!(!env.project_path("shopify_bundle/assets/banner.css").exists());
}

#[test]
fn template_only_component_has_no_extra_blocks() {
    let env = hero_project();
    assert!(env.run(&["build"]).success);

    assert_eq!(env.read("shopify_bundle/banner.liquid"), BANNER_LIQUID);
}

#[test]
fn build_is_idempotent() {
    let env = hero_project();
    assert!(env.run(&["build"]).success);
    let first = env.read("shopify_bundle/hero/hero.liquid");

    assert!(env.run(&["build"]).success);
    assert_eq!(env.read("shopify_bundle/hero/hero.liquid"), first);
}

#[test]
fn build_honours_output_flags() {
    let env = hero_project();

    let result = env.run(&["build", "--out", "dist", "--assets", "dist/css"]);

    assert!(result.success, "{}", result.combined_output());
    assert!(env.project_path("dist/hero/hero.liquid").is_file());
    assert!(env.project_path("dist/css/hero-hero.css").is_file());
    assert!(!env.project_path("shopify_bundle").exists());
}

#[test]
fn build_reads_directories_from_config_file() {
    let env = TestEnv::builder()
        .with_config("src_dir = \"theme/components\"\noutput_dir = \"theme/sections\"\n\n[style]\ncompiler = []\n")
        .with_file("theme/components/hero/hero.liquid", HERO_LIQUID)
        .build();

    let result = env.run(&["build"]);

    assert!(result.success, "{}", result.combined_output());
    assert!(env.project_path("theme/sections/hero/hero.liquid").is_file());
}

#[test]
fn build_without_source_directory_fails() {
    let env = TestEnv::builder().build();

    let result = env.run(&["build"]);

    assert!(!result.success);
    assert!(
        result.stderr.contains("source directory not found"),
        "stderr: {}",
        result.stderr
    );
}

#[test]
fn build_json_emits_ndjson_events() {
    let env = hero_project();

    let result = env.run(&["build", "--json"]);

    assert!(result.success, "{}", result.combined_output());
    let events = result.json_events();
    assert_eq!(events.first().unwrap()["event"], "build_started");
    let last = events.last().unwrap();
    assert_eq!(last["event"], "build_complete");
    assert_eq!(last["built"], 3);
    assert_eq!(last["failed"], 0);

    let hero = events
        .iter()
        .find(|e| e["event"] == "component_built" && e["component"] == "hero")
        .unwrap();
    assert!(hero["stylesheet"].as_str().unwrap().ends_with("hero-hero.css"));
}

#[test]
fn unknown_config_keys_are_warned_about() {
    let env = TestEnv::builder()
        .with_config("debounce_dely = 5\n\n[style]\ncompiler = []\n")
        .with_file("src/banner.liquid", BANNER_LIQUID)
        .build();

    let result = env.run(&["build"]);

    assert!(result.success);
    assert!(result.stderr.contains("Unknown config key 'debounce_dely'"));
    assert!(result.stderr.contains("Did you mean 'debounce_delay'?"));
}
