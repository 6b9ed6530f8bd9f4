//! Scenario: components added while watching
//!
//! Journey: with the per-directory strategy, a developer creates a new
//! component directory mid-session and saves its template.

use shopify_components::domain::ports::WatchStrategy;
use shopify_components::BuildEvent;

use crate::common::*;
use crate::session::*;

#[test]
fn scenario_new_component_directory_is_picked_up() {
    let project = Project::new(&[("src/hero/hero.liquid", HERO_LIQUID)]);
    let config = project.config(WatchStrategy::PerDirectory, 50);
    let promo_dir = project.path("src/blocks/promo");
    let promo = promo_dir.join("promo.liquid");

    let outcome = watch_session(&config, move || {
        std::fs::create_dir_all(&promo_dir).unwrap();
        std::thread::sleep(SETTLE);
        write(&promo, BANNER_LIQUID);
    });

    assert!(outcome.rebuilds_of("promo") >= 1, "events: {:?}", outcome.events);
    assert_eq!(project.read("out/blocks/promo.liquid"), BANNER_LIQUID);
    assert!(outcome.teardown.watchers_released >= 4);
}

#[test]
fn scenario_files_outside_components_are_ignored() {
    let project = Project::new(&[("src/hero/hero.liquid", HERO_LIQUID)]);
    let config = project.config(WatchStrategy::Auto, 50);
    let notes = project.path("src/hero/notes.md");
    let script = project.path("src/hero/index.js");

    let outcome = watch_session(&config, move || {
        write(&notes, "todo");
        write(&script, "console.log(1)");
    });

    // notes.md is filtered by extension; index.js resolves to hero but adds nothing new
    assert!(!outcome
        .events
        .iter()
        .any(|e| matches!(e, BuildEvent::FileChanged { path, .. } if path.ends_with("notes.md"))));
    assert!(outcome.events.iter().all(|e| !e.is_error()));
}
