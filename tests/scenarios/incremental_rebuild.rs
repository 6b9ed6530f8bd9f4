//! Scenario: editing one part rebuilds exactly one component
//!
//! Journey: a theme developer runs watch mode and edits a stylesheet, then
//! saves a template several times in quick succession.

use shopify_components::domain::ports::WatchStrategy;
use shopify_components::BuildEvent;

use crate::common::*;
use crate::session::*;

fn project() -> Project {
    Project::new(&[
        ("src/hero/hero.liquid", HERO_LIQUID),
        ("src/hero/hero.scss", HERO_SCSS),
        ("src/snippets/card/card.liquid", CARD_LIQUID),
    ])
}

#[test]
fn scenario_stylesheet_edit_rebuilds_only_its_component() {
    let project = project();
    let config = project.config(WatchStrategy::Auto, 50);
    let scss = project.path("src/hero/hero.scss");
    let card_out = project.path("out/snippets/card.liquid");

    let outcome = watch_session(&config, {
        let card_out = card_out.clone();
        move || {
            // gone after the full build; only a card rebuild would bring it back
            std::fs::remove_file(&card_out).unwrap();
            write(&scss, "& { margin: 0; }\n");
        }
    });

    assert!(outcome.rebuilds_of("hero") >= 1, "events: {:?}", outcome.events);
    assert_eq!(outcome.rebuilds_of("card"), 0);
    assert!(!card_out.exists());
    assert!(project.read("out/hero/hero.liquid").contains(".hero { margin: 0; }"));
    assert!(project.read("out/assets/hero-hero.css").contains(".hero { margin: 0; }"));
}

#[test]
fn scenario_burst_of_saves_coalesces_into_one_rebuild() {
    let project = project();
    let config = project.config(WatchStrategy::Recursive, 250);
    let template = project.path("src/hero/hero.liquid");

    let outcome = watch_session(&config, move || {
        for i in 0..5 {
            write(&template, &format!("<h1>save {i}</h1>"));
        }
    });

    assert_eq!(outcome.rebuilds_of("hero"), 1, "events: {:?}", outcome.events);
    assert!(project.read("out/hero/hero.liquid").starts_with("<h1>save 4</h1>"));
}

#[test]
fn scenario_shutdown_releases_watchers() {
    let project = project();
    let config = project.config(WatchStrategy::PerDirectory, 50);

    let outcome = watch_session(&config, || {});

    // src, src/hero, src/snippets, src/snippets/card
    assert_eq!(outcome.teardown.watchers_released, 4);
    assert_eq!(outcome.teardown.timers_cancelled, 0);
    assert!(matches!(
        outcome.events.last(),
        Some(BuildEvent::Shutdown { watchers_released: 4, .. })
    ));
}
