use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use anyhow::{Context, Result};
use shopify_components::config::Config;
use shopify_components::ComponentsPlugin;

use crate::ui::output::event_printer;

pub fn cmd_watch(config: &Config, json: bool) -> Result<()> {
    let config = Config {
        watch_mode: true,
        ..config.clone()
    };
    let mut plugin = ComponentsPlugin::from_config(&config).with_events(event_printer(json));

    // A failed component is reported and watched like any other
    plugin.on_start()?;

    // Set up Ctrl+C handler
    let running = Arc::new(AtomicBool::new(true));
    let running_clone = running.clone();
    ctrlc::set_handler(move || {
        running_clone.store(false, Ordering::SeqCst);
    })
    .context("failed to install the Ctrl+C handler")?;

    plugin.on_artifacts_written()?;
    plugin.watch_until(running)?;
    Ok(())
}
