use anyhow::{bail, Result};
use shopify_components::config::Config;
use shopify_components::ComponentsPlugin;

use crate::ui::output::event_printer;

pub fn cmd_build(config: &Config, json: bool) -> Result<()> {
    if config.watch_mode {
        return super::watch::cmd_watch(config, json);
    }

    let mut plugin = ComponentsPlugin::from_config(config).with_events(event_printer(json));
    let report = plugin.on_start()?;

    if !report.is_success() {
        bail!("{} component(s) failed to build", report.failed.len());
    }
    Ok(())
}
