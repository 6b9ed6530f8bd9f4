use std::path::Path;

use anyhow::{Context, Result};
use shopify_components::config::Config;
use shopify_components::{SourceBoundary, TreeResolver};

pub fn cmd_resolve(config: &Config, path: &Path, json: bool) -> Result<()> {
    let cwd = std::env::current_dir().context("cannot determine the current directory")?;
    let absolute = cwd.join(path);

    let boundary = SourceBoundary::new(&config.src_dir);
    let contained = boundary.contain(&absolute)?;
    let resolver = TreeResolver::new(boundary.root(), &config.output_dir);

    let Some(identity) = resolver.resolve(&contained) else {
        if json {
            crate::ui::output::emit_json(serde_json::json!({
                "event": "unresolved",
                "path": contained.display().to_string(),
            }))?;
        } else {
            println!("{} does not belong to a component", contained.display());
        }
        return Ok(());
    };

    let stylesheet = config.assets_dir().join(resolver.stylesheet_artifact_name(&identity));
    if json {
        crate::ui::output::emit_json(serde_json::json!({
            "event": "resolved",
            "path": contained.display().to_string(),
            "component": identity.name,
            "source_dir": identity.source_dir.display().to_string(),
            "document": identity.document_path().display().to_string(),
            "stylesheet": stylesheet.display().to_string(),
        }))?;
    } else {
        println!("Component: {}", identity.name);
        println!("Source:    {}", identity.source_dir.display());
        println!("Document:  {}", identity.document_path().display());
        println!("Styles:    {}", stylesheet.display());
    }
    Ok(())
}
