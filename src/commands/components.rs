use anyhow::Result;
use shopify_components::config::Config;
use shopify_components::infrastructure::LocalFs;
use shopify_components::TreeResolver;

pub fn cmd_components(config: &Config, json: bool) -> Result<()> {
    let fs = LocalFs::new();
    let resolver = TreeResolver::new(&config.src_dir, &config.output_dir);
    let components = resolver.enumerate(&fs)?;

    for identity in &components {
        let parts = resolver.locate_parts(&fs, identity)?;
        let source = resolver.relative_source(&identity.source_dir);
        if json {
            crate::ui::output::emit_json(serde_json::json!({
                "event": "component",
                "name": identity.name,
                "source_dir": source.display().to_string(),
                "template": parts.template.is_some(),
                "stylesheet": parts.stylesheet.is_some(),
                "schema": parts.schema.is_some(),
            }))?;
        } else {
            let mut kinds = Vec::new();
            if parts.template.is_some() {
                kinds.push("liquid");
            }
            if parts.stylesheet.is_some() {
                kinds.push("scss");
            }
            if parts.schema.is_some() {
                kinds.push("schema");
            }
            let source = if source.as_os_str().is_empty() {
                ".".to_string()
            } else {
                source.display().to_string()
            };
            println!("{:<24} {:<32} [{}]", identity.name, source, kinds.join(", "));
        }
    }

    if json {
        crate::ui::output::emit_json(serde_json::json!({
            "event": "complete",
            "command": "components",
            "count": components.len(),
        }))?;
    } else {
        println!("\n{} component(s)", components.len());
    }
    Ok(())
}
