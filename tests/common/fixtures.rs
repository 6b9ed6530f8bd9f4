//! Reusable component sources.

pub const HERO_LIQUID: &str = "<section class=\"hero\"><h1>{{ section.settings.title }}</h1></section>";

pub const HERO_SCSS: &str = "& {\n  padding: 2rem;\n}\n\n&:hover {\n  color: blue;\n}\n";

pub const HERO_SCHEMA: &str = r#"export default {
  name: "Hero",
  settings: [
    { type: "text", id: "title", label: "Title", default: "Welcome" }
  ]
};
"#;

pub const CARD_LIQUID: &str = "<div class=\"card\">{{ product.title }}</div>";

pub const BANNER_LIQUID: &str = "<div class=\"banner\">{{ message }}</div>";

/// Project config that never shells out to a stylesheet compiler
pub const OFFLINE_CONFIG: &str = "[style]\ncompiler = []\n";
