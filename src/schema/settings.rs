//! Normalized settings document
//!
//! Maps a raw description (`{ name, description, properties: { id: { type,
//! description, default, enum } } }`) onto the theme editor's settings
//! vocabulary through a fixed kind table.

use serde::Serialize;
use serde_json::{Map, Value};

use super::SchemaError;

/// Output setting kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SettingKind {
    Text,
    Textarea,
    Number,
    Checkbox,
    Select,
    Color,
    Url,
    Richtext,
    ImagePicker,
}

impl SettingKind {
    /// Map a source value kind; unknown kinds become `Text`.
    ///
    /// Output vocabulary names map to themselves so already-normalized
    /// descriptions pass through unchanged.
    pub fn from_source(kind: &str) -> Self {
        match kind.to_ascii_lowercase().as_str() {
            "string" | "text" => SettingKind::Text,
            "textarea" => SettingKind::Textarea,
            "number" | "integer" => SettingKind::Number,
            "boolean" | "bool" | "checkbox" => SettingKind::Checkbox,
            "select" | "enum" => SettingKind::Select,
            "color" => SettingKind::Color,
            "url" => SettingKind::Url,
            "richtext" => SettingKind::Richtext,
            "image" | "image_picker" => SettingKind::ImagePicker,
            _ => SettingKind::Text,
        }
    }
}

/// One `(value, label)` choice of an enumerated setting
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SettingOption {
    pub value: Value,
    pub label: String,
}

/// One entry of the settings list
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Setting {
    #[serde(rename = "type")]
    pub kind: SettingKind,
    pub id: String,
    pub label: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default: Option<Value>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub options: Vec<SettingOption>,
}

/// The settings block embedded at the end of a composite document
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SettingsDocument {
    pub name: String,
    pub class: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub settings: Vec<Setting>,
}

impl SettingsDocument {
    /// Document with defaults populated and no settings
    pub fn empty(component_name: &str) -> Self {
        Self {
            name: component_name.to_string(),
            class: component_name.to_string(),
            description: None,
            settings: Vec::new(),
        }
    }

    /// Pretty JSON with two-space indentation
    pub fn to_json_pretty(&self) -> String {
        serde_json::to_string_pretty(self).unwrap_or_else(|_| "{}".to_string())
    }
}

/// Normalize a raw description value into a settings document
pub fn normalize(raw: &Value, component_name: &str) -> Result<SettingsDocument, SchemaError> {
    let object = raw.as_object().ok_or(SchemaError::NotAnObject)?;
    let mut doc = SettingsDocument::empty(component_name);

    if let Some(name) = non_empty_str(object.get("name")) {
        doc.name = name.to_string();
    }
    if let Some(class) = non_empty_str(object.get("class")) {
        doc.class = class.to_string();
    }
    doc.description = non_empty_str(object.get("description")).map(str::to_string);

    if let Some(Value::Object(properties)) = object.get("properties") {
        doc.settings = properties
            .iter()
            .map(|(id, property)| setting_from_property(id, property))
            .collect();
    } else if let Some(Value::Array(settings)) = object.get("settings") {
        doc.settings = settings
            .iter()
            .filter_map(|entry| {
                let fields = entry.as_object()?;
                let id = non_empty_str(fields.get("id"))?;
                Some(setting_from_fields(id, fields))
            })
            .collect();
    }

    Ok(doc)
}

fn setting_from_property(id: &str, property: &Value) -> Setting {
    match property {
        Value::Object(fields) => setting_from_fields(id, fields),
        // `title: 'string'` shorthand
        Value::String(kind) => Setting {
            kind: SettingKind::from_source(kind),
            id: id.to_string(),
            label: humanize(id),
            default: None,
            options: Vec::new(),
        },
        _ => Setting {
            kind: SettingKind::Text,
            id: id.to_string(),
            label: humanize(id),
            default: None,
            options: Vec::new(),
        },
    }
}

fn setting_from_fields(id: &str, fields: &Map<String, Value>) -> Setting {
    let options: Vec<SettingOption> = fields
        .get("enum")
        .or_else(|| fields.get("options"))
        .and_then(Value::as_array)
        .map(|choices| choices.iter().filter_map(option_from_choice).collect())
        .unwrap_or_default();

    let kind = if options.is_empty() {
        non_empty_str(fields.get("type"))
            .map(SettingKind::from_source)
            .unwrap_or(SettingKind::Text)
    } else {
        SettingKind::Select
    };

    let label = non_empty_str(fields.get("label"))
        .or_else(|| non_empty_str(fields.get("description")))
        .map(str::to_string)
        .unwrap_or_else(|| humanize(id));

    let default = fields.get("default").filter(|v| !v.is_null()).cloned();

    Setting {
        kind,
        id: id.to_string(),
        label,
        default,
        options,
    }
}

fn option_from_choice(choice: &Value) -> Option<SettingOption> {
    match choice {
        Value::Object(fields) => {
            let value = fields.get("value")?.clone();
            let label = non_empty_str(fields.get("label"))
                .map(str::to_string)
                .unwrap_or_else(|| humanize(&scalar_text(&value)));
            Some(SettingOption { value, label })
        }
        Value::Null | Value::Array(_) => None,
        scalar => Some(SettingOption {
            value: scalar.clone(),
            label: humanize(&scalar_text(scalar)),
        }),
    }
}

fn non_empty_str(value: Option<&Value>) -> Option<&str> {
    value
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|s| !s.is_empty())
}

fn scalar_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// `full_width` -> `Full width`, `icon-position` -> `Icon position`
pub fn humanize(id: &str) -> String {
    let spaced: String = id
        .chars()
        .map(|c| if c == '_' || c == '-' { ' ' } else { c })
        .collect();
    let spaced = spaced.split_whitespace().collect::<Vec<_>>().join(" ");
    let mut chars = spaced.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => id.to_string(),
    }
}
