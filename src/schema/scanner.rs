//! Pattern scanner for settings descriptions
//!
//! Best-effort extraction used when literal evaluation is disabled or fails.
//! It reads the description line by line and recognizes one fixed shape:
//!
//! ```text
//! <anything> {                      root object (first `{` at depth 0)
//!   name: '<string>',
//!   description: '<string>',
//!   properties: {
//!     <id>: {
//!       type: '<kind>',
//!       description: '<label>',
//!       default: <literal>,
//!       enum: [<literal>, ...],     may span several lines
//!     },
//!   },
//! }
//! ```
//!
//! Values are parsed with the literal evaluator's expression parser; a value
//! it cannot parse is skipped. Everything outside this shape is ignored.

use std::sync::LazyLock;

use regex::Regex;
use serde_json::{Map, Value};

use super::literal::evaluate_expression;
use super::SchemaError;

static KEY_VALUE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"^\s*(?:([A-Za-z_$][\w$]*)|'([^']*)'|"([^"]*)")\s*:\s*(.*?)\s*,?\s*$"#)
        .expect("valid key/value pattern")
});

/// Keys kept from a property block
const PROPERTY_KEYS: [&str; 5] = ["type", "description", "label", "default", "enum"];
/// Keys kept from the root object
const ROOT_KEYS: [&str; 3] = ["name", "description", "class"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Region {
    /// Before the root object
    Preamble,
    /// Directly inside the root object
    Root,
    /// Directly inside `properties: { ... }`
    Properties,
    /// Inside one property's object
    Property,
}

/// Scan `source` into the raw `{ name, description, properties }` shape
pub fn scan(source: &str) -> Result<Value, SchemaError> {
    let mut root = Map::new();
    let mut properties = Map::new();
    let mut current: Option<(String, Map<String, Value>)> = None;
    let mut saw_properties = false;

    let mut region = Region::Preamble;
    // brace depth relative to the region we are in
    let mut depth: i32 = 0;
    // a multi-line array value being accumulated: (key, text, bracket balance)
    let mut pending: Option<(String, String, i32)> = None;
    let mut in_block_comment = false;

    for raw_line in source.lines() {
        let line = strip_comments(raw_line, &mut in_block_comment);
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        if let Some((key, mut text, balance)) = pending.take() {
            text.push(' ');
            text.push_str(line);
            let balance = balance + bracket_balance(line, '[', ']');
            if balance > 0 {
                pending = Some((key, text, balance));
            } else if let Some((_, fields)) = current.as_mut() {
                insert_literal(fields, &key, text.trim_end_matches(','));
            }
            continue;
        }

        let opens = bracket_balance(line, '{', '}');

        match region {
            Region::Preamble => {
                if line.contains('{') {
                    region = Region::Root;
                    depth = 0;
                    // `const schema = { name: 'x',` style first lines
                    if let Some(after) = line.split_once('{').map(|(_, rest)| rest.trim()) {
                        if let Some((key, value)) = key_value(after) {
                            keep_root(&mut root, &key, value);
                        }
                    }
                }
            }
            Region::Root => {
                if depth == 0 {
                    if let Some((key, value)) = key_value(line) {
                        if key == "properties" && value.starts_with('{') {
                            saw_properties = true;
                            region = Region::Properties;
                            depth = 0;
                            continue;
                        }
                        keep_root(&mut root, &key, value);
                    }
                }
                depth += opens;
                if depth < 0 {
                    break;
                }
            }
            Region::Properties => {
                if depth == 0 {
                    if line.starts_with('}') {
                        region = Region::Root;
                        depth = 0;
                        continue;
                    }
                    if let Some((key, value)) = key_value(line) {
                        if value.starts_with('{') {
                            current = Some((key, Map::new()));
                            region = Region::Property;
                            depth = 0;
                            // `title: { type: 'string' },` on a single line
                            if opens == 0 {
                                single_line_property(&mut current, value);
                                flush(&mut properties, &mut current);
                                region = Region::Properties;
                            }
                            continue;
                        }
                    }
                }
                depth += opens;
            }
            Region::Property => {
                if depth == 0 && line.starts_with('}') {
                    flush(&mut properties, &mut current);
                    region = Region::Properties;
                    depth = 0;
                    continue;
                }
                if depth == 0 {
                    if let Some((key, value)) = key_value(line) {
                        if PROPERTY_KEYS.contains(&key.as_str()) {
                            let balance = bracket_balance(value, '[', ']');
                            if balance > 0 {
                                pending = Some((key, value.to_string(), balance));
                                continue;
                            }
                            if let Some((_, fields)) = current.as_mut() {
                                insert_literal(fields, &key, value);
                            }
                        }
                    }
                }
                depth += opens;
            }
        }
    }
    flush(&mut properties, &mut current);

    if !saw_properties && root.is_empty() {
        return Err(SchemaError::NoMatch);
    }
    root.insert("properties".to_string(), Value::Object(properties));
    Ok(Value::Object(root))
}

fn key_value(line: &str) -> Option<(String, &str)> {
    let caps = KEY_VALUE.captures(line)?;
    let key = caps
        .get(1)
        .or_else(|| caps.get(2))
        .or_else(|| caps.get(3))?
        .as_str()
        .to_string();
    let value = caps.get(4)?.as_str();
    Some((key, value))
}

fn keep_root(root: &mut Map<String, Value>, key: &str, value: &str) {
    if ROOT_KEYS.contains(&key) {
        insert_literal(root, key, value);
    }
}

fn insert_literal(fields: &mut Map<String, Value>, key: &str, value: &str) {
    if let Ok(parsed) = evaluate_expression(value.trim().trim_end_matches(',')) {
        fields.insert(key.to_string(), parsed);
    }
}

/// `{ type: 'string', default: 'Hi' }` written on one line
fn single_line_property(current: &mut Option<(String, Map<String, Value>)>, value: &str) {
    let Some((_, fields)) = current.as_mut() else {
        return;
    };
    if let Ok(Value::Object(parsed)) = evaluate_expression(value.trim_end_matches(',')) {
        for (key, value) in parsed {
            if PROPERTY_KEYS.contains(&key.as_str()) {
                fields.insert(key, value);
            }
        }
    }
}

fn flush(properties: &mut Map<String, Value>, current: &mut Option<(String, Map<String, Value>)>) {
    if let Some((id, fields)) = current.take() {
        properties.insert(id, Value::Object(fields));
    }
}

/// Net count of `open` minus `close` outside of string literals
fn bracket_balance(line: &str, open: char, close: char) -> i32 {
    let mut balance = 0;
    let mut quote: Option<char> = None;
    let mut escaped = false;
    for c in line.chars() {
        if let Some(q) = quote {
            if escaped {
                escaped = false;
            } else if c == '\\' {
                escaped = true;
            } else if c == q {
                quote = None;
            }
            continue;
        }
        match c {
            '\'' | '"' | '`' => quote = Some(c),
            c if c == open => balance += 1,
            c if c == close => balance -= 1,
            _ => {}
        }
    }
    balance
}

/// Remove `//` and `/* */` comments that sit outside string literals
fn strip_comments(line: &str, in_block_comment: &mut bool) -> String {
    let mut out = String::with_capacity(line.len());
    let mut chars = line.chars().peekable();
    let mut quote: Option<char> = None;
    while let Some(c) = chars.next() {
        if *in_block_comment {
            if c == '*' && chars.peek() == Some(&'/') {
                chars.next();
                *in_block_comment = false;
            }
            continue;
        }
        if let Some(q) = quote {
            out.push(c);
            if c == '\\' {
                if let Some(next) = chars.next() {
                    out.push(next);
                }
            } else if c == q {
                quote = None;
            }
            continue;
        }
        match c {
            '\'' | '"' | '`' => {
                quote = Some(c);
                out.push(c);
            }
            '/' if chars.peek() == Some(&'/') => break,
            '/' if chars.peek() == Some(&'*') => {
                chars.next();
                *in_block_comment = true;
            }
            _ => out.push(c),
        }
    }
    out
}
