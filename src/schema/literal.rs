//! Safe literal evaluation of settings descriptions
//!
//! A recursive-descent evaluator for the JavaScript subset settings files are
//! written in. Nothing is executed: the evaluator only understands literal
//! syntax, bindings to earlier literals, and zero-argument factories whose
//! body is a single returned expression. It has no access to the process,
//! the file system or `require`.
//!
//! Supported statements:
//! - `const|let|var NAME = <expr>;` (also prefixed with `export`)
//! - `module.exports = <expr>;`, `exports.NAME = <expr>;`, `export default <expr>;`
//! - string directives such as `"use strict";`
//!
//! Supported expressions: object and array literals (with spread), strings,
//! template strings without interpolation, numbers, `true`, `false`, `null`,
//! `undefined`, regex literals (kept as their source text), identifiers,
//! member access, `+` and zero-argument `() => …` / `function () { return …; }`.

use std::collections::HashMap;

use serde_json::{Map, Number, Value};

use super::SchemaError;

/// Evaluate a settings description and return its exported value.
///
/// When nothing is exported, the last object-valued binding is used, which
/// keeps descriptions that only declare `const schema = {…}` usable.
pub fn evaluate_exports(source: &str) -> Result<Value, SchemaError> {
    let mut eval = Evaluator::new(source);
    eval.program()?;
    eval.into_exported()
}

/// Evaluate a single standalone expression such as `['a', 'b']` or `"x"`.
pub fn evaluate_expression(source: &str) -> Result<Value, SchemaError> {
    let mut eval = Evaluator::new(source);
    let value = eval.expression()?;
    eval.skip_trivia()?;
    eval.eat(';');
    eval.skip_trivia()?;
    if !eval.at_end() {
        return Err(eval.error("unexpected trailing input"));
    }
    Ok(value.unwrap_or(Value::Null))
}

/// `None` is JavaScript `undefined`, which JSON serialization drops.
type Eval = Option<Value>;

/// Deepest expression nesting accepted, same bound serde_json uses
const MAX_DEPTH: usize = 128;

struct Evaluator<'a> {
    src: &'a str,
    pos: usize,
    bindings: HashMap<String, Value>,
    exported: Option<Value>,
    named_exports: Map<String, Value>,
    last_object_binding: Option<Value>,
    depth: usize,
}

impl<'a> Evaluator<'a> {
    fn new(src: &'a str) -> Self {
        Self {
            src,
            pos: 0,
            bindings: HashMap::new(),
            exported: None,
            named_exports: Map::new(),
            last_object_binding: None,
            depth: 0,
        }
    }

    fn into_exported(mut self) -> Result<Value, SchemaError> {
        if let Some(value) = self.exported.take() {
            return Ok(value);
        }
        if let Some(default) = self.named_exports.remove("default") {
            return Ok(default);
        }
        if !self.named_exports.is_empty() {
            return Ok(Value::Object(self.named_exports));
        }
        self.last_object_binding.ok_or(SchemaError::NoExport)
    }

    // ---- statements ----

    fn program(&mut self) -> Result<(), SchemaError> {
        loop {
            self.skip_trivia()?;
            if self.at_end() {
                return Ok(());
            }
            self.statement()?;
        }
    }

    fn statement(&mut self) -> Result<(), SchemaError> {
        if self.eat(';') {
            return Ok(());
        }
        if matches!(self.peek(), Some('"' | '\'')) {
            // directive prologue, e.g. "use strict"
            self.expression()?;
            self.end_statement();
            return Ok(());
        }

        let start = self.pos;
        let word = self.identifier().ok_or_else(|| self.error("expected a statement"))?;
        match word.as_str() {
            "const" | "let" | "var" => {
                let (name, value) = self.binding()?;
                self.bind(name, value);
            }
            "export" => {
                self.skip_trivia()?;
                let next = self.identifier().ok_or_else(|| self.error("expected declaration after 'export'"))?;
                match next.as_str() {
                    "default" => {
                        self.exported = Some(self.required_expression()?);
                    }
                    "const" | "let" | "var" => {
                        let (name, value) = self.binding()?;
                        self.named_exports.insert(name.clone(), value.clone());
                        self.bind(name, value);
                    }
                    other => return Err(self.error(format!("unsupported export form 'export {other}'"))),
                }
            }
            "module" => {
                self.expect('.')?;
                let member = self.identifier().ok_or_else(|| self.error("expected 'exports'"))?;
                if member != "exports" {
                    return Err(self.error(format!("unsupported member 'module.{member}'")));
                }
                self.skip_trivia()?;
                if self.eat('.') {
                    let name = self.identifier().ok_or_else(|| self.error("expected export name"))?;
                    self.expect('=')?;
                    let value = self.required_expression()?;
                    self.named_exports.insert(name, value);
                } else {
                    self.expect('=')?;
                    self.exported = Some(self.required_expression()?);
                }
            }
            "exports" => {
                self.expect('.')?;
                let name = self.identifier().ok_or_else(|| self.error("expected export name"))?;
                self.expect('=')?;
                let value = self.required_expression()?;
                self.named_exports.insert(name, value);
            }
            _ => {
                self.pos = start;
                return Err(self.error(format!("unsupported statement starting with '{word}'")));
            }
        }
        self.end_statement();
        Ok(())
    }

    fn binding(&mut self) -> Result<(String, Value), SchemaError> {
        self.skip_trivia()?;
        let name = self.identifier().ok_or_else(|| self.error("expected binding name"))?;
        self.expect('=')?;
        let value = self.expression()?.unwrap_or(Value::Null);
        Ok((name, value))
    }

    fn bind(&mut self, name: String, value: Value) {
        if value.is_object() {
            self.last_object_binding = Some(value.clone());
        }
        self.bindings.insert(name, value);
    }

    fn end_statement(&mut self) {
        // ASI: a missing semicolon is fine
        let _ = self.skip_trivia();
        self.eat(';');
    }

    // ---- expressions ----

    fn required_expression(&mut self) -> Result<Value, SchemaError> {
        self.expression()?
            .ok_or_else(|| self.error("expression evaluates to undefined"))
    }

    /// Every nested literal, group, index or factory body re-enters here;
    /// nesting is bounded by [`MAX_DEPTH`].
    fn expression(&mut self) -> Result<Eval, SchemaError> {
        if self.depth >= MAX_DEPTH {
            return Err(self.error("nesting too deep"));
        }
        self.depth += 1;
        let value = self.sum();
        self.depth -= 1;
        value
    }

    fn sum(&mut self) -> Result<Eval, SchemaError> {
        let mut value = self.postfix()?;
        loop {
            self.skip_trivia()?;
            if !self.eat('+') {
                return Ok(value);
            }
            let rhs = self.postfix()?;
            value = Some(add(value, rhs).ok_or_else(|| self.error("unsupported operands for '+'"))?);
        }
    }

    fn postfix(&mut self) -> Result<Eval, SchemaError> {
        let mut value = self.primary()?;
        loop {
            self.skip_trivia()?;
            if self.peek() == Some('.') && !self.rest().starts_with("...") {
                self.bump();
                self.skip_trivia()?;
                let key = self.identifier().ok_or_else(|| self.error("expected property name"))?;
                value = value.and_then(|v| v.get(&key).cloned());
            } else if self.peek() == Some('[') {
                self.bump();
                let key = self.required_expression()?;
                self.expect(']')?;
                value = value.and_then(|v| match key {
                    Value::String(s) => v.get(&s).cloned(),
                    Value::Number(n) => n.as_u64().and_then(|i| v.get(i as usize).cloned()),
                    _ => None,
                });
            } else {
                return Ok(value);
            }
        }
    }

    fn primary(&mut self) -> Result<Eval, SchemaError> {
        self.skip_trivia()?;
        match self.peek() {
            None => Err(self.error("unexpected end of input")),
            Some('{') => self.object().map(Some),
            Some('[') => self.array().map(Some),
            Some('\'' | '"') => self.string().map(|s| Some(Value::String(s))),
            Some('`') => self.template().map(|s| Some(Value::String(s))),
            Some('/') => self.regex().map(|s| Some(Value::String(s))),
            Some('(') => self.parenthesized(),
            Some(c) if c.is_ascii_digit() || c == '-' || c == '.' => self.number().map(Some),
            Some(c) if is_ident_start(c) => self.word_expression(),
            Some(c) => Err(self.error(format!("unexpected character '{c}'"))),
        }
    }

    fn word_expression(&mut self) -> Result<Eval, SchemaError> {
        let word = self.identifier().ok_or_else(|| self.error("expected identifier"))?;
        match word.as_str() {
            "true" => Ok(Some(Value::Bool(true))),
            "false" => Ok(Some(Value::Bool(false))),
            "null" => Ok(Some(Value::Null)),
            "undefined" => Ok(None),
            "function" => self.function(),
            _ => {
                self.skip_trivia()?;
                if self.rest().starts_with("=>") {
                    return Err(self.error("factories with parameters are not supported"));
                }
                self.bindings
                    .get(&word)
                    .cloned()
                    .map(Some)
                    .ok_or(SchemaError::UnknownIdentifier(word))
            }
        }
    }

    /// `function [name]() { return <expr>; }` - evaluated as if called
    fn function(&mut self) -> Result<Eval, SchemaError> {
        self.skip_trivia()?;
        let _ = self.identifier();
        self.expect('(')?;
        self.expect(')')?;
        self.return_block()
    }

    /// `( <expr> )` or the zero-argument arrow `() => <body>`
    fn parenthesized(&mut self) -> Result<Eval, SchemaError> {
        self.expect('(')?;
        self.skip_trivia()?;
        if self.eat(')') {
            self.skip_trivia()?;
            if !self.rest().starts_with("=>") {
                return Err(self.error("expected '=>' after '()'"));
            }
            self.pos += 2;
            self.skip_trivia()?;
            if self.peek() == Some('{') {
                return self.return_block();
            }
            return self.expression();
        }
        let value = self.expression()?;
        self.expect(')')?;
        Ok(value)
    }

    fn return_block(&mut self) -> Result<Eval, SchemaError> {
        self.expect('{')?;
        self.skip_trivia()?;
        let keyword = self.identifier();
        if keyword.as_deref() != Some("return") {
            return Err(self.error("factory body must be a single return statement"));
        }
        let value = self.expression()?;
        self.end_statement();
        self.expect('}')?;
        Ok(value)
    }

    fn object(&mut self) -> Result<Value, SchemaError> {
        self.expect('{')?;
        let mut map = Map::new();
        loop {
            self.skip_trivia()?;
            if self.eat('}') {
                return Ok(Value::Object(map));
            }
            if self.rest().starts_with("...") {
                self.pos += 3;
                match self.expression()? {
                    Some(Value::Object(spread)) => map.extend(spread),
                    Some(Value::Null) | None => {}
                    Some(_) => return Err(self.error("can only spread objects into an object")),
                }
            } else {
                let key = self.property_key()?;
                self.skip_trivia()?;
                if self.eat(':') {
                    if let Some(value) = self.expression()? {
                        map.insert(key, value);
                    }
                } else {
                    // shorthand `{ title }`
                    let value = self
                        .bindings
                        .get(&key)
                        .cloned()
                        .ok_or_else(|| SchemaError::UnknownIdentifier(key.clone()))?;
                    map.insert(key, value);
                }
            }
            self.skip_trivia()?;
            if !self.eat(',') {
                self.expect('}')?;
                return Ok(Value::Object(map));
            }
        }
    }

    fn property_key(&mut self) -> Result<String, SchemaError> {
        match self.peek() {
            Some('\'' | '"') => self.string(),
            Some(c) if c.is_ascii_digit() => Ok(match self.number()? {
                Value::Number(n) => n.to_string(),
                other => other.to_string(),
            }),
            Some('[') => Err(self.error("computed property keys are not supported")),
            _ => self.identifier().ok_or_else(|| self.error("expected property key")),
        }
    }

    fn array(&mut self) -> Result<Value, SchemaError> {
        self.expect('[')?;
        let mut items = Vec::new();
        loop {
            self.skip_trivia()?;
            if self.eat(']') {
                return Ok(Value::Array(items));
            }
            if self.rest().starts_with("...") {
                self.pos += 3;
                match self.expression()? {
                    Some(Value::Array(spread)) => items.extend(spread),
                    _ => return Err(self.error("can only spread arrays into an array")),
                }
            } else {
                items.push(self.expression()?.unwrap_or(Value::Null));
            }
            self.skip_trivia()?;
            if !self.eat(',') {
                self.expect(']')?;
                return Ok(Value::Array(items));
            }
        }
    }

    fn string(&mut self) -> Result<String, SchemaError> {
        let quote = self.bump().ok_or_else(|| self.error("expected string"))?;
        let mut out = String::new();
        loop {
            match self.bump() {
                None | Some('\n') => return Err(self.error("unterminated string literal")),
                Some(c) if c == quote => return Ok(out),
                Some('\\') => out.push(self.escape()?),
                Some(c) => out.push(c),
            }
        }
    }

    fn template(&mut self) -> Result<String, SchemaError> {
        self.expect('`')?;
        let mut out = String::new();
        loop {
            match self.bump() {
                None => return Err(self.error("unterminated template literal")),
                Some('`') => return Ok(out),
                Some('$') if self.peek() == Some('{') => {
                    return Err(self.error("template interpolation is not supported"))
                }
                Some('\\') => out.push(self.escape()?),
                Some(c) => out.push(c),
            }
        }
    }

    fn escape(&mut self) -> Result<char, SchemaError> {
        let c = self.bump().ok_or_else(|| self.error("unterminated escape"))?;
        Ok(match c {
            'n' => '\n',
            't' => '\t',
            'r' => '\r',
            'b' => '\u{8}',
            'f' => '\u{c}',
            'v' => '\u{b}',
            '0' => '\0',
            'u' => {
                let hex: String = self.rest().chars().take(4).collect();
                let code = u32::from_str_radix(&hex, 16)
                    .map_err(|_| self.error("invalid unicode escape"))?;
                self.pos += hex.len();
                char::from_u32(code).unwrap_or('\u{fffd}')
            }
            other => other,
        })
    }

    fn regex(&mut self) -> Result<String, SchemaError> {
        let start = self.pos;
        self.expect('/')?;
        let mut in_class = false;
        loop {
            match self.bump() {
                None | Some('\n') => return Err(self.error("unterminated regex literal")),
                Some('\\') => {
                    self.bump();
                }
                Some('[') => in_class = true,
                Some(']') => in_class = false,
                Some('/') if !in_class => break,
                Some(_) => {}
            }
        }
        while matches!(self.peek(), Some(c) if c.is_ascii_alphabetic()) {
            self.bump();
        }
        Ok(self.src[start..self.pos].to_string())
    }

    fn number(&mut self) -> Result<Value, SchemaError> {
        let start = self.pos;
        let negative = self.eat('-');
        self.skip_trivia()?;
        let digits_start = self.pos;
        if self.rest().starts_with("0x") || self.rest().starts_with("0X") {
            self.pos += 2;
            let hex_start = self.pos;
            while matches!(self.peek(), Some(c) if c.is_ascii_hexdigit()) {
                self.bump();
            }
            let value = i64::from_str_radix(&self.src[hex_start..self.pos], 16)
                .map_err(|_| self.error("invalid hex literal"))?;
            return Ok(Value::Number(Number::from(if negative { -value } else { value })));
        }
        while matches!(self.peek(), Some(c) if c.is_ascii_digit() || c == '.' || c == '_') {
            self.bump();
        }
        if matches!(self.peek(), Some('e' | 'E')) {
            self.bump();
            if matches!(self.peek(), Some('+' | '-')) {
                self.bump();
            }
            while matches!(self.peek(), Some(c) if c.is_ascii_digit()) {
                self.bump();
            }
        }
        let text: String = self.src[digits_start..self.pos].chars().filter(|c| *c != '_').collect();
        if text.is_empty() {
            self.pos = start;
            return Err(self.error("expected number"));
        }
        if let Ok(int) = text.parse::<i64>() {
            return Ok(Value::Number(Number::from(if negative { -int } else { int })));
        }
        let float: f64 = text.parse().map_err(|_| self.error(format!("invalid number '{text}'")))?;
        Number::from_f64(if negative { -float } else { float })
            .map(Value::Number)
            .ok_or_else(|| self.error("number is not finite"))
    }

    // ---- lexing helpers ----

    fn rest(&self) -> &'a str {
        &self.src[self.pos..]
    }

    fn at_end(&self) -> bool {
        self.pos >= self.src.len()
    }

    fn peek(&self) -> Option<char> {
        self.rest().chars().next()
    }

    fn bump(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.pos += c.len_utf8();
        Some(c)
    }

    fn eat(&mut self, expected: char) -> bool {
        if self.peek() == Some(expected) {
            self.pos += expected.len_utf8();
            true
        } else {
            false
        }
    }

    fn expect(&mut self, expected: char) -> Result<(), SchemaError> {
        self.skip_trivia()?;
        if self.eat(expected) {
            Ok(())
        } else {
            let found = self.peek().map(|c| format!("'{c}'")).unwrap_or_else(|| "end of input".to_string());
            Err(self.error(format!("expected '{expected}', found {found}")))
        }
    }

    fn identifier(&mut self) -> Option<String> {
        let start = self.pos;
        match self.peek() {
            Some(c) if is_ident_start(c) => {
                self.bump();
            }
            _ => return None,
        }
        while matches!(self.peek(), Some(c) if is_ident_continue(c)) {
            self.bump();
        }
        Some(self.src[start..self.pos].to_string())
    }

    fn skip_trivia(&mut self) -> Result<(), SchemaError> {
        loop {
            while matches!(self.peek(), Some(c) if c.is_whitespace()) {
                self.bump();
            }
            let rest = self.rest();
            if rest.starts_with("//") {
                self.pos += rest.find('\n').unwrap_or(rest.len());
            } else if rest.starts_with("/*") {
                let end = rest[2..]
                    .find("*/")
                    .ok_or_else(|| self.error("unterminated block comment"))?;
                self.pos += end + 4;
            } else {
                return Ok(());
            }
        }
    }

    fn error(&self, message: impl Into<String>) -> SchemaError {
        let consumed = &self.src[..self.pos.min(self.src.len())];
        SchemaError::Syntax {
            line: consumed.matches('\n').count() + 1,
            message: message.into(),
        }
    }
}

fn is_ident_start(c: char) -> bool {
    c.is_alphabetic() || c == '_' || c == '$'
}

fn is_ident_continue(c: char) -> bool {
    c.is_alphanumeric() || c == '_' || c == '$'
}

fn add(lhs: Eval, rhs: Eval) -> Option<Value> {
    match (lhs?, rhs?) {
        (Value::String(a), b) => Some(Value::String(a + &display(&b))),
        (a, Value::String(b)) => Some(Value::String(display(&a) + &b)),
        (Value::Number(a), Value::Number(b)) => match (a.as_i64(), b.as_i64()) {
            (Some(x), Some(y)) => x.checked_add(y).map(|s| Value::Number(s.into())),
            _ => Number::from_f64(a.as_f64()? + b.as_f64()?).map(Value::Number),
        },
        _ => None,
    }
}

fn display(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn module_exports_object_literal() {
        let value = evaluate_exports(
            r#"module.exports = { description: "Hero banner", properties: { title: { type: "string", description: "Title", default: "Hi" } } };"#,
        )
        .unwrap();
        assert_eq!(
            value,
            json!({
                "description": "Hero banner",
                "properties": { "title": { "type": "string", "description": "Title", "default": "Hi" } }
            })
        );
    }

    #[test]
    fn exports_via_binding_with_comments_and_trailing_commas() {
        let source = r#"
/**
 * Card Component Schema
 */
const cardSchema = {
  name: 'card', // display name
  description: 'A reusable card component',
  properties: {
    param1: {
      type: 'string',
      required: false,
      default: 'default_value',
    },
  },
};

module.exports = cardSchema;
"#;
        let value = evaluate_exports(source).unwrap();
        assert_eq!(value["name"], json!("card"));
        assert_eq!(value["properties"]["param1"]["default"], json!("default_value"));
    }

    #[test]
    fn deep_nesting_is_a_syntax_error() {
        let too_deep = |result: Result<Value, SchemaError>| {
            matches!(result, Err(SchemaError::Syntax { message, .. }) if message == "nesting too deep")
        };
        let depth = 10_000;

        let arrays = format!(
            "module.exports = {{ a: {}1{} }};",
            "[".repeat(depth),
            "]".repeat(depth)
        );
        assert!(too_deep(evaluate_exports(&arrays)));

        let indexes = format!("const a = {{}}; module.exports = a{};", "[a".repeat(depth));
        assert!(too_deep(evaluate_exports(&indexes)));

        let groups = format!("{}1{}", "(".repeat(depth), ")".repeat(depth));
        assert!(too_deep(evaluate_expression(&groups)));
    }

    #[test]
    fn moderate_nesting_is_accepted() {
        let source = format!(
            "module.exports = {{ a: {}1{} }};",
            "[".repeat(100),
            "]".repeat(100)
        );
        assert!(evaluate_exports(&source).is_ok());
    }

    #[test]
    fn keeps_property_order() {
        let value = evaluate_exports("module.exports = { zeta: 1, alpha: 2, mid: 3 }").unwrap();
        let keys: Vec<_> = value.as_object().unwrap().keys().cloned().collect();
        assert_eq!(keys, vec!["zeta", "alpha", "mid"]);
    }

    #[test]
    fn regex_and_template_literals() {
        let value = evaluate_exports(
            r"module.exports = { pattern: /^[#\/]|https?:\/\//, code: `{% render 'card' %}` };",
        )
        .unwrap();
        assert_eq!(value["pattern"], json!(r"/^[#\/]|https?:\/\//"));
        assert_eq!(value["code"], json!("{% render 'card' %}"));
    }

    #[test]
    fn template_interpolation_is_rejected() {
        let err = evaluate_exports("module.exports = { a: `x ${y}` }").unwrap_err();
        assert!(matches!(err, SchemaError::Syntax { .. }));
    }

    #[test]
    fn factories_are_called() {
        let arrow = evaluate_exports("module.exports = () => ({ name: 'a' });").unwrap();
        assert_eq!(arrow, json!({ "name": "a" }));

        let block = evaluate_exports("module.exports = () => { return { name: 'b' }; };").unwrap();
        assert_eq!(block, json!({ "name": "b" }));

        let function = evaluate_exports("module.exports = function schema() { return { name: 'c' } }").unwrap();
        assert_eq!(function, json!({ "name": "c" }));
    }

    #[test]
    fn esm_default_export_and_spread() {
        let source = r#"
const shared = { type: 'string' };
export default { properties: { title: { ...shared, default: 'Hi' } } };
"#;
        let value = evaluate_exports(source).unwrap();
        assert_eq!(
            value["properties"]["title"],
            json!({ "type": "string", "default": "Hi" })
        );
    }

    #[test]
    fn undefined_properties_are_dropped() {
        let value = evaluate_exports("module.exports = { a: undefined, b: 1 }").unwrap();
        assert_eq!(value, json!({ "b": 1 }));
    }

    #[test]
    fn missing_export_uses_last_object_binding() {
        let value = evaluate_exports("const buttonSchema = { description: 'Button' };").unwrap();
        assert_eq!(value, json!({ "description": "Button" }));
    }

    #[test]
    fn nothing_exported() {
        assert_eq!(evaluate_exports("// empty").unwrap_err(), SchemaError::NoExport);
    }

    #[test]
    fn require_is_not_available() {
        let err = evaluate_exports("const fs = require('fs'); module.exports = {};").unwrap_err();
        assert_eq!(err, SchemaError::UnknownIdentifier("require".to_string()));
    }

    #[test]
    fn unsupported_statement_reports_line() {
        let err = evaluate_exports("const a = 1;\nif (a) {}\n").unwrap_err();
        match err {
            SchemaError::Syntax { line, .. } => assert_eq!(line, 2),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn numbers_and_concatenation() {
        let value = evaluate_exports("module.exports = { a: -3, b: 1.5, c: 0x10, d: 'x' + 1, e: 1 + 2 }").unwrap();
        assert_eq!(value, json!({ "a": -3, "b": 1.5, "c": 16, "d": "x1", "e": 3 }));
    }

    #[test]
    fn member_access_on_bindings() {
        let source = "const defaults = { title: 'Hi' };\nmodule.exports = { d: defaults.title, e: defaults['title'] };";
        assert_eq!(evaluate_exports(source).unwrap(), json!({ "d": "Hi", "e": "Hi" }));
    }

    #[test]
    fn standalone_expressions() {
        assert_eq!(evaluate_expression("['left', 'right']").unwrap(), json!(["left", "right"]));
        assert_eq!(evaluate_expression("'Hero Title'").unwrap(), json!("Hero Title"));
        assert!(evaluate_expression("false,").is_err());
        assert_eq!(evaluate_expression("false").unwrap(), json!(false));
    }
}
