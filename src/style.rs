//! Stylesheet transform
//!
//! The primary path hands the fragment to the external compiler and returns
//! its output verbatim. Any compiler failure is logged and downgraded to a
//! structural fallback that approximates single-level nesting:
//!
//! - `&:hover {` (also `active`, `focus`, `disabled`) closes the current block
//!   and opens `.<component>:<pseudo> {`
//! - every remaining `&` becomes `.<component>`
//! - block comments and whole-line `//` comments are stripped
//!
//! The fallback is text substitution only. Deeper nesting, mixins, variables
//! and other preprocessor features pass through unchanged and are not
//! guaranteed to produce valid CSS; that is a known approximation.

use std::sync::LazyLock;

use regex::{Captures, NoExpand, Regex};
use tracing::{debug, warn};

use crate::domain::ports::style_compiler::StyleCompiler;
use crate::models::StyleSource;

static PARENT_PSEUDO: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"&:(hover|active|focus|disabled)\s*\{").expect("valid pseudo-class pattern")
});
static PARENT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new("&").expect("valid parent selector pattern"));
static BLOCK_COMMENT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)/\*.*?\*/").expect("valid block comment pattern"));
static LINE_COMMENT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)^[ \t]*//.*$").expect("valid line comment pattern"));

/// CSS produced for one component
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransformedStyle {
    pub css: String,
    pub source: StyleSource,
}

/// Compiles stylesheet fragments, degrading to the structural fallback
pub struct StyleTransformer {
    compiler: Box<dyn StyleCompiler>,
}

impl StyleTransformer {
    pub fn new(compiler: impl StyleCompiler + 'static) -> Self {
        Self {
            compiler: Box::new(compiler),
        }
    }

    /// Transform `style_text` for the component `component_name`. Never fails.
    pub fn transform(&self, style_text: &str, component_name: &str) -> TransformedStyle {
        match self.compiler.compile(style_text) {
            Ok(css) => {
                debug!(component = component_name, "stylesheet compiled");
                TransformedStyle {
                    css,
                    source: StyleSource::Compiled,
                }
            }
            Err(e) => {
                warn!(
                    component = component_name,
                    error = %e,
                    "could not compile stylesheet, using fallback"
                );
                TransformedStyle {
                    css: fallback_transform(style_text, component_name),
                    source: StyleSource::Fallback,
                }
            }
        }
    }
}

/// Structural rewrite used when the compiler is unavailable or rejects input
pub fn fallback_transform(style_text: &str, component_name: &str) -> String {
    let base_class = format!(".{component_name}");

    let css = PARENT_PSEUDO.replace_all(style_text, |caps: &Captures<'_>| {
        format!("}}\n\n{base_class}:{} {{", &caps[1])
    });
    let css = PARENT.replace_all(&css, NoExpand(&base_class));
    let css = BLOCK_COMMENT.replace_all(&css, "");
    let css = LINE_COMMENT.replace_all(&css, "");

    css.into_owned()
}
