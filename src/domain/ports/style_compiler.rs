//! StyleCompiler port - the external stylesheet compiler
//!
//! Consumed as a pure function `compile(source) -> css | error`.

use thiserror::Error;

/// Why the compiler did not produce output
#[derive(Error, Debug)]
pub enum CompileError {
    /// No compiler is configured or it could not be started
    #[error("stylesheet compiler unavailable: {0}")]
    Unavailable(String),

    /// The compiler ran and rejected the input
    #[error("stylesheet compiler rejected input: {0}")]
    Rejected(String),
}

/// Stylesheet compiler capability
pub trait StyleCompiler {
    /// Compile a stylesheet fragment into flat CSS
    fn compile(&self, source: &str) -> Result<String, CompileError>;
}

impl<F> StyleCompiler for F
where
    F: Fn(&str) -> Result<String, CompileError>,
{
    fn compile(&self, source: &str) -> Result<String, CompileError> {
        self(source)
    }
}
