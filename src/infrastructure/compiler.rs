//! External stylesheet compiler
//!
//! The primary style path shells out to a Sass-compatible command that reads
//! the fragment on stdin and writes CSS to stdout (`sass --stdin` by
//! default). A missing binary, a non-zero exit or non-UTF-8 output are all
//! compile failures; the caller downgrades them to the structural fallback.

use std::io::{self, Write};
use std::process::{Child, Command, ExitStatus, Stdio};

use crate::domain::ports::style_compiler::{CompileError, StyleCompiler};

/// Compiler that is never available; every stylesheet takes the fallback path
#[derive(Debug, Clone, Copy, Default)]
pub struct NoCompiler;

impl StyleCompiler for NoCompiler {
    fn compile(&self, _source: &str) -> Result<String, CompileError> {
        Err(CompileError::Unavailable(
            "no stylesheet compiler configured".to_string(),
        ))
    }
}

/// Compiler invoked as `program args...` with the source on stdin
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandCompiler {
    program: String,
    args: Vec<String>,
}

impl CommandCompiler {
    pub fn new(program: impl Into<String>, args: Vec<String>) -> Self {
        Self {
            program: program.into(),
            args,
        }
    }

    /// Build from a `[program, args...]` command line; `None` when empty
    pub fn from_command_line(command: &[String]) -> Option<Self> {
        let (program, args) = command.split_first()?;
        Some(Self::new(program.clone(), args.to_vec()))
    }

    pub fn program(&self) -> &str {
        &self.program
    }
}

impl StyleCompiler for CommandCompiler {
    fn compile(&self, source: &str) -> Result<String, CompileError> {
        let mut child = Command::new(&self.program)
            .args(&self.args)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|e| CompileError::Unavailable(format!("{}: {}", self.program, e)))?;

        if let Some(mut stdin) = child.stdin.take() {
            if let Err(e) = feed(&mut stdin, source) {
                drop(stdin);
                let _ = reap(&mut child);
                return Err(CompileError::Unavailable(format!("{}: {}", self.program, e)));
            }
        }

        let output = child
            .wait_with_output()
            .map_err(|e| CompileError::Unavailable(format!("{}: {}", self.program, e)))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            let first_line = stderr.lines().next().unwrap_or("").trim();
            return Err(CompileError::Rejected(if first_line.is_empty() {
                format!("{} exited with {}", self.program, output.status)
            } else {
                first_line.to_string()
            }));
        }

        String::from_utf8(output.stdout)
            .map_err(|_| CompileError::Rejected("compiler produced non-UTF-8 output".to_string()))
    }
}

/// Write the fragment to the compiler's stdin.
///
/// A compiler that exits early closes the pipe; its exit status tells the
/// story, so `BrokenPipe` is not an error here.
fn feed(stdin: &mut impl Write, source: &str) -> io::Result<()> {
    match stdin.write_all(source.as_bytes()) {
        Err(e) if e.kind() == io::ErrorKind::BrokenPipe => Ok(()),
        other => other,
    }
}

/// Stop an abandoned compiler and collect its exit status
fn reap(child: &mut Child) -> io::Result<ExitStatus> {
    // already exited is fine
    let _ = child.kill();
    child.wait()
}
