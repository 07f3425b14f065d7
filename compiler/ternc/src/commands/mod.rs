//! Command handlers for the `tern` CLI.
//!
//! Each submodule implements one command. Shared pieces (exit statuses,
//! reading a script, front-end error reporting) live here.

use std::io::Write;

use tern_ir::{Stmt, StringInterner};

mod ast_dump;
mod debug;
mod run;

pub use ast_dump::dump_program;
pub use debug::{lex_file, parse_file};
pub use run::{repl, run_file, run_source};

/// Process exit status of a command.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ExitStatus {
    Success,
    /// Bad command line.
    Usage,
    /// The script did not parse.
    CompileError,
    /// The script raised an error while running.
    RuntimeError,
    /// The script could not be read.
    IoError,
}

impl ExitStatus {
    pub fn code(self) -> i32 {
        match self {
            ExitStatus::Success => 0,
            ExitStatus::Usage => 64,
            ExitStatus::CompileError => 65,
            ExitStatus::RuntimeError => 70,
            ExitStatus::IoError => 74,
        }
    }
}

/// Settings for running a script.
#[derive(Clone, Copy, Debug)]
pub struct RunOptions {
    pub max_call_depth: usize,
}

impl Default for RunOptions {
    fn default() -> Self {
        RunOptions {
            max_call_depth: tern_eval::DEFAULT_MAX_DEPTH,
        }
    }
}

/// Read a script, describing failures the way users expect.
pub(crate) fn read_file(path: &str) -> Result<String, String> {
    std::fs::read_to_string(path).map_err(|e| match e.kind() {
        std::io::ErrorKind::NotFound => format!("cannot find file '{path}'"),
        std::io::ErrorKind::PermissionDenied => format!("permission denied reading '{path}'"),
        std::io::ErrorKind::InvalidData => format!("'{path}' contains invalid UTF-8 data"),
        _ => format!("error reading '{path}': {e}"),
    })
}

/// Lex and parse `source`, printing every front-end error to `errors`.
///
/// Returns `None` if there was at least one error.
pub(crate) fn front_end(
    source: &str,
    interner: &StringInterner,
    errors: &mut impl Write,
) -> Option<Vec<Stmt>> {
    let tokens = tern_lexer::lex(source, interner);
    let output = tern_parse::parse(&tokens, source, interner);
    if output.has_errors() {
        for error in &output.errors {
            let _ = writeln!(errors, "{error}");
        }
        return None;
    }
    Some(output.stmts)
}
