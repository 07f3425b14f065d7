//! Parse error types.
//!
//! Every error the parser finds is collected; none of them stop parsing.
//! Rendering follows `[line N] Error at 'lexeme': message`.

use std::fmt;

use tern_ir::Span;

/// Where on the line an error points.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ErrorLocation {
    /// At the token with this source text.
    Lexeme(String),
    /// At end of input.
    End,
    /// Lexer errors carry no lexeme.
    Unplaced,
}

impl fmt::Display for ErrorLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ErrorLocation::Lexeme(text) => write!(f, " at '{text}'"),
            ErrorLocation::End => f.write_str(" at end"),
            ErrorLocation::Unplaced => Ok(()),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("[line {line}] Error{location}: {message}")]
pub struct ParseError {
    pub line: u32,
    pub location: ErrorLocation,
    pub message: String,
    pub span: Span,
}

impl ParseError {
    pub fn new(line: u32, location: ErrorLocation, message: impl Into<String>, span: Span) -> Self {
        ParseError {
            line,
            location,
            message: message.into(),
            span,
        }
    }
}
