//! Recursive descent parser for Tern.
//!
//! Produces a `Vec<Stmt>` plus every error found. Besides syntax, the
//! parser enforces the scoping rules that can be decided statically:
//! `return` at top level, `self`/`super` outside a class, `super` without a
//! superclass, self-inheritance and a missing `self` method parameter.

mod cursor;
mod error;
mod grammar;
mod recovery;

pub use cursor::Cursor;
pub use error::{ErrorLocation, ParseError};

use tern_ir::{Name, Span, Stmt, StringInterner, Token, TokenKind, TokenList};

type PResult<T> = Result<T, ParseError>;

/// Result of parsing a whole source file.
#[derive(Debug, Default)]
pub struct ParseOutput {
    pub stmts: Vec<Stmt>,
    pub errors: Vec<ParseError>,
}

impl ParseOutput {
    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }
}

/// Parse a token list produced by `tern_lexer::lex` over `source`.
///
/// Lexer error tokens are reported first and then dropped from the stream,
/// so the grammar only ever sees real tokens.
#[tracing::instrument(level = "debug", skip_all)]
pub fn parse(tokens: &TokenList, source: &str, interner: &StringInterner) -> ParseOutput {
    let mut lex_errors = Vec::new();
    let mut clean = Vec::with_capacity(tokens.len());
    for token in tokens {
        match token.kind {
            TokenKind::Error(kind) => lex_errors.push(ParseError::new(
                token.line,
                ErrorLocation::Unplaced,
                kind.message(),
                token.span,
            )),
            _ => clean.push(*token),
        }
    }

    let mut parser = Parser::new(&clean, source, interner);
    parser.errors = lex_errors;
    let stmts = parser.parse_program();
    tracing::debug!(
        stmts = stmts.len(),
        errors = parser.errors.len(),
        "parsed program"
    );
    ParseOutput {
        stmts,
        errors: parser.errors,
    }
}

/// Lexical context the static checks depend on.
#[derive(Clone, Copy, Debug)]
struct ClassContext {
    has_superclass: bool,
}

/// Parser state.
pub struct Parser<'a> {
    cursor: Cursor<'a>,
    source: &'a str,
    interner: &'a StringInterner,
    errors: Vec<ParseError>,
    /// Number of enclosing function, method or lambda bodies.
    function_depth: usize,
    classes: Vec<ClassContext>,
}

impl<'a> Parser<'a> {
    pub fn new(tokens: &'a [Token], source: &'a str, interner: &'a StringInterner) -> Self {
        Parser {
            cursor: Cursor::new(tokens),
            source,
            interner,
            errors: Vec::new(),
            function_depth: 0,
            classes: Vec::new(),
        }
    }

    /// Parse declarations until end of input, recovering after each error.
    pub fn parse_program(&mut self) -> Vec<Stmt> {
        let mut stmts = Vec::new();
        while !self.cursor.is_at_end() {
            if let Some(stmt) = self.declaration() {
                stmts.push(stmt);
            }
        }
        stmts
    }

    pub fn errors(&self) -> &[ParseError] {
        &self.errors
    }

    #[inline]
    fn current(&self) -> Token {
        self.cursor.current()
    }

    #[inline]
    fn check(&self, kind: &TokenKind) -> bool {
        self.cursor.check(kind)
    }

    #[inline]
    fn advance(&mut self) -> Token {
        self.cursor.advance()
    }

    #[inline]
    fn eat(&mut self, kind: &TokenKind) -> bool {
        self.cursor.eat(kind)
    }

    /// Span from `start` to the end of the last consumed token.
    fn span_from(&self, start: Span) -> Span {
        start.merge(self.cursor.previous().span)
    }

    fn error_at(&self, token: Token, message: impl Into<String>) -> ParseError {
        let location = match token.kind {
            TokenKind::Eof => ErrorLocation::End,
            _ => ErrorLocation::Lexeme(token.span.slice(self.source).to_owned()),
        };
        ParseError::new(token.line, location, message, token.span)
    }

    fn error_at_current(&self, message: impl Into<String>) -> ParseError {
        self.error_at(self.current(), message)
    }

    /// Record an error without abandoning the current production.
    fn report(&mut self, token: Token, message: impl Into<String>) {
        let err = self.error_at(token, message);
        self.errors.push(err);
    }

    fn expect(&mut self, kind: &TokenKind, message: &str) -> PResult<Token> {
        if self.check(kind) {
            Ok(self.advance())
        } else {
            Err(self.error_at_current(message))
        }
    }

    fn expect_ident(&mut self, message: &str) -> PResult<(Name, Token)> {
        match self.current().kind {
            TokenKind::Ident(name) => Ok((name, self.advance())),
            _ => Err(self.error_at_current(message)),
        }
    }
}
