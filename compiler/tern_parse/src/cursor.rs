//! Token cursor for navigating the token stream.

use tern_ir::{Token, TokenKind};

/// Position in a `TokenList`.
///
/// Invariant: the list ends with `Eof` and the cursor never moves past it,
/// so `current()` is always valid.
pub struct Cursor<'a> {
    tokens: &'a [Token],
    pos: usize,
}

impl<'a> Cursor<'a> {
    pub fn new(tokens: &'a [Token]) -> Self {
        Cursor { tokens, pos: 0 }
    }

    const EOF: Token = Token {
        kind: TokenKind::Eof,
        span: tern_ir::Span::DUMMY,
        line: 1,
    };

    #[inline]
    pub fn current(&self) -> Token {
        self.tokens
            .get(self.pos)
            .or_else(|| self.tokens.last())
            .copied()
            .unwrap_or(Self::EOF)
    }

    #[inline]
    pub fn current_kind(&self) -> TokenKind {
        self.current().kind
    }

    /// The most recently consumed token, or the current one at the start.
    #[inline]
    pub fn previous(&self) -> Token {
        match self.pos.checked_sub(1) {
            Some(prev) => self.tokens.get(prev).copied().unwrap_or(Self::EOF),
            None => self.current(),
        }
    }

    #[inline]
    pub fn is_at_end(&self) -> bool {
        matches!(self.current_kind(), TokenKind::Eof)
    }

    /// Check the current token's kind, ignoring payloads.
    #[inline]
    pub fn check(&self, kind: &TokenKind) -> bool {
        self.current_kind().same_kind(kind)
    }

    #[inline]
    pub fn check_ident(&self) -> bool {
        matches!(self.current_kind(), TokenKind::Ident(_))
    }

    /// Consume and return the current token. Stays put on `Eof`.
    #[inline]
    pub fn advance(&mut self) -> Token {
        let token = self.current();
        if !self.is_at_end() {
            self.pos += 1;
        }
        token
    }

    /// Consume the current token if it has the given kind.
    #[inline]
    pub fn eat(&mut self, kind: &TokenKind) -> bool {
        if self.check(kind) {
            self.advance();
            true
        } else {
            false
        }
    }

    pub fn position(&self) -> usize {
        self.pos
    }
}

#[cfg(test)]
mod tests;
