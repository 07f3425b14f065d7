//! Panic-mode error recovery.

use tern_ir::TokenKind;

use crate::Parser;

impl Parser<'_> {
    /// Skip tokens until a likely statement boundary: just past a `;`, or
    /// before a keyword that starts a declaration or statement.
    pub(crate) fn synchronize(&mut self) {
        self.advance();
        while !self.cursor.is_at_end() {
            if matches!(self.cursor.previous().kind, TokenKind::Semicolon) {
                return;
            }
            if starts_statement(self.current().kind) {
                return;
            }
            self.advance();
        }
    }
}

fn starts_statement(kind: TokenKind) -> bool {
    matches!(
        kind,
        TokenKind::Class
            | TokenKind::Fn
            | TokenKind::Var
            | TokenKind::For
            | TokenKind::If
            | TokenKind::While
            | TokenKind::Return
    )
}
