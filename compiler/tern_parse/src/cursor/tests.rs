use super::*;
use tern_ir::{Span, StringInterner, TokenList};

fn tokens(source: &str) -> TokenList {
    tern_lexer::lex(source, &StringInterner::new())
}

#[test]
fn test_advance_stops_at_eof() {
    let list = tokens("var");
    let mut cursor = Cursor::new(list.as_slice());
    assert_eq!(cursor.advance().kind, TokenKind::Var);
    assert!(cursor.is_at_end());
    assert_eq!(cursor.advance().kind, TokenKind::Eof);
    assert_eq!(cursor.advance().kind, TokenKind::Eof);
    assert_eq!(cursor.position(), 1);
}

#[test]
fn test_check_ignores_payload() {
    let list = tokens("12 x");
    let mut cursor = Cursor::new(list.as_slice());
    assert!(cursor.check(&TokenKind::Number(0.0)));
    cursor.advance();
    assert!(cursor.check_ident());
}

#[test]
fn test_eat_and_previous() {
    let list = tokens("( )");
    let mut cursor = Cursor::new(list.as_slice());
    assert!(!cursor.eat(&TokenKind::RParen));
    assert!(cursor.eat(&TokenKind::LParen));
    assert_eq!(cursor.previous().kind, TokenKind::LParen);
    assert_eq!(cursor.previous().span, Span::new(0, 1));
}
