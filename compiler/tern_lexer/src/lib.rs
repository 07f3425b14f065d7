//! Lexer for Tern using logos with string interning.
//!
//! `lex` never fails: characters logos cannot match, and string literals
//! left open at end of input, become `TokenKind::Error` tokens that the
//! parser reports with their line.

mod raw_token;

use logos::Logos;
use raw_token::RawToken;
use tern_ir::{LexErrorKind, Span, StringInterner, Token, TokenKind, TokenList};

/// Tokenize `source`, interning identifiers and string literals.
///
/// Lines are 1-based. The returned list always ends with `Eof`.
pub fn lex(source: &str, interner: &StringInterner) -> TokenList {
    let mut result = TokenList::new();
    let mut logos = RawToken::lexer(source);
    let mut line: u32 = 1;

    while let Some(token_result) = logos.next() {
        let span = Span::from_range(logos.span());
        let slice = logos.slice();

        match token_result {
            Ok(RawToken::Newline) => line += 1,
            Ok(raw) => {
                if let Some(kind) = convert_token(raw, slice, interner) {
                    result.push(Token::new(kind, span, line));
                }
                // String literals may span lines.
                line += count_newlines(slice);
            }
            Err(()) => {
                let kind = TokenKind::Error(LexErrorKind::UnexpectedCharacter);
                result.push(Token::new(kind, span, line));
            }
        }
    }

    let eof = Span::from_range(source.len()..source.len());
    result.push(Token::new(TokenKind::Eof, eof, line));
    result
}

fn count_newlines(slice: &str) -> u32 {
    u32::try_from(slice.bytes().filter(|&b| b == b'\n').count()).unwrap_or(u32::MAX)
}

/// Convert a raw token to a `TokenKind`, interning strings.
///
/// Returns `None` for trivia.
fn convert_token(raw: RawToken, slice: &str, interner: &StringInterner) -> Option<TokenKind> {
    let kind = match raw {
        RawToken::Number(n) => TokenKind::Number(n),
        RawToken::String => {
            let content = &slice[1..slice.len() - 1];
            TokenKind::String(interner.intern(&unescape_string(content)))
        }
        RawToken::UnterminatedString => TokenKind::Error(LexErrorKind::UnterminatedString),
        RawToken::Ident => TokenKind::Ident(interner.intern(slice)),

        RawToken::And => TokenKind::And,
        RawToken::Class => TokenKind::Class,
        RawToken::Else => TokenKind::Else,
        RawToken::False => TokenKind::False,
        RawToken::Fn => TokenKind::Fn,
        RawToken::For => TokenKind::For,
        RawToken::If => TokenKind::If,
        RawToken::In => TokenKind::In,
        RawToken::Nil => TokenKind::Nil,
        RawToken::Or => TokenKind::Or,
        RawToken::Return => TokenKind::Return,
        RawToken::SelfKw => TokenKind::SelfKw,
        RawToken::Super => TokenKind::Super,
        RawToken::True => TokenKind::True,
        RawToken::Var => TokenKind::Var,
        RawToken::While => TokenKind::While,

        RawToken::LParen => TokenKind::LParen,
        RawToken::RParen => TokenKind::RParen,
        RawToken::LBrace => TokenKind::LBrace,
        RawToken::RBrace => TokenKind::RBrace,
        RawToken::LBracket => TokenKind::LBracket,
        RawToken::RBracket => TokenKind::RBracket,
        RawToken::Comma => TokenKind::Comma,
        RawToken::Dot => TokenKind::Dot,
        RawToken::DotDot => TokenKind::DotDot,
        RawToken::Semicolon => TokenKind::Semicolon,
        RawToken::Pipe => TokenKind::Pipe,

        RawToken::Plus => TokenKind::Plus,
        RawToken::Minus => TokenKind::Minus,
        RawToken::Star => TokenKind::Star,
        RawToken::Slash => TokenKind::Slash,
        RawToken::PlusEq => TokenKind::PlusEq,
        RawToken::MinusEq => TokenKind::MinusEq,
        RawToken::StarEq => TokenKind::StarEq,
        RawToken::SlashEq => TokenKind::SlashEq,
        RawToken::Bang => TokenKind::Bang,
        RawToken::BangEq => TokenKind::BangEq,
        RawToken::Eq => TokenKind::Eq,
        RawToken::EqEq => TokenKind::EqEq,
        RawToken::Lt => TokenKind::Lt,
        RawToken::LtEq => TokenKind::LtEq,
        RawToken::Gt => TokenKind::Gt,
        RawToken::GtEq => TokenKind::GtEq,

        RawToken::LineComment | RawToken::Newline => return None,
    };
    Some(kind)
}

/// Process `\n`, `\t`, `\\` and `\"`. Unknown escapes are kept verbatim.
fn unescape_string(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    let mut chars = s.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            result.push(c);
            continue;
        }
        match chars.next() {
            Some('n') => result.push('\n'),
            Some('t') => result.push('\t'),
            Some('\\') => result.push('\\'),
            Some('"') => result.push('"'),
            Some(other) => {
                result.push('\\');
                result.push(other);
            }
            None => result.push('\\'),
        }
    }
    result
}
