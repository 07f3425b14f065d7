//! Tern IR - shared front-end types
//!
//! This crate contains the data structures passed between the Tern lexer,
//! parser and interpreter:
//! - Spans for source locations
//! - Names for interned identifiers
//! - Tokens and `TokenList` for lexer output
//! - AST nodes (`Stmt`, `Expr`, `FunctionDecl`, `ClassDecl`)
//!
//! Identifiers and string literals are interned once (`Name(u32)`), so the
//! interpreter compares and hashes them in O(1).

pub mod ast;
mod interner;
mod name;
mod span;
mod token;

pub use ast::{
    BinaryOp, ClassDecl, Expr, ExprKind, FunctionDecl, FunctionKind, LogicalOp, Stmt, StmtKind,
    UnaryOp,
};
pub use interner::{SharedInterner, StringInterner, StringLookup};
pub use name::Name;
pub use span::Span;
pub use token::{LexErrorKind, Token, TokenKind, TokenList};
