//! Declaration and statement parsing.

use std::rc::Rc;

use tern_ir::{ClassDecl, Expr, ExprKind, FunctionDecl, FunctionKind, Stmt, StmtKind, TokenKind};
use tern_stack::ensure_sufficient_stack;

use super::MAX_ARGS;
use crate::{ClassContext, PResult, Parser};

impl Parser<'_> {
    /// Parse one declaration, recording any error and resynchronizing.
    pub(crate) fn declaration(&mut self) -> Option<Stmt> {
        match ensure_sufficient_stack(|| self.declaration_inner()) {
            Ok(stmt) => Some(stmt),
            Err(err) => {
                self.errors.push(err);
                self.synchronize();
                None
            }
        }
    }

    fn declaration_inner(&mut self) -> PResult<Stmt> {
        match self.current().kind {
            TokenKind::Class => self.class_declaration(),
            TokenKind::Fn => self.function_declaration(),
            TokenKind::Var => self.var_declaration(),
            _ => self.statement(),
        }
    }

    fn class_declaration(&mut self) -> PResult<Stmt> {
        let start = self.advance();
        let (name, _) = self.expect_ident("Expected class name.")?;

        let superclass = if self.eat(&TokenKind::Lt) {
            let (super_name, token) = self.expect_ident("Expected superclass name.")?;
            if super_name == name {
                self.report(token, "A class cannot inherit from itself.");
            }
            Some(Expr::new(ExprKind::Ident(super_name), token.span, token.line))
        } else {
            None
        };

        self.expect(&TokenKind::LBrace, "Expected '{' before class body.")?;
        self.classes.push(ClassContext {
            has_superclass: superclass.is_some(),
        });
        let methods = self.class_body();
        self.classes.pop();
        let methods = methods?;

        Ok(Stmt::new(
            StmtKind::Class(ClassDecl {
                name,
                superclass,
                methods,
            }),
            self.span_from(start.span),
            start.line,
        ))
    }

    fn class_body(&mut self) -> PResult<Vec<Rc<FunctionDecl>>> {
        let mut methods = Vec::new();
        while !self.check(&TokenKind::RBrace) && !self.cursor.is_at_end() {
            self.expect(&TokenKind::Fn, "Expected 'fn' before method name.")?;
            methods.push(Rc::new(self.method()?));
        }
        self.expect(&TokenKind::RBrace, "Expected '}' after class body.")?;
        Ok(methods)
    }

    /// `name(self, params) { body }`, after the `fn`.
    fn method(&mut self) -> PResult<FunctionDecl> {
        let start = self.cursor.previous();
        let (name, _) = self.expect_ident("Expected method name.")?;
        self.expect(&TokenKind::LParen, "Expected '(' after method name.")?;
        if !self.eat(&TokenKind::SelfKw) {
            return Err(self.error_at_current("Expected 'self' as first parameter in method."));
        }
        let params = if self.eat(&TokenKind::Comma) {
            self.parameters(&TokenKind::RParen)?
        } else {
            Vec::new()
        };
        self.expect(&TokenKind::RParen, "Expected ')' after parameters.")?;

        let kind = if self.interner.lookup(name) == "__init__" {
            FunctionKind::Initializer
        } else {
            FunctionKind::Method
        };
        self.expect(&TokenKind::LBrace, "Expected '{' before function body.")?;
        let body = self.function_body()?;
        Ok(FunctionDecl {
            name,
            params,
            body,
            kind,
            span: self.span_from(start.span),
            line: start.line,
        })
    }

    fn function_declaration(&mut self) -> PResult<Stmt> {
        let start = self.advance();
        let (name, _) = self.expect_ident("Expected function name.")?;
        self.expect(&TokenKind::LParen, "Expected '(' after function name.")?;
        let params = if self.check(&TokenKind::RParen) {
            Vec::new()
        } else {
            self.parameters(&TokenKind::RParen)?
        };
        self.expect(&TokenKind::RParen, "Expected ')' after parameters.")?;
        self.expect(&TokenKind::LBrace, "Expected '{' before function body.")?;
        let body = self.function_body()?;

        let span = self.span_from(start.span);
        let decl = FunctionDecl {
            name,
            params,
            body,
            kind: FunctionKind::Function,
            span,
            line: start.line,
        };
        Ok(Stmt::new(StmtKind::Function(Rc::new(decl)), span, start.line))
    }

    /// Comma-separated parameter names, stopping before `close`.
    pub(crate) fn parameters(&mut self, close: &TokenKind) -> PResult<Vec<tern_ir::Name>> {
        let mut params = Vec::new();
        loop {
            if params.len() >= MAX_ARGS {
                self.report(self.current(), "Cannot have more than 255 parameters.");
            }
            let (param, _) = self.expect_ident("Expected parameter name.")?;
            params.push(param);
            if !self.eat(&TokenKind::Comma) || self.check(close) {
                break;
            }
        }
        Ok(params)
    }

    /// Statements up to the closing `}` of a function body (the `{` is
    /// already consumed).
    pub(crate) fn function_body(&mut self) -> PResult<Vec<Stmt>> {
        self.function_depth += 1;
        let body = self.block();
        self.function_depth -= 1;
        body
    }

    fn var_declaration(&mut self) -> PResult<Stmt> {
        let start = self.advance();
        let (name, _) = self.expect_ident("Expected variable name.")?;
        let init = if self.eat(&TokenKind::Eq) {
            Some(self.expression()?)
        } else {
            None
        };
        self.expect(
            &TokenKind::Semicolon,
            "Expected ';' after variable declaration.",
        )?;
        Ok(Stmt::new(
            StmtKind::Var { name, init },
            self.span_from(start.span),
            start.line,
        ))
    }

    fn statement(&mut self) -> PResult<Stmt> {
        match self.current().kind {
            TokenKind::If => self.if_statement(),
            TokenKind::While => self.while_statement(),
            TokenKind::For => self.for_statement(),
            TokenKind::Return => self.return_statement(),
            TokenKind::LBrace => {
                let start = self.advance();
                let stmts = self.block()?;
                Ok(Stmt::new(
                    StmtKind::Block(stmts),
                    self.span_from(start.span),
                    start.line,
                ))
            }
            _ => self.expression_statement(),
        }
    }

    /// Declarations up to and including the closing `}`.
    pub(crate) fn block(&mut self) -> PResult<Vec<Stmt>> {
        let mut stmts = Vec::new();
        while !self.check(&TokenKind::RBrace) && !self.cursor.is_at_end() {
            if let Some(stmt) = self.declaration() {
                stmts.push(stmt);
            }
        }
        self.expect(&TokenKind::RBrace, "Expected '}' after block.")?;
        Ok(stmts)
    }

    fn if_statement(&mut self) -> PResult<Stmt> {
        let start = self.advance();
        let cond = self.expression()?;
        self.expect(&TokenKind::LBrace, "Expected '{' after condition.")?;
        let then_branch = self.block()?;

        let else_branch = if self.eat(&TokenKind::Else) {
            if self.check(&TokenKind::If) {
                Some(vec![self.if_statement()?])
            } else {
                self.expect(&TokenKind::LBrace, "Expected '{' after 'else'.")?;
                Some(self.block()?)
            }
        } else {
            None
        };

        Ok(Stmt::new(
            StmtKind::If {
                cond,
                then_branch,
                else_branch,
            },
            self.span_from(start.span),
            start.line,
        ))
    }

    fn while_statement(&mut self) -> PResult<Stmt> {
        let start = self.advance();
        let cond = self.expression()?;
        self.expect(&TokenKind::LBrace, "Expected '{' after condition.")?;
        let body = self.block()?;
        Ok(Stmt::new(
            StmtKind::While { cond, body },
            self.span_from(start.span),
            start.line,
        ))
    }

    fn for_statement(&mut self) -> PResult<Stmt> {
        let start = self.advance();
        let (var, _) = self.expect_ident("Expected loop variable name.")?;
        self.expect(&TokenKind::In, "Expected 'in' after loop variable.")?;
        let iterable = self.expression()?;
        self.expect(&TokenKind::LBrace, "Expected '{' after loop expression.")?;
        let body = self.block()?;
        Ok(Stmt::new(
            StmtKind::For {
                var,
                iterable,
                body,
            },
            self.span_from(start.span),
            start.line,
        ))
    }

    fn return_statement(&mut self) -> PResult<Stmt> {
        let keyword = self.advance();
        if self.function_depth == 0 {
            self.report(keyword, "Cannot return from top-level code.");
        }
        let value = if self.check(&TokenKind::Semicolon) {
            None
        } else {
            Some(self.expression()?)
        };
        self.expect(&TokenKind::Semicolon, "Expected ';' after return value.")?;
        Ok(Stmt::new(
            StmtKind::Return(value),
            self.span_from(keyword.span),
            keyword.line,
        ))
    }

    fn expression_statement(&mut self) -> PResult<Stmt> {
        let expr = self.expression()?;
        self.expect(&TokenKind::Semicolon, "Expected ';' after expression.")?;
        let span = self.span_from(expr.span);
        let line = expr.line;
        Ok(Stmt::new(StmtKind::Expr(expr), span, line))
    }
}
