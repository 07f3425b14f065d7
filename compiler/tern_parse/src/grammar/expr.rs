//! Expression parsing.
//!
//! Precedence, lowest first: assignment, `or`, `and`, equality,
//! comparison, range, term, factor, unary, call/access, primary.

use std::rc::Rc;

use tern_ir::{
    BinaryOp, Expr, ExprKind, FunctionDecl, FunctionKind, LogicalOp, Stmt, StmtKind,
    TokenKind, UnaryOp,
};
use tern_stack::ensure_sufficient_stack;

use super::MAX_ARGS;
use crate::{PResult, Parser};

impl Parser<'_> {
    pub(crate) fn expression(&mut self) -> PResult<Expr> {
        ensure_sufficient_stack(|| self.assignment())
    }

    fn assignment(&mut self) -> PResult<Expr> {
        let target = self.or()?;

        let op = match self.current().kind {
            TokenKind::Eq => None,
            TokenKind::PlusEq => Some(BinaryOp::Add),
            TokenKind::MinusEq => Some(BinaryOp::Sub),
            TokenKind::StarEq => Some(BinaryOp::Mul),
            TokenKind::SlashEq => Some(BinaryOp::Div),
            _ => return Ok(target),
        };
        let operator = self.advance();
        let value = Box::new(self.assignment()?);
        let span = target.span.merge(value.span);
        let line = target.line;

        let kind = match target.kind {
            ExprKind::Ident(name) => ExprKind::Assign { name, op, value },
            ExprKind::Field { object, name } => ExprKind::SetField {
                object,
                name,
                op,
                value,
            },
            ExprKind::Index { object, index } => ExprKind::SetIndex {
                object,
                index,
                op,
                value,
            },
            _ => {
                // Reported, but the rest of the expression parsed fine.
                self.report(operator, "Invalid assignment target.");
                return Ok(*value);
            }
        };
        Ok(Expr::new(kind, span, line))
    }

    fn or(&mut self) -> PResult<Expr> {
        let mut expr = self.and()?;
        while self.eat(&TokenKind::Or) {
            let right = self.and()?;
            expr = logical(LogicalOp::Or, expr, right);
        }
        Ok(expr)
    }

    fn and(&mut self) -> PResult<Expr> {
        let mut expr = self.equality()?;
        while self.eat(&TokenKind::And) {
            let right = self.equality()?;
            expr = logical(LogicalOp::And, expr, right);
        }
        Ok(expr)
    }

    fn equality(&mut self) -> PResult<Expr> {
        let mut expr = self.comparison()?;
        loop {
            let op = match self.current().kind {
                TokenKind::EqEq => BinaryOp::Eq,
                TokenKind::BangEq => BinaryOp::NotEq,
                _ => return Ok(expr),
            };
            let line = self.advance().line;
            let right = self.comparison()?;
            expr = binary(op, expr, right, line);
        }
    }

    fn comparison(&mut self) -> PResult<Expr> {
        let mut expr = self.range()?;
        loop {
            let op = match self.current().kind {
                TokenKind::Lt => BinaryOp::Lt,
                TokenKind::LtEq => BinaryOp::LtEq,
                TokenKind::Gt => BinaryOp::Gt,
                TokenKind::GtEq => BinaryOp::GtEq,
                _ => return Ok(expr),
            };
            let line = self.advance().line;
            let right = self.range()?;
            expr = binary(op, expr, right, line);
        }
    }

    /// `start..end`; does not chain.
    fn range(&mut self) -> PResult<Expr> {
        let start = self.term()?;
        if !self.eat(&TokenKind::DotDot) {
            return Ok(start);
        }
        let end = self.term()?;
        let span = start.span.merge(end.span);
        let line = start.line;
        Ok(Expr::new(
            ExprKind::Range {
                start: Box::new(start),
                end: Box::new(end),
            },
            span,
            line,
        ))
    }

    fn term(&mut self) -> PResult<Expr> {
        let mut expr = self.factor()?;
        loop {
            let op = match self.current().kind {
                TokenKind::Plus => BinaryOp::Add,
                TokenKind::Minus => BinaryOp::Sub,
                _ => return Ok(expr),
            };
            let line = self.advance().line;
            let right = self.factor()?;
            expr = binary(op, expr, right, line);
        }
    }

    fn factor(&mut self) -> PResult<Expr> {
        let mut expr = self.unary()?;
        loop {
            let op = match self.current().kind {
                TokenKind::Star => BinaryOp::Mul,
                TokenKind::Slash => BinaryOp::Div,
                _ => return Ok(expr),
            };
            let line = self.advance().line;
            let right = self.unary()?;
            expr = binary(op, expr, right, line);
        }
    }

    fn unary(&mut self) -> PResult<Expr> {
        let op = match self.current().kind {
            TokenKind::Bang => UnaryOp::Not,
            TokenKind::Minus => UnaryOp::Neg,
            _ => return self.call(),
        };
        let token = self.advance();
        let operand = ensure_sufficient_stack(|| self.unary())?;
        let span = token.span.merge(operand.span);
        Ok(Expr::new(
            ExprKind::Unary {
                op,
                operand: Box::new(operand),
            },
            span,
            token.line,
        ))
    }

    fn call(&mut self) -> PResult<Expr> {
        let mut expr = self.primary()?;
        loop {
            let token = self.current();
            match token.kind {
                TokenKind::LParen => {
                    self.advance();
                    let args = self.arguments()?;
                    let close =
                        self.expect(&TokenKind::RParen, "Expected ')' after arguments.")?;
                    let span = expr.span.merge(close.span);
                    expr = Expr::new(
                        ExprKind::Call {
                            callee: Box::new(expr),
                            args,
                        },
                        span,
                        token.line,
                    );
                }
                TokenKind::Dot => {
                    self.advance();
                    let (name, ident) =
                        self.expect_ident("Expected property name after '.'.")?;
                    let span = expr.span.merge(ident.span);
                    let line = expr.line;
                    expr = Expr::new(
                        ExprKind::Field {
                            object: Box::new(expr),
                            name,
                        },
                        span,
                        line,
                    );
                }
                TokenKind::LBracket => {
                    self.advance();
                    let index = self.expression()?;
                    let close = self.expect(&TokenKind::RBracket, "Expected ']' after index.")?;
                    let span = expr.span.merge(close.span);
                    let line = expr.line;
                    expr = Expr::new(
                        ExprKind::Index {
                            object: Box::new(expr),
                            index: Box::new(index),
                        },
                        span,
                        line,
                    );
                }
                _ => return Ok(expr),
            }
        }
    }

    fn arguments(&mut self) -> PResult<Vec<Expr>> {
        let mut args = Vec::new();
        if self.check(&TokenKind::RParen) {
            return Ok(args);
        }
        loop {
            if args.len() >= MAX_ARGS {
                self.report(self.current(), "Cannot have more than 255 arguments.");
            }
            args.push(self.expression()?);
            if !self.eat(&TokenKind::Comma) || self.check(&TokenKind::RParen) {
                return Ok(args);
            }
        }
    }

    fn primary(&mut self) -> PResult<Expr> {
        let token = self.current();
        let literal = |kind: ExprKind| -> PResult<Expr> { Ok(Expr::new(kind, token.span, token.line)) };
        match token.kind {
            TokenKind::Number(n) => {
                self.advance();
                literal(ExprKind::Number(n))
            }
            TokenKind::String(s) => {
                self.advance();
                literal(ExprKind::Str(s))
            }
            TokenKind::True => {
                self.advance();
                literal(ExprKind::Bool(true))
            }
            TokenKind::False => {
                self.advance();
                literal(ExprKind::Bool(false))
            }
            TokenKind::Nil => {
                self.advance();
                literal(ExprKind::Nil)
            }
            TokenKind::Ident(name) => {
                self.advance();
                literal(ExprKind::Ident(name))
            }
            TokenKind::SelfKw => {
                self.advance();
                if self.classes.is_empty() {
                    self.report(token, "Cannot use 'self' outside of a class.");
                }
                literal(ExprKind::SelfRef)
            }
            TokenKind::Super => self.super_access(),
            TokenKind::LParen => {
                self.advance();
                let expr = self.expression()?;
                self.expect(&TokenKind::RParen, "Expected ')' after expression.")?;
                Ok(expr)
            }
            TokenKind::LBracket => self.vec_literal(),
            TokenKind::Pipe => self.lambda(),
            _ => Err(self.error_at_current("Expected expression.")),
        }
    }

    fn super_access(&mut self) -> PResult<Expr> {
        let keyword = self.advance();
        match self.classes.last() {
            None => self.report(keyword, "Cannot use 'super' outside of a class."),
            Some(class) if !class.has_superclass => {
                self.report(keyword, "Cannot use 'super' in a class with no superclass.");
            }
            Some(_) => {}
        }
        self.expect(&TokenKind::Dot, "Expected '.' after 'super'.")?;
        let (method, ident) = self.expect_ident("Expected superclass method name.")?;
        Ok(Expr::new(
            ExprKind::Super { method },
            keyword.span.merge(ident.span),
            keyword.line,
        ))
    }

    fn vec_literal(&mut self) -> PResult<Expr> {
        let open = self.advance();
        let mut elements = Vec::new();
        while !self.check(&TokenKind::RBracket) {
            if elements.len() >= MAX_ARGS {
                self.report(self.current(), "Cannot have more than 255 Vec elements.");
            }
            elements.push(self.expression()?);
            if !self.eat(&TokenKind::Comma) {
                break;
            }
        }
        let close = self.expect(&TokenKind::RBracket, "Expected ']' after elements.")?;
        Ok(Expr::new(
            ExprKind::Vec(elements),
            open.span.merge(close.span),
            open.line,
        ))
    }

    /// `|a, b| expr` or `|a, b| { stmts }`.
    fn lambda(&mut self) -> PResult<Expr> {
        let open = self.advance();
        let params = if self.check(&TokenKind::Pipe) {
            Vec::new()
        } else {
            self.parameters(&TokenKind::Pipe)?
        };
        self.expect(&TokenKind::Pipe, "Expected '|' after lambda parameters.")?;

        let body = if self.eat(&TokenKind::LBrace) {
            self.function_body()?
        } else {
            self.function_depth += 1;
            let value = self.expression();
            self.function_depth -= 1;
            let value = value?;
            let (span, line) = (value.span, value.line);
            vec![Stmt::new(StmtKind::Return(Some(value)), span, line)]
        };

        let span = self.span_from(open.span);
        let decl = FunctionDecl {
            name: self.interner.intern("lambda"),
            params,
            body,
            kind: FunctionKind::Lambda,
            span,
            line: open.line,
        };
        Ok(Expr::new(ExprKind::Lambda(Rc::new(decl)), span, open.line))
    }
}

fn binary(op: BinaryOp, left: Expr, right: Expr, line: u32) -> Expr {
    let span = left.span.merge(right.span);
    Expr::new(
        ExprKind::Binary {
            op,
            left: Box::new(left),
            right: Box::new(right),
        },
        span,
        line,
    )
}

fn logical(op: LogicalOp, left: Expr, right: Expr) -> Expr {
    let span = left.span.merge(right.span);
    let line = left.line;
    Expr::new(
        ExprKind::Logical {
            op,
            left: Box::new(left),
            right: Box::new(right),
        },
        span,
        line,
    )
}
