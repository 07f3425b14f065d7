//! S-expression rendering of the syntax tree for `tern parse`.
//!
//! One top-level statement per line group; nested statement lists are
//! indented two spaces per level.

use std::fmt::Write;

use tern_ir::{BinaryOp, Expr, ExprKind, FunctionDecl, LogicalOp, Stmt, StmtKind, StringLookup};

pub fn dump_program(stmts: &[Stmt], names: &impl StringLookup) -> String {
    let mut dumper = Dumper {
        names,
        out: String::new(),
    };
    for stmt in stmts {
        dumper.stmt(stmt, 0);
    }
    dumper.out
}

struct Dumper<'a, N: StringLookup> {
    names: &'a N,
    out: String,
}

impl<N: StringLookup> Dumper<'_, N> {
    fn line(&mut self, depth: usize, text: &str) {
        for _ in 0..depth {
            self.out.push_str("  ");
        }
        self.out.push_str(text);
        self.out.push('\n');
    }

    fn block(&mut self, header: &str, body: &[Stmt], depth: usize) {
        self.line(depth, &format!("({header}"));
        for stmt in body {
            self.stmt(stmt, depth + 1);
        }
        self.line(depth, ")");
    }

    fn function(&mut self, keyword: &str, decl: &FunctionDecl, depth: usize) {
        let names = self.names;
        let params: Vec<&str> = decl.params.iter().map(|p| names.lookup(*p)).collect();
        let header = format!(
            "{keyword} {} ({})",
            names.lookup(decl.name),
            params.join(" ")
        );
        self.block(&header, &decl.body, depth);
    }

    fn stmt(&mut self, stmt: &Stmt, depth: usize) {
        match &stmt.kind {
            StmtKind::Expr(expr) => {
                let text = self.expr(expr);
                self.line(depth, &text);
            }
            StmtKind::Var { name, init } => {
                let text = match init {
                    Some(init) => format!("(var {} {})", self.names.lookup(*name), self.expr(init)),
                    None => format!("(var {})", self.names.lookup(*name)),
                };
                self.line(depth, &text);
            }
            StmtKind::Function(decl) => self.function("fn", decl, depth),
            StmtKind::Class(class) => {
                let mut header = format!("class {}", self.names.lookup(class.name));
                if let Some(superclass) = &class.superclass {
                    let _ = write!(header, " < {}", self.expr(superclass));
                }
                self.line(depth, &format!("({header}"));
                for method in &class.methods {
                    self.function("method", method, depth + 1);
                }
                self.line(depth, ")");
            }
            StmtKind::Return(value) => {
                let text = match value {
                    Some(value) => format!("(return {})", self.expr(value)),
                    None => "(return)".to_string(),
                };
                self.line(depth, &text);
            }
            StmtKind::If {
                cond,
                then_branch,
                else_branch,
            } => {
                let header = format!("if {}", self.expr(cond));
                self.block(&header, then_branch, depth);
                if let Some(else_branch) = else_branch {
                    self.block("else", else_branch, depth);
                }
            }
            StmtKind::While { cond, body } => {
                let header = format!("while {}", self.expr(cond));
                self.block(&header, body, depth);
            }
            StmtKind::For {
                var,
                iterable,
                body,
            } => {
                let header = format!(
                    "for {} in {}",
                    self.names.lookup(*var),
                    self.expr(iterable)
                );
                self.block(&header, body, depth);
            }
            StmtKind::Block(body) => self.block("block", body, depth),
        }
    }

    fn expr(&self, expr: &Expr) -> String {
        let names = self.names;
        match &expr.kind {
            ExprKind::Nil => "nil".to_string(),
            ExprKind::Bool(b) => b.to_string(),
            ExprKind::Number(n) => n.to_string(),
            ExprKind::Str(s) => format!("{:?}", names.lookup(*s)),
            ExprKind::Ident(name) => names.lookup(*name).to_string(),
            ExprKind::SelfRef => "self".to_string(),
            ExprKind::Super { method } => format!("(super {})", names.lookup(*method)),
            ExprKind::Assign { name, op, value } => {
                format!("({} {} {})", assign_symbol(*op), names.lookup(*name), self.expr(value))
            }
            ExprKind::Field { object, name } => {
                format!("(. {} {})", self.expr(object), names.lookup(*name))
            }
            ExprKind::SetField {
                object,
                name,
                op,
                value,
            } => format!(
                "({} (. {} {}) {})",
                assign_symbol(*op),
                self.expr(object),
                names.lookup(*name),
                self.expr(value)
            ),
            ExprKind::Index { object, index } => {
                format!("([] {} {})", self.expr(object), self.expr(index))
            }
            ExprKind::SetIndex {
                object,
                index,
                op,
                value,
            } => format!(
                "({} ([] {} {}) {})",
                assign_symbol(*op),
                self.expr(object),
                self.expr(index),
                self.expr(value)
            ),
            ExprKind::Call { callee, args } => {
                let mut text = format!("(call {}", self.expr(callee));
                for arg in args {
                    text.push(' ');
                    text.push_str(&self.expr(arg));
                }
                text.push(')');
                text
            }
            ExprKind::Binary { op, left, right } => format!(
                "({} {} {})",
                op.as_symbol(),
                self.expr(left),
                self.expr(right)
            ),
            ExprKind::Logical { op, left, right } => {
                let symbol = match op {
                    LogicalOp::And => "and",
                    LogicalOp::Or => "or",
                };
                format!("({symbol} {} {})", self.expr(left), self.expr(right))
            }
            ExprKind::Unary { op, operand } => {
                format!("({} {})", op.as_symbol(), self.expr(operand))
            }
            ExprKind::Range { start, end } => {
                format!("(.. {} {})", self.expr(start), self.expr(end))
            }
            ExprKind::Vec(items) => {
                let items: Vec<String> = items.iter().map(|item| self.expr(item)).collect();
                format!("[{}]", items.join(" "))
            }
            ExprKind::Lambda(decl) => {
                let params: Vec<&str> = decl.params.iter().map(|p| names.lookup(*p)).collect();
                format!("(lambda ({}) <{} stmts>)", params.join(" "), decl.body.len())
            }
        }
    }
}

fn assign_symbol(op: Option<BinaryOp>) -> String {
    match op {
        Some(op) => format!("{}=", op.as_symbol()),
        None => "=".to_string(),
    }
}
