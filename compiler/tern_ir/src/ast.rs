//! Abstract syntax tree.
//!
//! Every `Stmt` and `Expr` carries its span and the 1-based line it starts
//! on; the interpreter uses the line to keep call frames current.
//!
//! Function bodies are shared (`Rc<FunctionDecl>`) so that every closure
//! created from the same declaration points at one body.

use std::rc::Rc;

use crate::{Name, Span};

#[derive(Clone, Debug, PartialEq)]
pub struct Stmt {
    pub kind: StmtKind,
    pub span: Span,
    pub line: u32,
}

impl Stmt {
    pub fn new(kind: StmtKind, span: Span, line: u32) -> Self {
        Stmt { kind, span, line }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum StmtKind {
    /// `expr;`
    Expr(Expr),
    /// `var name = init;` (no initializer binds nil)
    Var { name: Name, init: Option<Expr> },
    /// `fn name(params) { body }`
    Function(Rc<FunctionDecl>),
    Class(ClassDecl),
    Return(Option<Expr>),
    /// `else if` chains nest as a single `If` inside `else_branch`.
    If {
        cond: Expr,
        then_branch: Vec<Stmt>,
        else_branch: Option<Vec<Stmt>>,
    },
    While { cond: Expr, body: Vec<Stmt> },
    /// `for var in iterable { body }`
    For {
        var: Name,
        iterable: Expr,
        body: Vec<Stmt>,
    },
    Block(Vec<Stmt>),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FunctionKind {
    Function,
    Method,
    /// A method named `__init__`.
    Initializer,
    Lambda,
}

impl FunctionKind {
    /// Methods receive `self` in addition to their declared parameters.
    #[inline]
    pub fn takes_self(self) -> bool {
        matches!(self, FunctionKind::Method | FunctionKind::Initializer)
    }
}

/// A function, method or lambda.
///
/// For methods, `params` excludes the leading `self`, so `params.len()` is
/// always the arity callers must match.
#[derive(Clone, Debug, PartialEq)]
pub struct FunctionDecl {
    pub name: Name,
    pub params: Vec<Name>,
    pub body: Vec<Stmt>,
    pub kind: FunctionKind,
    pub span: Span,
    pub line: u32,
}

impl FunctionDecl {
    #[inline]
    pub fn arity(&self) -> usize {
        self.params.len()
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct ClassDecl {
    pub name: Name,
    /// Superclass expression, evaluated exactly once at declaration.
    pub superclass: Option<Expr>,
    pub methods: Vec<Rc<FunctionDecl>>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Expr {
    pub kind: ExprKind,
    pub span: Span,
    pub line: u32,
}

impl Expr {
    pub fn new(kind: ExprKind, span: Span, line: u32) -> Self {
        Expr { kind, span, line }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum ExprKind {
    Nil,
    Bool(bool),
    Number(f64),
    Str(Name),
    Ident(Name),
    SelfRef,
    /// `super.method`
    Super { method: Name },
    /// `name = value`, or `name op= value` when `op` is set.
    Assign {
        name: Name,
        op: Option<BinaryOp>,
        value: Box<Expr>,
    },
    /// `object.name`
    Field { object: Box<Expr>, name: Name },
    /// `object.name = value`; `op` as for `Assign`.
    SetField {
        object: Box<Expr>,
        name: Name,
        op: Option<BinaryOp>,
        value: Box<Expr>,
    },
    /// `object[index]`
    Index { object: Box<Expr>, index: Box<Expr> },
    /// `object[index] = value`; `op` as for `Assign`.
    SetIndex {
        object: Box<Expr>,
        index: Box<Expr>,
        op: Option<BinaryOp>,
        value: Box<Expr>,
    },
    Call { callee: Box<Expr>, args: Vec<Expr> },
    Binary {
        op: BinaryOp,
        left: Box<Expr>,
        right: Box<Expr>,
    },
    /// Short-circuiting `and` / `or`.
    Logical {
        op: LogicalOp,
        left: Box<Expr>,
        right: Box<Expr>,
    },
    Unary { op: UnaryOp, operand: Box<Expr> },
    /// `start..end`
    Range { start: Box<Expr>, end: Box<Expr> },
    /// `[a, b, c]`
    Vec(Vec<Expr>),
    /// `|params| expr` or `|params| { body }`
    Lambda(Rc<FunctionDecl>),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BinaryOp {
    Add,
    Sub,
    Mul,
    Div,
    Eq,
    NotEq,
    Lt,
    LtEq,
    Gt,
    GtEq,
}

impl BinaryOp {
    pub fn as_symbol(self) -> &'static str {
        match self {
            BinaryOp::Add => "+",
            BinaryOp::Sub => "-",
            BinaryOp::Mul => "*",
            BinaryOp::Div => "/",
            BinaryOp::Eq => "==",
            BinaryOp::NotEq => "!=",
            BinaryOp::Lt => "<",
            BinaryOp::LtEq => "<=",
            BinaryOp::Gt => ">",
            BinaryOp::GtEq => ">=",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LogicalOp {
    And,
    Or,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum UnaryOp {
    Neg,
    Not,
}

impl UnaryOp {
    pub fn as_symbol(self) -> &'static str {
        match self {
            UnaryOp::Neg => "-",
            UnaryOp::Not => "!",
        }
    }
}
