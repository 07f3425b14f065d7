//! Statement execution.

use std::rc::Rc;

use rustc_hash::FxHashMap;
use tern_ir::{ClassDecl, Name, Stmt, StmtKind};

use super::{ControlSignal, ExecResult, Interpreter};
use crate::errors::superclass_not_class;
use crate::object::{make_class, make_closure, Method};
use crate::{EvalError, Value};

impl Interpreter {
    pub fn execute(&mut self, stmt: &Stmt) -> ExecResult {
        self.maybe_collect();
        self.call_stack.set_line(stmt.line);
        match &stmt.kind {
            StmtKind::Expr(expr) => {
                self.evaluate(expr)?;
            }
            StmtKind::Var { name, init } => {
                let value = match init {
                    Some(init) => self.evaluate(init)?,
                    None => Value::Nil,
                };
                self.env.define(*name, value);
            }
            StmtKind::Function(decl) => {
                let closure = make_closure(Rc::clone(decl), self.env.clone());
                self.env.define(decl.name, Value::Closure(closure));
            }
            StmtKind::Class(decl) => self.declare_class(decl)?,
            StmtKind::Return(value) => {
                let value = match value {
                    Some(expr) => self.evaluate(expr)?,
                    None => Value::Nil,
                };
                return Ok(ControlSignal::Return(value));
            }
            StmtKind::If {
                cond,
                then_branch,
                else_branch,
            } => {
                if self.evaluate(cond)?.is_truthy() {
                    return self.execute_block(then_branch);
                }
                if let Some(else_branch) = else_branch {
                    return self.execute_block(else_branch);
                }
            }
            StmtKind::While { cond, body } => loop {
                self.call_stack.set_line(stmt.line);
                if !self.evaluate(cond)?.is_truthy() {
                    break;
                }
                if let ControlSignal::Return(value) = self.execute_block(body)? {
                    return Ok(ControlSignal::Return(value));
                }
            },
            StmtKind::For {
                var,
                iterable,
                body,
            } => {
                let iterable = self.evaluate(iterable)?;
                let iterator = self.iter_of(&iterable)?;
                let roots = self.loop_roots.len();
                self.loop_roots.push(iterable);
                self.loop_roots.push(iterator.clone());
                let result = self.run_for(stmt.line, *var, &iterator, body);
                self.loop_roots.truncate(roots);
                return result;
            }
            StmtKind::Block(stmts) => return self.execute_block(stmts),
        }
        Ok(ControlSignal::Normal)
    }

    fn run_for(&mut self, line: u32, var: Name, iterator: &Value, body: &[Stmt]) -> ExecResult {
        loop {
            self.call_stack.set_line(line);
            let item = self.iter_next(iterator)?;
            if item.is_sentinel() {
                return Ok(ControlSignal::Normal);
            }
            let env = self.env.child();
            self.registry.track_env(&env);
            env.define(var, item);
            let signal = self.with_env(env, |scoped| scoped.execute_stmts(body))?;
            if let ControlSignal::Return(value) = signal {
                return Ok(ControlSignal::Return(value));
            }
        }
    }

    /// Execute statements in the current environment, stopping at `return`.
    pub fn execute_stmts(&mut self, stmts: &[Stmt]) -> ExecResult {
        for stmt in stmts {
            if let ControlSignal::Return(value) = self.execute(stmt)? {
                return Ok(ControlSignal::Return(value));
            }
        }
        Ok(ControlSignal::Normal)
    }

    /// Execute statements in a fresh child environment.
    pub fn execute_block(&mut self, stmts: &[Stmt]) -> ExecResult {
        let env = self.env.child();
        self.registry.track_env(&env);
        self.with_env(env, |scoped| scoped.execute_stmts(stmts))
    }

    /// Declare a class in the current environment.
    ///
    /// With a superclass, methods close over an extra scope binding `super`
    /// to the superclass object as it is right now.
    fn declare_class(&mut self, decl: &ClassDecl) -> Result<(), EvalError> {
        let superclass = match &decl.superclass {
            Some(expr) => match self.evaluate(expr)? {
                Value::Class(class) => Some(class),
                _ => return Err(superclass_not_class()),
            },
            None => None,
        };

        let method_env = match &superclass {
            Some(superclass) => {
                let env = self.env.child();
                self.registry.track_env(&env);
                env.define(self.protocol.super_, Value::Class(Rc::clone(superclass)));
                env
            }
            None => self.env.clone(),
        };

        let methods: FxHashMap<_, _> = decl
            .methods
            .iter()
            .map(|method| {
                let closure = make_closure(Rc::clone(method), method_env.clone());
                (method.name, Method::Closure(closure))
            })
            .collect();

        tracing::debug!(
            class = self.interner.lookup(decl.name),
            methods = methods.len(),
            inherits = superclass.is_some(),
            "declare class"
        );

        let class = make_class(decl.name, superclass, methods);
        self.env.define(decl.name, Value::Class(class));
        Ok(())
    }
}
