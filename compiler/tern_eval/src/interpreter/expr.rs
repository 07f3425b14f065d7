//! Expression evaluation.

use std::rc::Rc;

use smallvec::SmallVec;
use tern_ir::{BinaryOp, Expr, ExprKind, LogicalOp, Name};

use super::Interpreter;
use crate::errors::{not_an_integer, undefined_variable, EvalError};
use crate::object::make_closure;
use crate::operators::{evaluate_binary, evaluate_unary};
use crate::shared::Shared;
use crate::value::RangeValue;
use crate::{EvalResult, Value};

impl Interpreter {
    pub fn evaluate(&mut self, expr: &Expr) -> EvalResult {
        tern_stack::ensure_sufficient_stack(|| self.evaluate_inner(expr))
    }

    fn evaluate_inner(&mut self, expr: &Expr) -> EvalResult {
        match &expr.kind {
            ExprKind::Nil => Ok(Value::Nil),
            ExprKind::Bool(b) => Ok(Value::Bool(*b)),
            ExprKind::Number(n) => Ok(Value::Number(*n)),
            ExprKind::Str(name) => Ok(Value::string(self.interner.lookup(*name))),
            ExprKind::Ident(name) => self.lookup_variable(*name),
            ExprKind::SelfRef => self.lookup_variable(self.protocol.self_),
            ExprKind::Super { method } => self.get_super(*method),
            ExprKind::Assign { name, op, value } => {
                let name = *name;
                let value = self.assigned_value(*op, value, |this| this.lookup_variable(name))?;
                self.env
                    .assign(name, value.clone())
                    .map_err(|_| undefined_variable(self.interner.lookup(name)))?;
                Ok(value)
            }
            ExprKind::Field { object, name } => {
                let object = self.evaluate(object)?;
                self.get_attribute(&object, *name)
            }
            ExprKind::SetField {
                object,
                name,
                op,
                value,
            } => {
                let object = self.evaluate(object)?;
                let value =
                    self.assigned_value(*op, value, |this| this.get_attribute(&object, *name))?;
                self.set_attribute(&object, *name, value.clone())?;
                Ok(value)
            }
            ExprKind::Index { object, index } => {
                let object = self.evaluate(object)?;
                let index = self.evaluate(index)?;
                self.get_index(&object, index)
            }
            ExprKind::SetIndex {
                object,
                index,
                op,
                value,
            } => {
                let object = self.evaluate(object)?;
                let index = self.evaluate(index)?;
                let value = self.assigned_value(*op, value, |this| {
                    this.get_index(&object, index.clone())
                })?;
                self.set_index(&object, index, value.clone())?;
                Ok(value)
            }
            ExprKind::Call { callee, args } => {
                let callee = self.evaluate(callee)?;
                let args = args
                    .iter()
                    .map(|arg| self.evaluate(arg))
                    .collect::<Result<SmallVec<[Value; 4]>, EvalError>>()?;
                self.call_stack.set_line(expr.line);
                self.call_value(&callee, &args)
            }
            ExprKind::Binary { op, left, right } => {
                let left = self.evaluate(left)?;
                let right = self.evaluate(right)?;
                evaluate_binary(&left, &right, *op)
            }
            ExprKind::Logical { op, left, right } => {
                let left = self.evaluate(left)?;
                let short_circuit = match op {
                    LogicalOp::Or => left.is_truthy(),
                    LogicalOp::And => !left.is_truthy(),
                };
                if short_circuit {
                    Ok(left)
                } else {
                    self.evaluate(right)
                }
            }
            ExprKind::Unary { op, operand } => {
                let operand = self.evaluate(operand)?;
                evaluate_unary(*op, &operand)
            }
            ExprKind::Range { start, end } => {
                let start = self.evaluate(start)?;
                let end = self.evaluate(end)?;
                Ok(Value::Range(RangeValue {
                    start: self.range_bound(&start)?,
                    end: self.range_bound(&end)?,
                }))
            }
            ExprKind::Vec(items) => {
                let items = items
                    .iter()
                    .map(|item| self.evaluate(item))
                    .collect::<Result<Vec<_>, EvalError>>()?;
                let items = Shared::new(items);
                self.registry.track_vec(&items);
                Ok(Value::Vec(items))
            }
            ExprKind::Lambda(decl) => Ok(Value::Closure(make_closure(
                Rc::clone(decl),
                self.env.clone(),
            ))),
        }
    }

    fn lookup_variable(&self, name: Name) -> EvalResult {
        self.env
            .lookup(name)
            .ok_or_else(|| undefined_variable(self.interner.lookup(name)))
    }

    /// The value an assignment stores: `value` itself, or for `op=` the
    /// target's current value combined with it. The target's object and
    /// index are already evaluated by the caller, so each runs once.
    fn assigned_value(
        &mut self,
        op: Option<BinaryOp>,
        value: &Expr,
        current: impl FnOnce(&mut Self) -> EvalResult,
    ) -> EvalResult {
        let Some(op) = op else {
            return self.evaluate(value);
        };
        let current = current(self)?;
        let rhs = self.evaluate(value)?;
        evaluate_binary(&current, &rhs, op)
    }

    fn range_bound(&self, bound: &Value) -> Result<i64, EvalError> {
        bound
            .as_integer()
            .ok_or_else(|| not_an_integer(bound.display(&self.interner)))
    }
}
