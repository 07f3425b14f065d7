//! Runtime values.
//!
//! Scalars are stored inline. Heap objects (closures, classes, instances,
//! vectors, iterators) are reference counted, so cloning a `Value` is cheap
//! and every clone aliases the same object.
//!
//! Equality is structural for scalars, strings, ranges and vectors, and by
//! identity for everything else.

use std::fmt;
use std::rc::Rc;

use tern_ir::StringLookup;

use crate::builtins::BuiltinMethod;
use crate::iterator::NativeIterator;
use crate::object::{BoundMethod, Class, Closure, Instance};
use crate::shared::Shared;
use crate::{EvalResult, Interpreter};

/// Signature of a native function.
pub type NativeFn = fn(&mut Interpreter, &[Value]) -> EvalResult;

/// A function implemented in Rust and exposed as a global.
#[derive(Clone, Copy)]
pub struct NativeFunction {
    pub name: &'static str,
    pub arity: usize,
    pub func: NativeFn,
}

impl fmt::Debug for NativeFunction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "NativeFunction({}/{})", self.name, self.arity)
    }
}

/// A built-in method bound to the value it was read from.
#[derive(Clone, Debug)]
pub struct BoundBuiltin {
    pub receiver: Value,
    pub method: BuiltinMethod,
}

/// Half-open integer range `start..end`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RangeValue {
    pub start: i64,
    pub end: i64,
}

#[derive(Clone)]
pub enum Value {
    Nil,
    Bool(bool),
    Number(f64),
    Str(Rc<str>),
    Vec(Shared<Vec<Value>>),
    Range(RangeValue),
    Closure(Rc<Closure>),
    BoundMethod(Rc<BoundMethod>),
    Native(NativeFunction),
    BoundBuiltin(Rc<BoundBuiltin>),
    Class(Rc<Class>),
    Instance(Rc<Instance>),
    Iterator(Rc<dyn NativeIterator>),
    /// End-of-iteration marker returned by `__next__`.
    Sentinel,
}

impl Value {
    #[inline]
    pub fn string(s: &str) -> Self {
        Value::Str(Rc::from(s))
    }

    pub fn vec(items: Vec<Value>) -> Self {
        Value::Vec(Shared::new(items))
    }

    #[inline]
    pub fn is_truthy(&self) -> bool {
        !matches!(self, Value::Nil | Value::Bool(false))
    }

    #[inline]
    pub fn is_sentinel(&self) -> bool {
        matches!(self, Value::Sentinel)
    }

    /// The number as an `i64` if it has no fractional part.
    #[expect(
        clippy::cast_possible_truncation,
        reason = "guarded by the fract and range checks"
    )]
    pub fn as_integer(&self) -> Option<i64> {
        match self {
            Value::Number(n) if n.fract() == 0.0 && n.abs() < 9.0e15 => Some(*n as i64),
            _ => None,
        }
    }

    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Nil => "nil",
            Value::Bool(_) => "bool",
            Value::Number(_) => "number",
            Value::Str(_) => "string",
            Value::Vec(_) => "Vec",
            Value::Range(_) => "Range",
            Value::Closure(_) | Value::BoundMethod(_) => "function",
            Value::Native(_) | Value::BoundBuiltin(_) => "native function",
            Value::Class(_) => "class",
            Value::Instance(_) => "instance",
            Value::Iterator(it) => it.type_name(),
            Value::Sentinel => "sentinel",
        }
    }

    /// Render the value the way `print` shows it.
    pub fn display(&self, names: &impl StringLookup) -> String {
        let mut out = String::new();
        let mut visiting = Vec::new();
        self.write_display(names, &mut out, &mut visiting);
        out
    }

    fn write_display(
        &self,
        names: &impl StringLookup,
        out: &mut String,
        visiting: &mut Vec<*const ()>,
    ) {
        use std::fmt::Write;

        match self {
            Value::Nil => out.push_str("nil"),
            Value::Bool(b) => {
                let _ = write!(out, "{b}");
            }
            Value::Number(n) => {
                let _ = write!(out, "{n}");
            }
            Value::Str(s) => out.push_str(s),
            Value::Vec(items) => {
                let ptr = items.as_ptr().cast::<()>();
                if visiting.contains(&ptr) {
                    out.push_str("[...]");
                    return;
                }
                visiting.push(ptr);
                out.push('[');
                for (i, item) in items.borrow().iter().enumerate() {
                    if i > 0 {
                        out.push_str(", ");
                    }
                    item.write_display(names, out, visiting);
                }
                out.push(']');
                visiting.pop();
            }
            Value::Range(r) => {
                let _ = write!(out, "Range({}, {})", r.start, r.end);
            }
            Value::Closure(c) => {
                let _ = write!(out, "<fn {}>", names.lookup(c.decl.name));
            }
            Value::BoundMethod(b) => {
                let _ = write!(out, "<fn {}>", names.lookup(b.method.decl.name));
            }
            Value::Native(_) | Value::BoundBuiltin(_) => out.push_str("<native fn>"),
            Value::Class(c) => out.push_str(names.lookup(c.name)),
            Value::Instance(i) => {
                let _ = write!(out, "{} instance", names.lookup(i.class.name));
            }
            Value::Iterator(it) => {
                let _ = write!(out, "{} instance", it.type_name());
            }
            Value::Sentinel => out.push_str("<sentinel>"),
        }
    }
}

impl Value {
    /// Structural equality that treats a pair of vectors already under
    /// comparison as equal, so self-containing vectors terminate.
    fn eq_guarded(&self, other: &Self, comparing: &mut Vec<(*const (), *const ())>) -> bool {
        match (self, other) {
            (Value::Vec(a), Value::Vec(b)) => {
                if a.ptr_eq(b) {
                    return true;
                }
                let pair = (a.as_ptr().cast::<()>(), b.as_ptr().cast::<()>());
                if comparing.contains(&pair) {
                    return true;
                }
                let (left, right) = (a.borrow(), b.borrow());
                if left.len() != right.len() {
                    return false;
                }
                comparing.push(pair);
                let equal = tern_stack::ensure_sufficient_stack(|| {
                    left.iter()
                        .zip(right.iter())
                        .all(|(x, y)| x.eq_guarded(y, comparing))
                });
                comparing.pop();
                equal
            }
            _ => self == other,
        }
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Nil, Value::Nil) | (Value::Sentinel, Value::Sentinel) => true,
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::Number(a), Value::Number(b)) => a == b,
            (Value::Str(a), Value::Str(b)) => a == b,
            (Value::Range(a), Value::Range(b)) => a == b,
            (Value::Vec(_), Value::Vec(_)) => self.eq_guarded(other, &mut Vec::new()),
            (Value::Closure(a), Value::Closure(b)) => Rc::ptr_eq(a, b),
            (Value::BoundMethod(a), Value::BoundMethod(b)) => {
                Rc::ptr_eq(&a.receiver, &b.receiver) && Rc::ptr_eq(&a.method, &b.method)
            }
            (Value::Native(a), Value::Native(b)) => a.name == b.name,
            (Value::BoundBuiltin(a), Value::BoundBuiltin(b)) => Rc::ptr_eq(a, b),
            (Value::Class(a), Value::Class(b)) => Rc::ptr_eq(a, b),
            (Value::Instance(a), Value::Instance(b)) => Rc::ptr_eq(a, b),
            (Value::Iterator(a), Value::Iterator(b)) => Rc::ptr_eq(a, b),
            _ => false,
        }
    }
}

impl fmt::Debug for Value {
    // Objects print by identity; following their contents could loop.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Nil => f.write_str("Nil"),
            Value::Bool(b) => write!(f, "Bool({b})"),
            Value::Number(n) => write!(f, "Number({n})"),
            Value::Str(s) => write!(f, "Str({s:?})"),
            Value::Vec(items) => match items.try_borrow() {
                Ok(items) => write!(f, "Vec(len={})", items.len()),
                Err(_) => f.write_str("Vec(<borrowed>)"),
            },
            Value::Range(r) => write!(f, "Range({}..{})", r.start, r.end),
            Value::Closure(c) => write!(f, "Closure({:?})", c.decl.name),
            Value::BoundMethod(b) => write!(f, "BoundMethod({:?})", b.method.decl.name),
            Value::Native(n) => write!(f, "Native({})", n.name),
            Value::BoundBuiltin(b) => write!(f, "BoundBuiltin({:?})", b.method),
            Value::Class(c) => write!(f, "Class({:?})", c.name),
            Value::Instance(i) => write!(f, "Instance({:?})", i.class.name),
            Value::Iterator(it) => write!(f, "Iterator({})", it.type_name()),
            Value::Sentinel => f.write_str("Sentinel"),
        }
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::string(s)
    }
}

#[cfg(test)]
mod tests;
