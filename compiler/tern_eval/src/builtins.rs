//! Built-in methods of vectors, ranges, strings and iterators, plus the
//! native globals.
//!
//! String positions count characters, matching `len` and iteration.
//!
//! A built-in method read off a value becomes a `BoundBuiltin`; calling it
//! lands in [`Interpreter::call_builtin`]. The `Iter` base class lists
//! `map`, `filter` and `collect` as builtins too, so user iterators that
//! inherit from it share the same code paths.

use std::rc::Rc;

use tern_ir::Name;

use crate::errors::{
    arity_mismatch, empty_pattern, index_out_of_bounds, not_a_number, not_a_string,
    not_an_integer, pop_from_empty, string_index_out_of_bounds, undefined_property, EvalError,
};
use crate::interpreter::{BuiltinNames, ProtocolNames};
use crate::iterator::{FilterIter, MapIter};
use crate::value::NativeFunction;
use crate::{EvalResult, Interpreter, Shared, Value};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BuiltinMethod {
    Push,
    Pop,
    Len,
    GetItem,
    SetItem,
    Iter,
    Next,
    Map,
    Filter,
    Collect,
    Find,
    Split,
    Replace,
    StartsWith,
    EndsWith,
    AsNum,
}

impl BuiltinMethod {
    pub fn arity(self) -> usize {
        match self {
            BuiltinMethod::Pop
            | BuiltinMethod::Len
            | BuiltinMethod::Iter
            | BuiltinMethod::Next
            | BuiltinMethod::Collect
            | BuiltinMethod::AsNum => 0,
            BuiltinMethod::Push
            | BuiltinMethod::GetItem
            | BuiltinMethod::Map
            | BuiltinMethod::Filter
            | BuiltinMethod::Split
            | BuiltinMethod::StartsWith
            | BuiltinMethod::EndsWith => 1,
            BuiltinMethod::SetItem | BuiltinMethod::Find | BuiltinMethod::Replace => 2,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            BuiltinMethod::Push => "push",
            BuiltinMethod::Pop => "pop",
            BuiltinMethod::Len => "len",
            BuiltinMethod::GetItem => "__getitem__",
            BuiltinMethod::SetItem => "__setitem__",
            BuiltinMethod::Iter => "__iter__",
            BuiltinMethod::Next => "__next__",
            BuiltinMethod::Map => "map",
            BuiltinMethod::Filter => "filter",
            BuiltinMethod::Collect => "collect",
            BuiltinMethod::Find => "find",
            BuiltinMethod::Split => "split",
            BuiltinMethod::Replace => "replace",
            BuiltinMethod::StartsWith => "starts_with",
            BuiltinMethod::EndsWith => "ends_with",
            BuiltinMethod::AsNum => "as_num",
        }
    }

    pub(crate) fn from_name(
        name: Name,
        protocol: &ProtocolNames,
        builtins: &BuiltinNames,
    ) -> Option<Self> {
        let method = if name == builtins.push {
            BuiltinMethod::Push
        } else if name == builtins.pop {
            BuiltinMethod::Pop
        } else if name == builtins.len {
            BuiltinMethod::Len
        } else if name == protocol.getitem {
            BuiltinMethod::GetItem
        } else if name == protocol.setitem {
            BuiltinMethod::SetItem
        } else if name == protocol.iter {
            BuiltinMethod::Iter
        } else if name == protocol.next {
            BuiltinMethod::Next
        } else if name == builtins.map {
            BuiltinMethod::Map
        } else if name == builtins.filter {
            BuiltinMethod::Filter
        } else if name == builtins.collect {
            BuiltinMethod::Collect
        } else if name == builtins.find {
            BuiltinMethod::Find
        } else if name == builtins.split {
            BuiltinMethod::Split
        } else if name == builtins.replace {
            BuiltinMethod::Replace
        } else if name == builtins.starts_with {
            BuiltinMethod::StartsWith
        } else if name == builtins.ends_with {
            BuiltinMethod::EndsWith
        } else if name == builtins.as_num {
            BuiltinMethod::AsNum
        } else {
            return None;
        };
        Some(method)
    }

    /// Whether values like `receiver` have this method natively.
    pub fn applies_to(self, receiver: &Value) -> bool {
        use BuiltinMethod::{
            AsNum, Collect, EndsWith, Filter, Find, GetItem, Iter, Len, Map, Next, Pop, Push,
            Replace, SetItem, Split, StartsWith,
        };
        match receiver {
            Value::Vec(_) => matches!(
                self,
                Push | Pop | Len | GetItem | SetItem | Iter | Map | Filter | Collect
            ),
            Value::Range(_) => matches!(self, Iter | Map | Filter | Collect),
            Value::Str(_) => matches!(
                self,
                Len | GetItem | Iter | Find | Split | Replace | StartsWith | EndsWith | AsNum
            ),
            Value::Iterator(_) => matches!(self, Iter | Next | Map | Filter | Collect),
            _ => false,
        }
    }
}

/// `print(value)`
pub(crate) fn native_print(interp: &mut Interpreter, args: &[Value]) -> EvalResult {
    let [value] = args else {
        return Err(arity_mismatch(1, args.len()));
    };
    let text = value.display(&interp.interner);
    interp.print_handler.println(&text);
    Ok(Value::Nil)
}

pub(crate) const PRINT: NativeFunction = NativeFunction {
    name: "print",
    arity: 1,
    func: native_print,
};

impl Interpreter {
    /// The built-in method `name` of `receiver`, if it has one.
    pub(crate) fn builtin_for(&self, receiver: &Value, name: Name) -> Option<BuiltinMethod> {
        BuiltinMethod::from_name(name, &self.protocol, &self.builtin_names)
            .filter(|method| method.applies_to(receiver))
    }

    /// Invoke a built-in method. Arity has already been checked.
    pub(crate) fn call_builtin(
        &mut self,
        receiver: &Value,
        method: BuiltinMethod,
        args: &[Value],
    ) -> EvalResult {
        match (method, receiver, args) {
            (BuiltinMethod::Push, Value::Vec(items), [item]) => {
                items.borrow_mut().push(item.clone());
                Ok(receiver.clone())
            }
            (BuiltinMethod::Pop, Value::Vec(items), []) => {
                let popped = items.borrow_mut().pop();
                popped.ok_or_else(pop_from_empty)
            }
            (BuiltinMethod::Len, Value::Vec(items), []) => Ok(count(items.borrow().len())),
            (BuiltinMethod::Len, Value::Str(s), []) => Ok(count(s.chars().count())),
            (BuiltinMethod::GetItem, Value::Vec(items), [index]) => {
                let items = items.borrow();
                let at = self.vec_index(items.len(), index)?;
                Ok(items[at].clone())
            }
            (BuiltinMethod::GetItem, Value::Str(s), [index]) => self.str_get_item(s, index),
            (BuiltinMethod::SetItem, Value::Vec(items), [index, value]) => {
                let len = items.borrow().len();
                let at = self.vec_index(len, index)?;
                let _old = std::mem::replace(&mut items.borrow_mut()[at], value.clone());
                Ok(value.clone())
            }
            (BuiltinMethod::Iter, _, []) => self.iter_of(receiver),
            (BuiltinMethod::Next, Value::Iterator(it), []) => it.next(self),
            (BuiltinMethod::Map, _, [transform]) => {
                let inner = self.iter_of(receiver)?;
                Ok(Value::Iterator(Rc::new(MapIter::new(inner, transform.clone()))))
            }
            (BuiltinMethod::Filter, _, [predicate]) => {
                let inner = self.iter_of(receiver)?;
                Ok(Value::Iterator(Rc::new(FilterIter::new(
                    inner,
                    predicate.clone(),
                ))))
            }
            (BuiltinMethod::Collect, _, []) => self.collect(receiver),
            (BuiltinMethod::Find, Value::Str(s), [pattern, start]) => {
                self.str_find(s, pattern, start)
            }
            (BuiltinMethod::Split, Value::Str(s), [delimiter]) => {
                let delimiter = self.expect_str(delimiter)?;
                if delimiter.is_empty() {
                    return Err(empty_pattern("split on"));
                }
                let parts: Vec<Value> = s.split(&*delimiter).map(Value::string).collect();
                let items = Shared::new(parts);
                self.registry.track_vec(&items);
                Ok(Value::Vec(items))
            }
            (BuiltinMethod::Replace, Value::Str(s), [from, to]) => {
                let from = self.expect_str(from)?;
                let to = self.expect_str(to)?;
                if from.is_empty() {
                    return Err(empty_pattern("replace"));
                }
                Ok(Value::string(&s.replace(&*from, &to)))
            }
            (BuiltinMethod::StartsWith, Value::Str(s), [prefix]) => {
                let prefix = self.expect_str(prefix)?;
                Ok(Value::Bool(s.starts_with(&*prefix)))
            }
            (BuiltinMethod::EndsWith, Value::Str(s), [suffix]) => {
                let suffix = self.expect_str(suffix)?;
                Ok(Value::Bool(s.ends_with(&*suffix)))
            }
            (BuiltinMethod::AsNum, Value::Str(s), []) => s
                .parse::<f64>()
                .map(Value::Number)
                .map_err(|_| not_a_number(s.to_string())),
            _ => Err(undefined_property(method.name())),
        }
    }

    fn vec_index(&self, len: usize, index: &Value) -> Result<usize, EvalError> {
        self.element_index(len, index, index_out_of_bounds)
    }

    /// Resolve a possibly negative index into `0..len`.
    fn element_index(
        &self,
        len: usize,
        index: &Value,
        out_of_bounds: fn() -> EvalError,
    ) -> Result<usize, EvalError> {
        let Some(raw) = index.as_integer() else {
            return Err(not_an_integer(index.display(&self.interner)));
        };
        let len = i64::try_from(len).map_err(|_| out_of_bounds())?;
        let at = if raw < 0 { raw + len } else { raw };
        if (0..len).contains(&at) {
            usize::try_from(at).map_err(|_| out_of_bounds())
        } else {
            Err(out_of_bounds())
        }
    }

    fn expect_str(&self, value: &Value) -> Result<Rc<str>, EvalError> {
        match value {
            Value::Str(s) => Ok(Rc::clone(s)),
            other => Err(not_a_string(other.display(&self.interner))),
        }
    }

    /// `s[i]` yields one character; `s[a..b]` yields the characters in
    /// `a..b`. Negative positions count from the end.
    fn str_get_item(&self, s: &str, index: &Value) -> EvalResult {
        let len = s.chars().count();
        if let Value::Range(range) = index {
            let start = slice_bound(len, range.start)?;
            let end = slice_bound(len, range.end)?;
            if start > end {
                return Err(string_index_out_of_bounds());
            }
            let slice: String = s.chars().skip(start).take(end - start).collect();
            return Ok(Value::string(&slice));
        }
        let at = self.element_index(len, index, string_index_out_of_bounds)?;
        let c = s.chars().nth(at).ok_or_else(string_index_out_of_bounds)?;
        Ok(Value::string(c.encode_utf8(&mut [0; 4])))
    }

    /// Position of the first `pattern` at or after `start`, or nil.
    fn str_find(&self, s: &str, pattern: &Value, start: &Value) -> EvalResult {
        let pattern = self.expect_str(pattern)?;
        if pattern.is_empty() {
            return Err(empty_pattern("find"));
        }
        let Some(raw) = start.as_integer() else {
            return Err(not_an_integer(start.display(&self.interner)));
        };
        let from = slice_bound(s.chars().count(), raw)?;
        let byte = s.char_indices().nth(from).map_or(s.len(), |(at, _)| at);
        let rest = &s[byte..];
        Ok(match rest.find(&*pattern) {
            Some(offset) => count(from + rest[..offset].chars().count()),
            None => Value::Nil,
        })
    }
}

/// Resolve a slice endpoint into `0..=len`; negative values count from the end.
fn slice_bound(len: usize, raw: i64) -> Result<usize, EvalError> {
    let len = i64::try_from(len).map_err(|_| string_index_out_of_bounds())?;
    let at = if raw < 0 { raw + len } else { raw };
    if (0..=len).contains(&at) {
        usize::try_from(at).map_err(|_| string_index_out_of_bounds())
    } else {
        Err(string_index_out_of_bounds())
    }
}

#[expect(clippy::cast_precision_loss, reason = "lengths are far below 2^52")]
fn count(n: usize) -> Value {
    Value::Number(n as f64)
}

