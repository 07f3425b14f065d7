//! The iterator protocol.
//!
//! `iter_of` turns an iterable into an iterator: built-in values get a
//! native iterator, instances are asked for `__iter__()`. `iter_next`
//! advances either kind, calling `__next__()` on anything that is not a
//! native iterator. Exhaustion is signalled by `Value::Sentinel`.

use std::rc::Rc;

use super::Interpreter;
use crate::errors::not_iterable;
use crate::iterator::{RangeIter, StrIter, VecIter};
use crate::shared::Shared;
use crate::{EvalResult, Value};

impl Interpreter {
    /// `value.__iter__()`
    pub fn iter_of(&mut self, value: &Value) -> EvalResult {
        match value {
            Value::Vec(items) => Ok(Value::Iterator(Rc::new(VecIter::new(items.clone())))),
            Value::Range(range) => Ok(Value::Iterator(Rc::new(RangeIter::new(
                range.start,
                range.end,
            )))),
            Value::Str(text) => Ok(Value::Iterator(Rc::new(StrIter::new(Rc::clone(text))))),
            Value::Iterator(_) => Ok(value.clone()),
            Value::Instance(_) => self.invoke_method(value, self.protocol.iter, &[]),
            _ => Err(not_iterable(value.type_name())),
        }
    }

    /// `iterator.__next__()`
    pub fn iter_next(&mut self, iterator: &Value) -> EvalResult {
        match iterator {
            Value::Iterator(it) => it.next(self),
            _ => self.invoke_method(iterator, self.protocol.next, &[]),
        }
    }

    /// Drain `iterable` into a new vector.
    ///
    /// `__iter__` is called once; the source is never modified.
    pub fn collect(&mut self, iterable: &Value) -> EvalResult {
        let iterator = self.iter_of(iterable)?;
        let mut items = Vec::new();
        loop {
            let item = self.iter_next(&iterator)?;
            if item.is_sentinel() {
                break;
            }
            items.push(item);
        }
        let items = Shared::new(items);
        self.registry.track_vec(&items);
        Ok(Value::Vec(items))
    }
}
