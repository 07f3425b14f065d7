//! Native iterators.
//!
//! Built-in iterables hand out values implementing [`NativeIterator`];
//! user classes take part through `__iter__`/`__next__` instead. Both meet
//! in [`Interpreter::iter_next`], so the adapters here (`Map`, `Filter`)
//! wrap any iterator without knowing which kind it is.
//!
//! Every iterator returns [`Value::Sentinel`] when exhausted. The adapters
//! remember exhaustion and never pull from their source again.

use std::cell::Cell;
use std::fmt;
use std::rc::Rc;

use crate::registry::Marker;
use crate::shared::Shared;
use crate::{EvalResult, Interpreter, Value};

pub trait NativeIterator: fmt::Debug {
    /// Shown by `print` as `"{type_name} instance"`.
    fn type_name(&self) -> &'static str;

    /// Produce the next item or `Value::Sentinel`.
    fn next(&self, interp: &mut Interpreter) -> EvalResult;

    /// Queue every runtime object this iterator holds on to.
    fn trace(&self, _marker: &mut Marker) {}
}

/// Walks a vector by index. Pushes made while iterating are seen.
pub struct VecIter {
    items: Shared<Vec<Value>>,
    index: Cell<usize>,
}

impl VecIter {
    pub fn new(items: Shared<Vec<Value>>) -> Self {
        VecIter {
            items,
            index: Cell::new(0),
        }
    }
}

impl fmt::Debug for VecIter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "VecIter(index={})", self.index.get())
    }
}

impl NativeIterator for VecIter {
    fn type_name(&self) -> &'static str {
        "VecIter"
    }

    fn trace(&self, marker: &mut Marker) {
        marker.value(&Value::Vec(self.items.clone()));
    }

    fn next(&self, _interp: &mut Interpreter) -> EvalResult {
        let index = self.index.get();
        let item = self.items.borrow().get(index).cloned();
        match item {
            Some(value) => {
                self.index.set(index + 1);
                Ok(value)
            }
            None => Ok(Value::Sentinel),
        }
    }
}

#[derive(Debug)]
pub struct RangeIter {
    current: Cell<i64>,
    end: i64,
}

impl RangeIter {
    pub fn new(start: i64, end: i64) -> Self {
        RangeIter {
            current: Cell::new(start),
            end,
        }
    }
}

impl NativeIterator for RangeIter {
    fn type_name(&self) -> &'static str {
        "RangeIter"
    }

    #[expect(clippy::cast_precision_loss, reason = "range bounds come from f64")]
    fn next(&self, _interp: &mut Interpreter) -> EvalResult {
        let current = self.current.get();
        if current >= self.end {
            return Ok(Value::Sentinel);
        }
        self.current.set(current + 1);
        Ok(Value::Number(current as f64))
    }
}

/// Yields one-character strings.
#[derive(Debug)]
pub struct StrIter {
    text: Rc<str>,
    offset: Cell<usize>,
}

impl StrIter {
    pub fn new(text: Rc<str>) -> Self {
        StrIter {
            text,
            offset: Cell::new(0),
        }
    }
}

impl NativeIterator for StrIter {
    fn type_name(&self) -> &'static str {
        "StrIter"
    }

    fn next(&self, _interp: &mut Interpreter) -> EvalResult {
        let offset = self.offset.get();
        match self.text[offset..].chars().next() {
            Some(c) => {
                self.offset.set(offset + c.len_utf8());
                let mut buf = [0u8; 4];
                Ok(Value::string(c.encode_utf8(&mut buf)))
            }
            None => Ok(Value::Sentinel),
        }
    }
}

/// Lazy `map(f)`.
pub struct MapIter {
    inner: Value,
    transform: Value,
    done: Cell<bool>,
}

impl MapIter {
    pub fn new(inner: Value, transform: Value) -> Self {
        MapIter {
            inner,
            transform,
            done: Cell::new(false),
        }
    }
}

impl fmt::Debug for MapIter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MapIter")
            .field("inner", &self.inner)
            .field("done", &self.done.get())
            .finish_non_exhaustive()
    }
}

impl NativeIterator for MapIter {
    fn type_name(&self) -> &'static str {
        "Map"
    }

    fn trace(&self, marker: &mut Marker) {
        marker.value(&self.inner);
        marker.value(&self.transform);
    }

    fn next(&self, interp: &mut Interpreter) -> EvalResult {
        if self.done.get() {
            return Ok(Value::Sentinel);
        }
        let item = interp.iter_next(&self.inner)?;
        if item.is_sentinel() {
            self.done.set(true);
            return Ok(Value::Sentinel);
        }
        interp.call_value(&self.transform, &[item])
    }
}

/// Lazy `filter(pred)`.
pub struct FilterIter {
    inner: Value,
    predicate: Value,
    done: Cell<bool>,
}

impl FilterIter {
    pub fn new(inner: Value, predicate: Value) -> Self {
        FilterIter {
            inner,
            predicate,
            done: Cell::new(false),
        }
    }
}

impl fmt::Debug for FilterIter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FilterIter")
            .field("inner", &self.inner)
            .field("done", &self.done.get())
            .finish_non_exhaustive()
    }
}

impl NativeIterator for FilterIter {
    fn type_name(&self) -> &'static str {
        "Filter"
    }

    fn trace(&self, marker: &mut Marker) {
        marker.value(&self.inner);
        marker.value(&self.predicate);
    }

    fn next(&self, interp: &mut Interpreter) -> EvalResult {
        while !self.done.get() {
            let item = interp.iter_next(&self.inner)?;
            if item.is_sentinel() {
                self.done.set(true);
                break;
            }
            if interp
                .call_value(&self.predicate, std::slice::from_ref(&item))?
                .is_truthy()
            {
                return Ok(item);
            }
        }
        Ok(Value::Sentinel)
    }
}
