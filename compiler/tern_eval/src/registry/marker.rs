//! Reachability marking for [`ObjectRegistry::collect`](super::ObjectRegistry::collect).
//!
//! The walk uses explicit work lists, so long chains of objects do not
//! recurse on the native stack.

use std::rc::Rc;

use rustc_hash::FxHashSet;

use crate::object::{Class, Method};
use crate::{Environment, Value};

/// Accumulates every object reachable from the roots it was given.
#[derive(Default)]
pub struct Marker {
    reached: FxHashSet<*const ()>,
    values: Vec<Value>,
    envs: Vec<Environment>,
}

impl Marker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue `value` and everything it references.
    pub fn value(&mut self, value: &Value) {
        self.values.push(value.clone());
    }

    /// Queue `env`, its bindings and its parents.
    pub fn env(&mut self, env: &Environment) {
        self.envs.push(env.clone());
    }

    pub(crate) fn is_reached(&self, ptr: *const ()) -> bool {
        self.reached.contains(&ptr)
    }

    /// First visit of `ptr`?
    fn reach(&mut self, ptr: *const ()) -> bool {
        self.reached.insert(ptr)
    }

    /// Number of distinct objects reached so far.
    pub fn len(&self) -> usize {
        self.reached.len()
    }

    pub fn is_empty(&self) -> bool {
        self.reached.is_empty()
    }

    /// Process queued roots until nothing new is found.
    pub fn mark(&mut self) {
        loop {
            if let Some(env) = self.envs.pop() {
                if self.reach(env.as_ptr()) {
                    env.trace(self);
                }
                continue;
            }
            let Some(value) = self.values.pop() else {
                break;
            };
            self.visit(&value);
        }
    }

    fn visit(&mut self, value: &Value) {
        match value {
            Value::Nil
            | Value::Bool(_)
            | Value::Number(_)
            | Value::Str(_)
            | Value::Range(_)
            | Value::Native(_)
            | Value::Sentinel => {}
            Value::Vec(items) => {
                if self.reach(items.as_ptr().cast()) {
                    self.values.extend(items.borrow().iter().cloned());
                }
            }
            Value::Closure(closure) => self.envs.push(closure.env.clone()),
            Value::BoundMethod(bound) => {
                self.values.push(Value::Instance(Rc::clone(&bound.receiver)));
                self.envs.push(bound.method.env.clone());
            }
            Value::BoundBuiltin(bound) => self.values.push(bound.receiver.clone()),
            Value::Class(class) => self.class(class),
            Value::Instance(instance) => {
                if self.reach(Rc::as_ptr(instance).cast()) {
                    self.class(&instance.class);
                    instance.trace(self);
                }
            }
            Value::Iterator(iterator) => {
                if self.reach(Rc::as_ptr(iterator).cast()) {
                    iterator.trace(self);
                }
            }
        }
    }

    fn class(&mut self, class: &Rc<Class>) {
        if !self.reach(Rc::as_ptr(class).cast()) {
            return;
        }
        for method in class.methods.values() {
            if let Method::Closure(closure) = method {
                self.envs.push(closure.env.clone());
            }
        }
        if let Some(superclass) = &class.superclass {
            self.values.push(Value::Class(Rc::clone(superclass)));
        }
    }
}
