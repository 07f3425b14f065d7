//! Lexical environment chain.
//!
//! An `Environment` is a handle to one scope; scopes link outward to their
//! parent and the global scope has none. Closures capture the handle, not
//! a copy, so an assignment made through any handle is visible to every
//! closure sharing that scope.
//!
//! Each binding lives in its own [`ValueCell`]. `resolve` hands out the
//! cell itself; `assign` writes through it in place.

use std::cell::RefCell;
use std::fmt;
use std::rc::Weak;

use rustc_hash::FxHashMap;
use tern_ir::Name;

use crate::registry::Marker;
use crate::shared::Shared;
use crate::Value;

/// A mutable binding slot.
pub type ValueCell = Shared<Value>;

/// Error returned by [`Environment::assign`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AssignError {
    /// No enclosing scope defines the name.
    Undefined,
}

/// A single scope containing variable bindings.
#[derive(Default)]
pub struct Scope {
    bindings: FxHashMap<Name, ValueCell>,
    parent: Option<Environment>,
}

/// Handle to a scope in the environment chain.
#[derive(Clone)]
pub struct Environment(Shared<Scope>);

impl Environment {
    /// Create a root (global) scope.
    pub fn global() -> Self {
        Environment(Shared::new(Scope::default()))
    }

    /// Create a fresh scope whose parent is `self`.
    #[must_use]
    pub fn child(&self) -> Self {
        Environment(Shared::new(Scope {
            bindings: FxHashMap::default(),
            parent: Some(self.clone()),
        }))
    }

    /// Create or overwrite `name` in this scope.
    ///
    /// Redefining an existing name writes into the existing cell.
    pub fn define(&self, name: Name, value: Value) {
        let mut scope = self.0.borrow_mut();
        if let Some(cell) = scope.bindings.get(&name) {
            *cell.borrow_mut() = value;
        } else {
            scope.bindings.insert(name, Shared::new(value));
        }
    }

    /// Find the cell bound to `name`, searching outward.
    pub fn resolve(&self, name: Name) -> Option<ValueCell> {
        let mut current = self.clone();
        loop {
            let next = {
                let scope = current.0.borrow();
                if let Some(cell) = scope.bindings.get(&name) {
                    return Some(cell.clone());
                }
                scope.parent.clone()
            };
            current = next?;
        }
    }

    /// Current value of `name`, searching outward.
    #[inline]
    pub fn lookup(&self, name: Name) -> Option<Value> {
        self.resolve(name).map(|cell| cell.get())
    }

    /// Overwrite the nearest existing binding of `name`.
    pub fn assign(&self, name: Name, value: Value) -> Result<(), AssignError> {
        let cell = self.resolve(name).ok_or(AssignError::Undefined)?;
        *cell.borrow_mut() = value;
        Ok(())
    }

    /// Number of scopes between this one and the root; the root is 0.
    pub fn depth(&self) -> usize {
        let mut depth = 0;
        let mut parent = self.0.borrow().parent.clone();
        while let Some(env) = parent {
            depth += 1;
            parent = env.0.borrow().parent.clone();
        }
        depth
    }

    /// Whether `name` is bound directly in this scope.
    pub fn defines(&self, name: Name) -> bool {
        self.0.borrow().bindings.contains_key(&name)
    }

    #[inline]
    pub fn ptr_eq(&self, other: &Environment) -> bool {
        self.0.ptr_eq(&other.0)
    }

    pub(crate) fn downgrade(&self) -> Weak<RefCell<Scope>> {
        self.0.downgrade()
    }

    pub(crate) fn as_ptr(&self) -> *const () {
        self.0.as_ptr().cast()
    }

    /// Queue the parent scope and every bound value.
    pub(crate) fn trace(&self, marker: &mut Marker) {
        let scope = self.0.borrow();
        if let Some(parent) = &scope.parent {
            marker.env(parent);
        }
        for cell in scope.bindings.values() {
            marker.value(&cell.borrow());
        }
    }
}

impl Scope {
    /// Drop every binding and the parent link.
    pub(crate) fn sever(&mut self) -> (FxHashMap<Name, ValueCell>, Option<Environment>) {
        (std::mem::take(&mut self.bindings), self.parent.take())
    }
}

impl fmt::Debug for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let bindings = self.0.borrow().bindings.len();
        write!(f, "Environment(depth={}, bindings={bindings})", self.depth())
    }
}
