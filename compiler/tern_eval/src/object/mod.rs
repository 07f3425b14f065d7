//! Closures, classes, instances and bound methods.
//!
//! Methods are resolved with [`find_method`], which checks the class's own
//! table and then walks the superclass chain. Ordinary dispatch and `super`
//! dispatch differ only in the class they start from.

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use rustc_hash::FxHashMap;
use tern_ir::{FunctionDecl, Name};

use crate::builtins::BuiltinMethod;
use crate::registry::Marker;
use crate::{Environment, Value};

/// A function declaration paired with the environment it was created in.
pub struct Closure {
    pub decl: Rc<FunctionDecl>,
    pub env: Environment,
}

impl Closure {
    #[inline]
    pub fn arity(&self) -> usize {
        self.decl.arity()
    }
}

impl fmt::Debug for Closure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Closure")
            .field("name", &self.decl.name)
            .field("arity", &self.arity())
            .finish_non_exhaustive()
    }
}

/// Entry in a class's method table.
#[derive(Clone, Debug)]
pub enum Method {
    Closure(Rc<Closure>),
    /// Provided by the runtime (e.g. the `Iter` base class).
    Builtin(BuiltinMethod),
}

/// A class: name, optional superclass, method table.
///
/// Classes are immutable once declared.
pub struct Class {
    pub name: Name,
    pub superclass: Option<Rc<Class>>,
    pub methods: FxHashMap<Name, Method>,
}

impl Class {
    /// Whether `self` is `other` or inherits from it.
    pub fn is_subclass_of(&self, other: &Rc<Class>) -> bool {
        let mut current = Some(self);
        while let Some(class) = current {
            if std::ptr::eq(class, Rc::as_ptr(other)) {
                return true;
            }
            current = class.superclass.as_deref();
        }
        false
    }
}

impl fmt::Debug for Class {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Class")
            .field("name", &self.name)
            .field("superclass", &self.superclass.as_ref().map(|s| s.name))
            .field("methods", &self.methods.len())
            .finish()
    }
}

/// Look up `name` starting at `class` and walking up the superclass chain.
pub fn find_method(class: &Rc<Class>, name: Name) -> Option<Method> {
    let mut current = Some(class);
    while let Some(cls) = current {
        if let Some(method) = cls.methods.get(&name) {
            return Some(method.clone());
        }
        current = cls.superclass.as_ref();
    }
    None
}

/// An object of a user class. Fields are per instance and always writable.
pub struct Instance {
    pub class: Rc<Class>,
    fields: RefCell<FxHashMap<Name, Value>>,
}

impl Instance {
    pub fn field(&self, name: Name) -> Option<Value> {
        self.fields.borrow().get(&name).cloned()
    }

    pub fn set_field(&self, name: Name, value: Value) {
        // Drop the previous value after releasing the borrow.
        let _old = self.fields.borrow_mut().insert(name, value);
    }

    pub fn field_count(&self) -> usize {
        self.fields.borrow().len()
    }

    pub(crate) fn trace(&self, marker: &mut Marker) {
        for value in self.fields.borrow().values() {
            marker.value(value);
        }
    }

    pub(crate) fn clear_fields(&self) {
        let _fields = std::mem::take(&mut *self.fields.borrow_mut());
    }
}

impl fmt::Debug for Instance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Instance")
            .field("class", &self.class.name)
            .field("fields", &self.field_count())
            .finish()
    }
}

/// A method closure bound to a receiver.
///
/// A `super` inside the method resolves through the `super` binding in the
/// closure's environment, so the bound method carries no search class.
pub struct BoundMethod {
    pub receiver: Rc<Instance>,
    pub method: Rc<Closure>,
}

impl fmt::Debug for BoundMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BoundMethod")
            .field("method", &self.method.decl.name)
            .field("receiver", &self.receiver.class.name)
            .finish()
    }
}

pub fn make_closure(decl: Rc<FunctionDecl>, env: Environment) -> Rc<Closure> {
    Rc::new(Closure { decl, env })
}

pub fn make_class(
    name: Name,
    superclass: Option<Rc<Class>>,
    methods: FxHashMap<Name, Method>,
) -> Rc<Class> {
    Rc::new(Class {
        name,
        superclass,
        methods,
    })
}

/// Allocate an instance with no fields.
pub fn make_instance(class: Rc<Class>) -> Rc<Instance> {
    Rc::new(Instance {
        class,
        fields: RefCell::new(FxHashMap::default()),
    })
}
