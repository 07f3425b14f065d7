//! Property access, `super` and indexing.
//!
//! Reading a property of an instance checks its fields first and then its
//! class chain. A method found that way comes back bound to the instance,
//! so it can be stored and called later like any other value.

use std::rc::Rc;

use tern_ir::Name;

use super::Interpreter;
use crate::errors::{
    field_on_non_instance, property_on_non_instance, undefined_property,
    undefined_super_method, undefined_variable, EvalError,
};
use crate::object::{find_method, BoundMethod, Instance, Method};
use crate::value::BoundBuiltin;
use crate::{EvalResult, Value};

impl Interpreter {
    /// `object.name`
    pub fn get_attribute(&mut self, object: &Value, name: Name) -> EvalResult {
        match object {
            Value::Instance(instance) => {
                if let Some(value) = instance.field(name) {
                    return Ok(value);
                }
                match find_method(&instance.class, name) {
                    Some(method) => Ok(bind_method(instance, method)),
                    None => Err(undefined_property(self.interner.lookup(name))),
                }
            }
            Value::Vec(_) | Value::Range(_) | Value::Str(_) | Value::Iterator(_) => {
                match self.builtin_for(object, name) {
                    Some(method) => Ok(Value::BoundBuiltin(Rc::new(BoundBuiltin {
                        receiver: object.clone(),
                        method,
                    }))),
                    None => Err(undefined_property(self.interner.lookup(name))),
                }
            }
            _ => Err(property_on_non_instance()),
        }
    }

    /// `object.name = value`. Only instances have fields.
    pub fn set_attribute(
        &mut self,
        object: &Value,
        name: Name,
        value: Value,
    ) -> Result<(), EvalError> {
        match object {
            Value::Instance(instance) => {
                instance.set_field(name, value);
                Ok(())
            }
            _ => Err(field_on_non_instance()),
        }
    }

    /// `super.method`, bound to the current `self`.
    ///
    /// The search starts at the superclass captured when the enclosing class
    /// was declared.
    pub fn get_super(&mut self, method: Name) -> EvalResult {
        let Some(Value::Class(superclass)) = self.env.lookup(self.protocol.super_) else {
            return Err(undefined_variable("super"));
        };
        let Some(Value::Instance(receiver)) = self.env.lookup(self.protocol.self_) else {
            return Err(undefined_variable("self"));
        };
        match find_method(&superclass, method) {
            Some(found) => Ok(bind_method(&receiver, found)),
            None => Err(undefined_super_method(self.interner.lookup(method))),
        }
    }

    /// `object[index]`
    pub fn get_index(&mut self, object: &Value, index: Value) -> EvalResult {
        self.invoke_method(object, self.protocol.getitem, &[index])
    }

    /// `object[index] = value`
    pub fn set_index(&mut self, object: &Value, index: Value, value: Value) -> EvalResult {
        self.invoke_method(object, self.protocol.setitem, &[index, value])
    }

    /// Look up `name` on `receiver` and call it.
    pub fn invoke_method(&mut self, receiver: &Value, name: Name, args: &[Value]) -> EvalResult {
        let method = self.get_attribute(receiver, name)?;
        self.call_value(&method, args)
    }
}

fn bind_method(receiver: &Rc<Instance>, method: Method) -> Value {
    match method {
        Method::Closure(closure) => Value::BoundMethod(Rc::new(BoundMethod {
            receiver: Rc::clone(receiver),
            method: closure,
        })),
        Method::Builtin(builtin) => Value::BoundBuiltin(Rc::new(BoundBuiltin {
            receiver: Value::Instance(Rc::clone(receiver)),
            method: builtin,
        })),
    }
}
