//! Calling values.

use std::rc::Rc;

use super::{ControlSignal, Interpreter};
use crate::diagnostics::CallFrame;
use crate::errors::{arity_mismatch, not_callable};
use crate::object::{find_method, make_instance, Class, Closure, Instance, Method};
use crate::{EvalResult, Value};

impl Interpreter {
    /// Call `callee` with already-evaluated arguments.
    pub fn call_value(&mut self, callee: &Value, args: &[Value]) -> EvalResult {
        match callee {
            Value::Closure(closure) => self.call_closure(closure, None, args),
            Value::BoundMethod(bound) => {
                self.call_closure(&bound.method, Some(&bound.receiver), args)
            }
            Value::Class(class) => self.construct(class, args),
            Value::Native(native) => {
                if args.len() != native.arity {
                    return Err(arity_mismatch(native.arity, args.len()));
                }
                (native.func)(self, args)
            }
            Value::BoundBuiltin(bound) => {
                let arity = bound.method.arity();
                if args.len() != arity {
                    return Err(arity_mismatch(arity, args.len()));
                }
                self.call_builtin(&bound.receiver, bound.method, args)
            }
            _ => Err(not_callable()),
        }
    }

    /// Run a closure's body in a fresh child of its captured environment.
    ///
    /// Arity is checked before anything else, so a mismatch never pushes a
    /// frame or runs the body. An error leaving the body gets the traceback
    /// of the stack as it was when the error was raised.
    #[tracing::instrument(level = "debug", skip_all)]
    pub fn call_closure(
        &mut self,
        closure: &Rc<Closure>,
        receiver: Option<&Rc<Instance>>,
        args: &[Value],
    ) -> EvalResult {
        let decl = &closure.decl;
        if args.len() != decl.arity() {
            return Err(arity_mismatch(decl.arity(), args.len()));
        }

        let env = closure.env.child();
        self.registry.track_env(&env);
        if let Some(receiver) = receiver {
            env.define(self.protocol.self_, Value::Instance(Rc::clone(receiver)));
        }
        for (param, arg) in decl.params.iter().zip(args) {
            env.define(*param, arg.clone());
        }

        tern_stack::ensure_sufficient_stack(|| {
            let mut call = self.enter_call(CallFrame::function(decl.name, decl.line), env)?;
            match call.execute_stmts(&decl.body) {
                Ok(ControlSignal::Return(value)) => Ok(value),
                Ok(ControlSignal::Normal) => Ok(Value::Nil),
                Err(err) => Err(call.call_stack.attach_backtrace(err, &call.interner)),
            }
        })
    }

    /// Allocate an instance and run `__init__` on it, if the class has one.
    pub fn construct(&mut self, class: &Rc<Class>, args: &[Value]) -> EvalResult {
        let instance = make_instance(Rc::clone(class));
        self.registry.track_instance(&instance);
        tracing::debug!(class = self.interner.lookup(class.name), "construct");

        match find_method(class, self.protocol.init) {
            Some(Method::Closure(init)) => {
                self.call_closure(&init, Some(&instance), args)?;
            }
            Some(Method::Builtin(_)) | None => {
                if !args.is_empty() {
                    return Err(arity_mismatch(0, args.len()));
                }
            }
        }
        Ok(Value::Instance(instance))
    }
}
