//! RAII guards for the current environment and the call stack.
//!
//! [`ScopedInterpreter`] switches `Interpreter::env` to a given scope and
//! restores the previous one on drop. [`CallGuard`] does the same and also
//! owns one call frame, popping it on drop. Both deref to the interpreter,
//! so code running inside the scope uses them like the interpreter itself.
//! Cleanup happens on every exit path, `?` and unwinding included.

use std::ops::{Deref, DerefMut};

use super::Interpreter;
use crate::diagnostics::CallFrame;
use crate::{Environment, EvalError};

pub struct ScopedInterpreter<'a> {
    interpreter: &'a mut Interpreter,
    saved: Option<Environment>,
}

impl Drop for ScopedInterpreter<'_> {
    fn drop(&mut self) {
        if let Some(env) = self.saved.take() {
            self.interpreter.env = env;
        }
    }
}

impl Deref for ScopedInterpreter<'_> {
    type Target = Interpreter;

    fn deref(&self) -> &Self::Target {
        self.interpreter
    }
}

impl DerefMut for ScopedInterpreter<'_> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        self.interpreter
    }
}

/// An active call: one pushed frame plus the callee's environment.
pub struct CallGuard<'a> {
    scope: ScopedInterpreter<'a>,
}

impl Drop for CallGuard<'_> {
    fn drop(&mut self) {
        self.scope.call_stack.pop();
    }
}

impl Deref for CallGuard<'_> {
    type Target = Interpreter;

    fn deref(&self) -> &Self::Target {
        &self.scope
    }
}

impl DerefMut for CallGuard<'_> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.scope
    }
}

impl Interpreter {
    /// Make `env` current until the returned guard is dropped.
    pub fn scoped(&mut self, env: Environment) -> ScopedInterpreter<'_> {
        let saved = std::mem::replace(&mut self.env, env);
        ScopedInterpreter {
            interpreter: self,
            saved: Some(saved),
        }
    }

    /// Run `f` with `env` as the current environment.
    pub fn with_env<T, F>(&mut self, env: Environment, f: F) -> T
    where
        F: FnOnce(&mut Interpreter) -> T,
    {
        let mut scoped = self.scoped(env);
        f(&mut *scoped)
    }

    /// Push `frame` and make `env` current.
    ///
    /// Fails without changing anything when the call depth limit is hit.
    pub fn enter_call(
        &mut self,
        frame: CallFrame,
        env: Environment,
    ) -> Result<CallGuard<'_>, EvalError> {
        self.call_stack.push(frame)?;
        Ok(CallGuard {
            scope: self.scoped(env),
        })
    }
}

#[cfg(test)]
mod tests;
