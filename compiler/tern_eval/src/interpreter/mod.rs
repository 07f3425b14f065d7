//! Tree-walking interpreter.
//!
//! Statements and expressions are evaluated directly from the AST. The
//! interpreter owns the current environment, the call stack and the object
//! registry; helper modules add `impl Interpreter` blocks by concern:
//!
//! - `exec` - statements, blocks, class declarations
//! - `expr` - expressions
//! - `call` - calling closures, bound methods, classes and natives
//! - `attribute` - field/method access, `super`, indexing
//! - `iteration` - the `__iter__`/`__next__` protocol and `collect`

mod attribute;
mod builder;
mod call;
mod exec;
mod expr;
mod interned_names;
mod iteration;
mod scope_guard;

pub use builder::InterpreterBuilder;
pub(crate) use interned_names::{BuiltinNames, ProtocolNames};
pub use scope_guard::{CallGuard, ScopedInterpreter};

use tern_ir::{SharedInterner, Stmt};

use crate::diagnostics::{CallFrame, CallStack};
use crate::print_handler::SharedPrintHandler;
use crate::registry::{LiveObjects, Marker, ObjectRegistry};
use crate::{Environment, EvalError, Value};

/// How a statement finished.
#[derive(Clone, Debug, PartialEq)]
pub enum ControlSignal {
    Normal,
    Return(Value),
}

pub type ExecResult = Result<ControlSignal, EvalError>;

pub struct Interpreter {
    pub(crate) interner: SharedInterner,
    pub(crate) globals: Environment,
    /// Environment the next statement runs in.
    pub(crate) env: Environment,
    pub(crate) protocol: ProtocolNames,
    pub(crate) builtin_names: BuiltinNames,
    pub(crate) call_stack: CallStack,
    pub(crate) print_handler: SharedPrintHandler,
    pub(crate) registry: ObjectRegistry,
    /// Values held only by Rust locals of active top-level loops.
    pub(crate) loop_roots: Vec<Value>,
}

impl Interpreter {
    /// Interpreter with default settings, printing to stdout.
    pub fn new(interner: SharedInterner) -> Self {
        InterpreterBuilder::new(interner).build()
    }

    /// Run a whole program under a `script` frame.
    ///
    /// Execution stops at the first error, which carries the traceback of
    /// the frames active when it was raised.
    ///
    /// Unreachable objects are reclaimed between top-level statements and
    /// once more at the end. Roots are the globals and whatever the running
    /// program can still name; a `Value` kept by the embedder but not stored
    /// in the interpreter may be emptied.
    #[tracing::instrument(level = "debug", skip_all, fields(stmts = stmts.len()))]
    pub fn run(&mut self, stmts: &[Stmt]) -> Result<(), EvalError> {
        self.call_stack
            .push(CallFrame::script(self.builtin_names.script))?;
        let result = match self.execute_stmts(stmts) {
            Ok(_) => Ok(()),
            Err(err) => Err(self.call_stack.attach_backtrace(err, &self.interner)),
        };
        self.call_stack.pop();
        self.loop_roots.clear();
        if self.registry.allocated_since_collect() {
            self.collect_garbage();
        }
        result
    }

    /// Collect if enough has been allocated and it is safe to do so.
    ///
    /// Only top-level statement boundaries qualify: there, every live value
    /// is reachable from the current environment chain or `loop_roots`.
    /// Inside a call, evaluated arguments and callees sit in Rust locals.
    pub(crate) fn maybe_collect(&mut self) {
        if self.call_stack.depth() == 1 && self.registry.collection_due() {
            self.collect_garbage();
        }
    }

    fn collect_garbage(&mut self) {
        let mut marker = Marker::new();
        marker.env(&self.globals);
        marker.env(&self.env);
        for value in &self.loop_roots {
            marker.value(value);
        }
        marker.mark();
        self.registry.collect(&marker);
    }

    pub fn globals(&self) -> &Environment {
        &self.globals
    }

    pub fn interner(&self) -> &SharedInterner {
        &self.interner
    }

    pub fn print_handler(&self) -> &SharedPrintHandler {
        &self.print_handler
    }

    pub fn call_depth(&self) -> usize {
        self.call_stack.depth()
    }

    /// Tracked objects that are still alive.
    pub fn live_objects(&self) -> LiveObjects {
        self.registry.live()
    }
}

impl Drop for Interpreter {
    fn drop(&mut self) {
        self.registry.teardown();
    }
}

#[cfg(test)]
mod tests;
