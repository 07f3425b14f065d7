//! Tern Eval - object/closure runtime and interpreter for Tern.
//!
//! # Architecture
//!
//! - `Environment`: lexical scope chain of shared, mutable binding cells
//! - `object`: closures, classes with single inheritance, instances and
//!   bound methods; `find_method` is the one method resolution algorithm
//! - `iterator`: native iterators and the lazy `map`/`filter` adapters
//! - `Interpreter`: tree-walking evaluation with a live call stack that
//!   produces tracebacks on error
//! - `ObjectRegistry`: weak index of allocated objects; unreachable cycles
//!   are emptied between top-level statements and at interpreter drop
//!
//! Everything here is single-threaded (`Rc`/`RefCell`).

mod builtins;
mod diagnostics;
mod environment;
pub mod errors;
pub mod interpreter;
pub mod iterator;
pub mod object;
mod operators;
mod print_handler;
mod registry;
mod shared;
mod value;

pub use builtins::BuiltinMethod;
pub use diagnostics::{CallFrame, CallStack, DEFAULT_MAX_DEPTH};
pub use environment::{AssignError, Environment, ValueCell};
pub use errors::{
    BacktraceFrame, ErrorCategory, EvalBacktrace, EvalError, EvalErrorKind, EvalResult, FrameKind,
};
pub use interpreter::{ControlSignal, ExecResult, Interpreter, InterpreterBuilder};
pub use object::{find_method, make_class, make_closure, make_instance};
pub use operators::{evaluate_binary, evaluate_unary};
pub use print_handler::{
    buffer_handler, silent_handler, stdout_handler, BufferPrintHandler, PrintHandlerImpl,
    SharedPrintHandler, StdoutPrintHandler,
};
pub use registry::{LiveObjects, Marker, ObjectRegistry};
pub use shared::Shared;
pub use value::{BoundBuiltin, NativeFn, NativeFunction, RangeValue, Value};

#[cfg(test)]
mod tests;
