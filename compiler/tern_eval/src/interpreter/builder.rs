//! `InterpreterBuilder` for creating `Interpreter` instances.

use rustc_hash::FxHashMap;
use tern_ir::SharedInterner;

use super::{BuiltinNames, Interpreter, ProtocolNames};
use crate::builtins::{BuiltinMethod, PRINT};
use crate::diagnostics::{CallStack, DEFAULT_MAX_DEPTH};
use crate::object::{make_class, Method};
use crate::print_handler::{stdout_handler, SharedPrintHandler};
use crate::registry::ObjectRegistry;
use crate::{Environment, Value};

pub struct InterpreterBuilder {
    interner: SharedInterner,
    env: Option<Environment>,
    print_handler: Option<SharedPrintHandler>,
    max_call_depth: usize,
}

impl InterpreterBuilder {
    pub fn new(interner: SharedInterner) -> Self {
        Self {
            interner,
            env: None,
            print_handler: None,
            max_call_depth: DEFAULT_MAX_DEPTH,
        }
    }

    /// Limit on nested calls, the top-level script frame included.
    #[must_use]
    pub fn max_call_depth(mut self, depth: usize) -> Self {
        self.max_call_depth = depth;
        self
    }

    /// Where `print` writes. Defaults to stdout.
    #[must_use]
    pub fn print_handler(mut self, handler: SharedPrintHandler) -> Self {
        self.print_handler = Some(handler);
        self
    }

    /// Use `env` as the global environment instead of a fresh one.
    ///
    /// The built-in globals are defined into it.
    #[must_use]
    pub fn env(mut self, env: Environment) -> Self {
        self.env = Some(env);
        self
    }

    pub fn build(self) -> Interpreter {
        let protocol = ProtocolNames::new(&self.interner);
        let builtin_names = BuiltinNames::new(&self.interner);
        let globals = self.env.unwrap_or_else(Environment::global);

        let iter_methods: FxHashMap<_, _> = [
            (builtin_names.map, Method::Builtin(BuiltinMethod::Map)),
            (builtin_names.filter, Method::Builtin(BuiltinMethod::Filter)),
            (builtin_names.collect, Method::Builtin(BuiltinMethod::Collect)),
        ]
        .into_iter()
        .collect();
        let iter_class = make_class(builtin_names.iter_class, None, iter_methods);

        globals.define(builtin_names.print, Value::Native(PRINT));
        globals.define(builtin_names.sentinel, Value::Sentinel);
        globals.define(builtin_names.iter_class, Value::Class(iter_class));

        let mut registry = ObjectRegistry::new();
        registry.track_env(&globals);

        tracing::debug!(max_call_depth = self.max_call_depth, "interpreter built");

        Interpreter {
            interner: self.interner,
            env: globals.clone(),
            globals,
            protocol,
            builtin_names,
            call_stack: CallStack::new(self.max_call_depth),
            print_handler: self.print_handler.unwrap_or_else(stdout_handler),
            registry,
            loop_roots: Vec::new(),
        }
    }
}
