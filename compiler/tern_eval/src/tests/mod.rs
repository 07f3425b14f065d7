//! Script-level tests: source text is lexed, parsed and run with output
//! captured in a buffer.

mod iterator_tests;
mod operators_tests;
mod string_tests;
mod traceback_tests;

use tern_ir::SharedInterner;

use crate::{buffer_handler, EvalError, InterpreterBuilder};

pub(crate) struct ScriptRun {
    pub(crate) output: String,
    pub(crate) error: Option<EvalError>,
}

impl ScriptRun {
    /// The rendered error, traceback included.
    pub(crate) fn error_text(&self) -> Option<String> {
        self.error.as_ref().map(ToString::to_string)
    }
}

pub(crate) fn run_with(
    source: &str,
    builder: impl FnOnce(InterpreterBuilder) -> InterpreterBuilder,
) -> ScriptRun {
    let interner = SharedInterner::new();
    let tokens = tern_lexer::lex(source, &interner);
    let parsed = tern_parse::parse(&tokens, source, &interner);
    assert!(!parsed.has_errors(), "parse errors: {:?}", parsed.errors);

    let handler = buffer_handler();
    let mut interp = builder(InterpreterBuilder::new(interner))
        .print_handler(handler.clone())
        .build();
    let error = interp.run(&parsed.stmts).err();
    ScriptRun {
        output: handler.get_output(),
        error,
    }
}

pub(crate) fn run_script(source: &str) -> ScriptRun {
    run_with(source, |builder| builder)
}

/// Run a script that must succeed and return what it printed.
pub(crate) fn output_of(source: &str) -> String {
    let run = run_script(source);
    if let Some(err) = run.error {
        panic!("script failed: {err}\noutput so far:\n{}", run.output);
    }
    run.output
}
