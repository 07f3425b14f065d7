//! `tern run` and the REPL.

use std::io::{BufRead, Write};

use tern_eval::{stdout_handler, Interpreter, InterpreterBuilder, SharedPrintHandler};
use tern_ir::SharedInterner;

use super::{front_end, read_file, ExitStatus, RunOptions};

fn interpreter(
    interner: SharedInterner,
    options: &RunOptions,
    print_handler: SharedPrintHandler,
) -> Interpreter {
    InterpreterBuilder::new(interner)
        .max_call_depth(options.max_call_depth)
        .print_handler(print_handler)
        .build()
}

/// Run a complete program.
///
/// `print` output goes to `print_handler`; parse errors and runtime errors
/// (with traceback) go to `errors`. Nothing runs if the program does not
/// parse.
pub fn run_source(
    source: &str,
    options: &RunOptions,
    print_handler: SharedPrintHandler,
    errors: &mut impl Write,
) -> ExitStatus {
    let interner = SharedInterner::new();
    let Some(stmts) = front_end(source, &interner, errors) else {
        return ExitStatus::CompileError;
    };

    let mut interp = interpreter(interner, options, print_handler);
    match interp.run(&stmts) {
        Ok(()) => ExitStatus::Success,
        Err(err) => {
            tracing::debug!(category = %err.category(), "script failed");
            let _ = writeln!(errors, "{err}");
            ExitStatus::RuntimeError
        }
    }
}

/// `tern run <file>`
pub fn run_file(path: &str, options: &RunOptions) -> ExitStatus {
    let mut stderr = std::io::stderr().lock();
    let source = match read_file(path) {
        Ok(source) => source,
        Err(msg) => {
            let _ = writeln!(stderr, "{msg}");
            return ExitStatus::IoError;
        }
    };
    run_source(&source, options, stdout_handler(), &mut stderr)
}

/// Interactive loop over `input`.
///
/// Every line runs in the same interpreter, so definitions persist. Errors
/// are reported and the loop continues. Returns at end of input.
pub fn repl(
    options: &RunOptions,
    input: &mut impl BufRead,
    output: &mut impl Write,
    print_handler: SharedPrintHandler,
) -> ExitStatus {
    let interner = SharedInterner::new();
    let mut interp = interpreter(interner.clone(), options, print_handler);
    let mut line = String::new();

    loop {
        let _ = write!(output, "> ");
        let _ = output.flush();

        line.clear();
        match input.read_line(&mut line) {
            Ok(0) => {
                let _ = writeln!(output);
                return ExitStatus::Success;
            }
            Ok(_) => {}
            Err(e) => {
                let _ = writeln!(output, "error reading input: {e}");
                return ExitStatus::IoError;
            }
        }

        let Some(stmts) = front_end(&line, &interner, output) else {
            continue;
        };
        if let Err(err) = interp.run(&stmts) {
            let _ = writeln!(output, "{err}");
        }
    }
}
