//! Debug commands: `lex` and `parse` for inspecting the front end.

use std::io::Write;

use tern_ir::SharedInterner;

use super::{dump_program, read_file, ExitStatus};

/// Lex a file and print the token stream.
pub fn lex_file(path: &str, out: &mut impl Write) -> ExitStatus {
    let source = match read_file(path) {
        Ok(source) => source,
        Err(msg) => {
            eprintln!("{msg}");
            return ExitStatus::IoError;
        }
    };
    let interner = SharedInterner::new();
    let tokens = tern_lexer::lex(&source, &interner);

    let _ = writeln!(out, "Tokens for '{}' ({} tokens):", path, tokens.len());
    for tok in &tokens {
        let _ = writeln!(
            out,
            "  {:?} @ {} (line {}) '{}'",
            tok.kind,
            tok.span,
            tok.line,
            tok.span.slice(&source)
        );
    }
    ExitStatus::Success
}

/// Parse a file and print its syntax tree.
pub fn parse_file(path: &str, out: &mut impl Write) -> ExitStatus {
    let source = match read_file(path) {
        Ok(source) => source,
        Err(msg) => {
            eprintln!("{msg}");
            return ExitStatus::IoError;
        }
    };
    let interner = SharedInterner::new();
    let tokens = tern_lexer::lex(&source, &interner);
    let output = tern_parse::parse(&tokens, &source, &interner);

    let _ = write!(out, "{}", dump_program(&output.stmts, &interner));
    if output.has_errors() {
        let _ = writeln!(out);
        let _ = writeln!(out, "Errors:");
        for error in &output.errors {
            let _ = writeln!(out, "  {error}");
        }
        return ExitStatus::CompileError;
    }
    ExitStatus::Success
}
