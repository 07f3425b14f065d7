//! Tern CLI
//!
//! `tern` starts a REPL; `tern run <file>` runs a script.

use std::process::exit;

use ternc::{init_tracing, lex_file, parse_file, repl, run_file, ExitStatus, RunOptions};

fn print_usage() {
    eprintln!("Usage:");
    eprintln!("  tern                              Start the REPL");
    eprintln!("  tern run <file> [--max-depth=N]   Run a script");
    eprintln!("  tern lex <file>                   Dump the token stream");
    eprintln!("  tern parse <file>                 Dump the syntax tree");
}

fn usage_error(msg: &str) -> ExitStatus {
    eprintln!("error: {msg}");
    print_usage();
    ExitStatus::Usage
}

fn parse_run_args(args: &[String]) -> Result<(String, RunOptions), String> {
    let mut options = RunOptions::default();
    let mut path = None;
    for arg in args {
        if let Some(depth) = arg.strip_prefix("--max-depth=") {
            options.max_call_depth = depth
                .parse()
                .map_err(|_| format!("invalid --max-depth value '{depth}'"))?;
        } else if arg.starts_with('-') {
            return Err(format!("unknown option '{arg}'"));
        } else if path.is_none() {
            path = Some(arg.clone());
        } else {
            return Err(format!("unexpected argument '{arg}'"));
        }
    }
    let path = path.ok_or_else(|| "missing file path".to_string())?;
    Ok((path, options))
}

fn main() {
    init_tracing();
    let args: Vec<String> = std::env::args().skip(1).collect();

    let status = match args.first().map(String::as_str) {
        None => {
            let stdin = std::io::stdin();
            let mut input = stdin.lock();
            let mut output = std::io::stdout();
            repl(
                &RunOptions::default(),
                &mut input,
                &mut output,
                tern_eval::stdout_handler(),
            )
        }
        Some("run") => match parse_run_args(&args[1..]) {
            Ok((path, options)) => run_file(&path, &options),
            Err(msg) => usage_error(&msg),
        },
        Some("lex") => match args.get(1) {
            Some(path) => lex_file(path, &mut std::io::stdout()),
            None => usage_error("missing file path"),
        },
        Some("parse") => match args.get(1) {
            Some(path) => parse_file(path, &mut std::io::stdout()),
            None => usage_error("missing file path"),
        },
        Some("help" | "--help" | "-h") => {
            print_usage();
            ExitStatus::Success
        }
        Some(other) => usage_error(&format!("unknown command '{other}'")),
    };

    exit(status.code());
}
