//! Tern driver library.
//!
//! The `tern` binary is a thin argument parser over [`commands`]; everything
//! it does is also callable from here, with output routed through a print
//! handler and an error sink so tests can capture both.

pub mod commands;

use std::sync::Once;

pub use commands::{
    lex_file, parse_file, repl, run_file, run_source, ExitStatus, RunOptions,
};

static TRACING_INIT: Once = Once::new();

/// Install a tracing subscriber if `RUST_LOG` is set.
///
/// Events go to stderr so they never mix with script output. Safe to call
/// more than once.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{fmt, prelude::*, EnvFilter};

        if std::env::var("RUST_LOG").is_ok() {
            let filter = EnvFilter::from_default_env();
            tracing_subscriber::registry()
                .with(
                    fmt::layer()
                        .with_writer(std::io::stderr)
                        .with_target(true)
                        .with_level(true),
                )
                .with(filter)
                .init();
        }
    });
}
