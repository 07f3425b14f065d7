//! Grammar productions.
//!
//! - `stmt`: declarations and statements
//! - `expr`: expressions, by precedence level

mod expr;
mod stmt;

/// Upper bound on parameters, call arguments and vector literal elements.
pub(crate) const MAX_ARGS: usize = 255;
