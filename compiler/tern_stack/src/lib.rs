//! Native stack growth for deep recursion.
//!
//! The parser recurses once per nesting level and the interpreter recurses
//! once per expression and per script-level call. Script call depth is
//! bounded by the interpreter's configured maximum, but a few hundred
//! nested calls, each several Rust frames deep, can still exhaust an 8MB
//! main-thread stack. Wrapping the recursive entry points in
//! [`ensure_sufficient_stack`] moves execution onto a freshly allocated
//! segment whenever less than [`RED_ZONE`] bytes remain.
//!
//! On `wasm32` the call is a plain passthrough.

/// Grow when less than this much stack is left (128KB).
pub const RED_ZONE: usize = 128 * 1024;

/// Size of each newly allocated stack segment (1MB).
pub const SEGMENT_SIZE: usize = 1024 * 1024;

/// Run `f`, first switching to a new stack segment if the current one is
/// nearly exhausted.
#[inline]
#[cfg(not(target_arch = "wasm32"))]
pub fn ensure_sufficient_stack<R>(f: impl FnOnce() -> R) -> R {
    stacker::maybe_grow(RED_ZONE, SEGMENT_SIZE, f)
}

#[inline]
#[cfg(target_arch = "wasm32")]
pub fn ensure_sufficient_stack<R>(f: impl FnOnce() -> R) -> R {
    f()
}
