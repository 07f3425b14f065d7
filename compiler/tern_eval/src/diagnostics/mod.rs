//! Live call stack.
//!
//! Every active call owns one `CallFrame`, and the bottom frame is the
//! top-level script. The current line of each frame is updated as
//! statements and calls run, so a snapshot taken when an error escapes
//! gives one accurate traceback line per active frame.

use tern_ir::{Name, StringLookup};

use crate::errors::{stack_overflow, BacktraceFrame, EvalBacktrace, EvalError, FrameKind};

/// Default limit on nested calls.
pub const DEFAULT_MAX_DEPTH: usize = 1000;

#[derive(Clone, Debug)]
pub struct CallFrame {
    /// Function or method name; `script` for the top level.
    pub name: Name,
    pub kind: FrameKind,
    /// Line currently executing in this frame.
    pub line: u32,
}

impl CallFrame {
    pub fn script(name: Name) -> Self {
        CallFrame {
            name,
            kind: FrameKind::Script,
            line: 1,
        }
    }

    pub fn function(name: Name, line: u32) -> Self {
        CallFrame {
            name,
            kind: FrameKind::Function,
            line,
        }
    }
}

/// Stack of active call frames with a depth limit.
///
/// The script frame counts toward the limit.
#[derive(Clone, Debug)]
pub struct CallStack {
    frames: Vec<CallFrame>,
    max_depth: usize,
}

impl CallStack {
    pub fn new(max_depth: usize) -> Self {
        Self {
            frames: Vec::new(),
            max_depth,
        }
    }

    /// Push a call frame, checking the depth limit.
    ///
    /// The frame is not pushed on overflow.
    pub fn push(&mut self, frame: CallFrame) -> Result<(), EvalError> {
        if self.frames.len() >= self.max_depth {
            return Err(stack_overflow());
        }
        tracing::trace!(depth = self.frames.len() + 1, "push frame");
        self.frames.push(frame);
        Ok(())
    }

    pub fn pop(&mut self) {
        debug_assert!(
            !self.frames.is_empty(),
            "CallStack::pop() called on empty stack"
        );
        self.frames.pop();
        tracing::trace!(depth = self.frames.len(), "pop frame");
    }

    /// Record the line now executing in the innermost frame.
    #[inline]
    pub fn set_line(&mut self, line: u32) {
        if let Some(frame) = self.frames.last_mut() {
            frame.line = line;
        }
    }

    #[inline]
    pub fn depth(&self) -> usize {
        self.frames.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    /// Snapshot the active frames, innermost first.
    pub fn capture(&self, names: &impl StringLookup) -> EvalBacktrace {
        let frames = self
            .frames
            .iter()
            .rev()
            .map(|f| BacktraceFrame {
                name: names.lookup(f.name).to_string(),
                line: f.line,
                kind: f.kind,
            })
            .collect();
        EvalBacktrace::new(frames)
    }

    /// Attach a snapshot to `err` unless it already carries one.
    pub fn attach_backtrace(&self, err: EvalError, names: &impl StringLookup) -> EvalError {
        if err.has_backtrace() || self.frames.is_empty() {
            return err;
        }
        err.with_backtrace(self.capture(names))
    }
}

impl Default for CallStack {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_DEPTH)
    }
}

#[cfg(test)]
mod tests;
