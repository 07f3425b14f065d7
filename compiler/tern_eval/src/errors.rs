//! Runtime error types.
//!
//! `EvalErrorKind` carries the message; its category (`NameError`,
//! `TypeError`, ...) is derived from the variant. An `EvalError` picks up
//! its traceback when it first crosses a call-frame boundary.
//!
//! Factory functions below are the public way to build errors.

use std::fmt;

/// Result of evaluating an expression or calling a value.
pub type EvalResult = Result<crate::Value, EvalError>;

/// Error category, printed before the message.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ErrorCategory {
    NameError,
    AttributeError,
    ArityError,
    TypeError,
    IndexError,
    ValueError,
    RecursionError,
}

impl fmt::Display for ErrorCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ErrorCategory::NameError => "NameError",
            ErrorCategory::AttributeError => "AttributeError",
            ErrorCategory::ArityError => "ArityError",
            ErrorCategory::TypeError => "TypeError",
            ErrorCategory::IndexError => "IndexError",
            ErrorCategory::ValueError => "ValueError",
            ErrorCategory::RecursionError => "RecursionError",
        };
        f.write_str(name)
    }
}

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum EvalErrorKind {
    #[error("Undefined variable '{name}'.")]
    UndefinedVariable { name: String },
    #[error("Undefined property '{name}'.")]
    UndefinedProperty { name: String },
    #[error("Undefined superclass method '{name}'.")]
    UndefinedSuperMethod { name: String },
    #[error("Expected {expected} arguments but found {got}.")]
    ArityMismatch { expected: usize, got: usize },
    #[error("Can only call functions and classes.")]
    NotCallable,
    #[error("Only instances have fields.")]
    FieldOnNonInstance,
    #[error("Only instances have properties.")]
    PropertyOnNonInstance,
    #[error("Superclass must be a class.")]
    SuperclassNotClass,
    #[error("Binary operands must both be numbers.")]
    OperandsNotNumbers,
    #[error("Binary operands must be two numbers or two strings.")]
    OperandsNotAddable,
    #[error("Unary operand must be a number.")]
    OperandNotNumber,
    #[error("Cannot iterate over a value of type {type_name}.")]
    NotIterable { type_name: &'static str },
    #[error("Expected an integer but found '{found}'.")]
    NotAnInteger { found: String },
    #[error("Expected a string but found '{found}'.")]
    NotAString { found: String },
    #[error("Vec index out of bounds.")]
    IndexOutOfBounds,
    #[error("String index out of bounds.")]
    StringIndexOutOfBounds,
    #[error("Cannot {operation} an empty string.")]
    EmptyPattern { operation: &'static str },
    #[error("Unable to parse number from '{text}'.")]
    NotANumber { text: String },
    #[error("Cannot pop from empty Vec.")]
    PopFromEmpty,
    #[error("Stack overflow.")]
    StackOverflow,
}

impl EvalErrorKind {
    pub fn category(&self) -> ErrorCategory {
        match self {
            EvalErrorKind::UndefinedVariable { .. } => ErrorCategory::NameError,
            EvalErrorKind::UndefinedProperty { .. } | EvalErrorKind::UndefinedSuperMethod { .. } => {
                ErrorCategory::AttributeError
            }
            EvalErrorKind::ArityMismatch { .. } => ErrorCategory::ArityError,
            EvalErrorKind::NotCallable
            | EvalErrorKind::FieldOnNonInstance
            | EvalErrorKind::PropertyOnNonInstance
            | EvalErrorKind::SuperclassNotClass
            | EvalErrorKind::OperandsNotNumbers
            | EvalErrorKind::OperandsNotAddable
            | EvalErrorKind::OperandNotNumber
            | EvalErrorKind::NotIterable { .. }
            | EvalErrorKind::NotAnInteger { .. }
            | EvalErrorKind::NotAString { .. } => ErrorCategory::TypeError,
            EvalErrorKind::IndexOutOfBounds | EvalErrorKind::StringIndexOutOfBounds => {
                ErrorCategory::IndexError
            }
            EvalErrorKind::PopFromEmpty
            | EvalErrorKind::EmptyPattern { .. }
            | EvalErrorKind::NotANumber { .. } => ErrorCategory::ValueError,
            EvalErrorKind::StackOverflow => ErrorCategory::RecursionError,
        }
    }
}

/// Whether a traceback line names a function or the top-level script.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FrameKind {
    Script,
    Function,
}

/// One traceback line.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BacktraceFrame {
    pub name: String,
    pub line: u32,
    pub kind: FrameKind,
}

impl fmt::Display for BacktraceFrame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            FrameKind::Script => write!(f, "[line {}] in script", self.line),
            FrameKind::Function => write!(f, "[line {}] in {}()", self.line, self.name),
        }
    }
}

/// Snapshot of the call stack, innermost frame first.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct EvalBacktrace {
    frames: Vec<BacktraceFrame>,
}

impl EvalBacktrace {
    pub fn new(frames: Vec<BacktraceFrame>) -> Self {
        Self { frames }
    }

    pub fn frames(&self) -> &[BacktraceFrame] {
        &self.frames
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    pub fn len(&self) -> usize {
        self.frames.len()
    }
}

impl fmt::Display for EvalBacktrace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, frame) in self.frames.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, "{frame}")?;
        }
        Ok(())
    }
}

/// Runtime error.
///
/// Displays as `Category: message`, followed by one traceback line per
/// frame once a backtrace has been attached.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EvalError {
    pub kind: EvalErrorKind,
    pub backtrace: Option<EvalBacktrace>,
}

impl EvalError {
    pub fn new(kind: EvalErrorKind) -> Self {
        EvalError {
            kind,
            backtrace: None,
        }
    }

    pub fn category(&self) -> ErrorCategory {
        self.kind.category()
    }

    /// The message without category or traceback.
    pub fn message(&self) -> String {
        self.kind.to_string()
    }

    #[must_use]
    pub fn with_backtrace(mut self, backtrace: EvalBacktrace) -> Self {
        self.backtrace = Some(backtrace);
        self
    }

    pub fn has_backtrace(&self) -> bool {
        self.backtrace.is_some()
    }
}

impl fmt::Display for EvalError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.category(), self.kind)?;
        if let Some(backtrace) = self.backtrace.as_ref().filter(|bt| !bt.is_empty()) {
            write!(f, "\n{backtrace}")?;
        }
        Ok(())
    }
}

impl std::error::Error for EvalError {}

impl From<EvalErrorKind> for EvalError {
    fn from(kind: EvalErrorKind) -> Self {
        EvalError::new(kind)
    }
}

// Factory functions

#[cold]
pub fn undefined_variable(name: &str) -> EvalError {
    EvalErrorKind::UndefinedVariable { name: name.into() }.into()
}

#[cold]
pub fn undefined_property(name: &str) -> EvalError {
    EvalErrorKind::UndefinedProperty { name: name.into() }.into()
}

#[cold]
pub fn undefined_super_method(name: &str) -> EvalError {
    EvalErrorKind::UndefinedSuperMethod { name: name.into() }.into()
}

#[cold]
pub fn arity_mismatch(expected: usize, got: usize) -> EvalError {
    EvalErrorKind::ArityMismatch { expected, got }.into()
}

#[cold]
pub fn not_callable() -> EvalError {
    EvalErrorKind::NotCallable.into()
}

#[cold]
pub fn field_on_non_instance() -> EvalError {
    EvalErrorKind::FieldOnNonInstance.into()
}

#[cold]
pub fn property_on_non_instance() -> EvalError {
    EvalErrorKind::PropertyOnNonInstance.into()
}

#[cold]
pub fn superclass_not_class() -> EvalError {
    EvalErrorKind::SuperclassNotClass.into()
}

#[cold]
pub fn operands_not_numbers() -> EvalError {
    EvalErrorKind::OperandsNotNumbers.into()
}

#[cold]
pub fn operands_not_addable() -> EvalError {
    EvalErrorKind::OperandsNotAddable.into()
}

#[cold]
pub fn operand_not_number() -> EvalError {
    EvalErrorKind::OperandNotNumber.into()
}

#[cold]
pub fn not_iterable(type_name: &'static str) -> EvalError {
    EvalErrorKind::NotIterable { type_name }.into()
}

#[cold]
pub fn not_an_integer(found: String) -> EvalError {
    EvalErrorKind::NotAnInteger { found }.into()
}

#[cold]
pub fn index_out_of_bounds() -> EvalError {
    EvalErrorKind::IndexOutOfBounds.into()
}

#[cold]
pub fn not_a_string(found: String) -> EvalError {
    EvalErrorKind::NotAString { found }.into()
}

#[cold]
pub fn string_index_out_of_bounds() -> EvalError {
    EvalErrorKind::StringIndexOutOfBounds.into()
}

/// `operation` completes "Cannot ... an empty string.", e.g. `"split on"`.
#[cold]
pub fn empty_pattern(operation: &'static str) -> EvalError {
    EvalErrorKind::EmptyPattern { operation }.into()
}

#[cold]
pub fn not_a_number(text: String) -> EvalError {
    EvalErrorKind::NotANumber { text }.into()
}

#[cold]
pub fn pop_from_empty() -> EvalError {
    EvalErrorKind::PopFromEmpty.into()
}

#[cold]
pub fn stack_overflow() -> EvalError {
    EvalErrorKind::StackOverflow.into()
}

#[cfg(test)]
mod tests;
