use super::*;
use crate::errors::{undefined_variable, ErrorCategory};
use pretty_assertions::assert_eq;
use tern_ir::StringInterner;

#[test]
fn push_and_pop_track_depth() {
    let interner = StringInterner::new();
    let mut stack = CallStack::new(10);
    assert!(stack.is_empty());
    stack
        .push(CallFrame::script(interner.intern("script")))
        .unwrap_or_else(|e| panic!("{e}"));
    stack
        .push(CallFrame::function(interner.intern("f"), 3))
        .unwrap_or_else(|e| panic!("{e}"));
    assert_eq!(stack.depth(), 2);
    stack.pop();
    assert_eq!(stack.depth(), 1);
}

#[test]
fn overflow_does_not_push() {
    let interner = StringInterner::new();
    let name = interner.intern("f");
    let mut stack = CallStack::new(2);
    assert!(stack.push(CallFrame::function(name, 1)).is_ok());
    assert!(stack.push(CallFrame::function(name, 1)).is_ok());
    let err = stack.push(CallFrame::function(name, 1));
    assert!(matches!(
        err,
        Err(ref e) if e.category() == ErrorCategory::RecursionError
    ));
    assert_eq!(stack.depth(), 2);
}

#[test]
fn capture_is_innermost_first_with_current_lines() {
    let interner = StringInterner::new();
    let mut stack = CallStack::default();
    assert!(stack.push(CallFrame::script(interner.intern("script"))).is_ok());
    stack.set_line(9);
    assert!(stack.push(CallFrame::function(interner.intern("outer"), 2)).is_ok());
    stack.set_line(4);
    assert!(stack.push(CallFrame::function(interner.intern("inner"), 7)).is_ok());

    let bt = stack.capture(&interner);
    assert_eq!(
        bt.to_string(),
        "[line 7] in inner()\n[line 4] in outer()\n[line 9] in script"
    );
}

#[test]
fn attach_keeps_existing_backtrace() {
    let interner = StringInterner::new();
    let mut stack = CallStack::default();
    assert!(stack.push(CallFrame::script(interner.intern("script"))).is_ok());
    assert!(stack.push(CallFrame::function(interner.intern("f"), 2)).is_ok());
    let err = stack.attach_backtrace(undefined_variable("x"), &interner);
    stack.pop();
    let err = stack.attach_backtrace(err, &interner);
    assert_eq!(err.backtrace.map(|bt| bt.len()), Some(2));
}

#[test]
fn attach_on_empty_stack_is_noop() {
    let interner = StringInterner::new();
    let stack = CallStack::default();
    let err = stack.attach_backtrace(undefined_variable("x"), &interner);
    assert!(!err.has_backtrace());
}
