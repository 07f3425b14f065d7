use super::*;
use crate::diagnostics::CallFrame;
use crate::errors::undefined_variable;
use crate::Value;
use tern_ir::SharedInterner;

#[test]
fn scoped_restores_environment() {
    let mut interp = Interpreter::new(SharedInterner::new());
    let outer = interp.env.clone();
    let inner = outer.child();
    {
        let scoped = interp.scoped(inner.clone());
        assert!(scoped.env.ptr_eq(&inner));
    }
    assert!(interp.env.ptr_eq(&outer));
}

#[test]
fn with_env_restores_after_error() {
    let mut interp = Interpreter::new(SharedInterner::new());
    let outer = interp.env.clone();
    let name = interp.interner.intern("x");
    let result: Result<(), _> = interp.with_env(outer.child(), |scoped| {
        scoped.env.define(name, Value::Number(1.0));
        Err(undefined_variable("y"))
    });
    assert!(result.is_err());
    assert!(interp.env.ptr_eq(&outer));
    assert!(!outer.defines(name));
}

#[test]
fn call_guard_pops_frame_and_restores_env() {
    let mut interp = Interpreter::new(SharedInterner::new());
    let outer = interp.env.clone();
    let name = interp.interner.intern("f");
    {
        let guard = interp.enter_call(CallFrame::function(name, 1), outer.child());
        let Ok(guard) = guard else {
            panic!("call depth exceeded");
        };
        assert_eq!(guard.call_stack.depth(), 1);
        assert!(!guard.env.ptr_eq(&outer));
    }
    assert_eq!(interp.call_depth(), 0);
    assert!(interp.env.ptr_eq(&outer));
}

#[test]
fn enter_call_over_limit_changes_nothing() {
    let mut interp = crate::InterpreterBuilder::new(SharedInterner::new())
        .max_call_depth(0)
        .build();
    let outer = interp.env.clone();
    let name = interp.interner.intern("f");
    assert!(interp
        .enter_call(CallFrame::function(name, 1), outer.child())
        .is_err());
    assert_eq!(interp.call_depth(), 0);
    assert!(interp.env.ptr_eq(&outer));
}
