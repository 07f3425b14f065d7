use super::*;
use pretty_assertions::assert_eq;

#[test]
fn test_display_without_backtrace() {
    assert_eq!(
        undefined_variable("x").to_string(),
        "NameError: Undefined variable 'x'."
    );
    assert_eq!(
        arity_mismatch(1, 2).to_string(),
        "ArityError: Expected 1 arguments but found 2."
    );
}

#[test]
fn test_categories() {
    assert_eq!(undefined_property("p").category(), ErrorCategory::AttributeError);
    assert_eq!(undefined_super_method("m").category(), ErrorCategory::AttributeError);
    assert_eq!(not_callable().category(), ErrorCategory::TypeError);
    assert_eq!(index_out_of_bounds().category(), ErrorCategory::IndexError);
    assert_eq!(pop_from_empty().category(), ErrorCategory::ValueError);
    assert_eq!(string_index_out_of_bounds().category(), ErrorCategory::IndexError);
    assert_eq!(not_a_string("1".into()).category(), ErrorCategory::TypeError);
    assert_eq!(empty_pattern("find").category(), ErrorCategory::ValueError);
    assert_eq!(not_a_number("x".into()).category(), ErrorCategory::ValueError);
    assert_eq!(stack_overflow().category(), ErrorCategory::RecursionError);
}

#[test]
fn test_display_with_backtrace() {
    let backtrace = EvalBacktrace::new(vec![
        BacktraceFrame {
            name: "inner".into(),
            line: 3,
            kind: FrameKind::Function,
        },
        BacktraceFrame {
            name: "script".into(),
            line: 7,
            kind: FrameKind::Script,
        },
    ]);
    let err = undefined_property("missing").with_backtrace(backtrace);
    assert!(err.has_backtrace());
    assert_eq!(
        err.to_string(),
        "AttributeError: Undefined property 'missing'.\n[line 3] in inner()\n[line 7] in script"
    );
}

#[test]
fn test_empty_backtrace_adds_nothing() {
    let err = stack_overflow().with_backtrace(EvalBacktrace::default());
    assert_eq!(err.to_string(), "RecursionError: Stack overflow.");
}

#[test]
fn test_message_has_no_category() {
    assert_eq!(
        superclass_not_class().message(),
        "Superclass must be a class."
    );
}
