use super::{run_script, run_with};
use crate::{ErrorCategory, FrameKind};
use pretty_assertions::assert_eq;

#[test]
fn arity_mismatch_skips_body_and_lists_active_frames() {
    let run = run_script(
        r#"fn f(a) {
  print("body");
}
fn g() {
  f(1, 2);
}
g();
print("after");
"#,
    );
    assert_eq!(run.output, "");
    assert_eq!(
        run.error_text().as_deref(),
        Some("ArityError: Expected 1 arguments but found 2.\n[line 5] in g()\n[line 7] in script")
    );
}

#[test]
fn error_inside_method_reports_every_frame() {
    let run = run_script(
        r#"class A {
  fn boom(self) {
    return self.missing;
  }
}
fn run() {
  return A().boom();
}
run();
"#,
    );
    let Some(err) = run.error else {
        panic!("expected an error");
    };
    assert_eq!(err.category(), ErrorCategory::AttributeError);
    let frames: Vec<_> = err
        .backtrace
        .as_ref()
        .map(|bt| {
            bt.frames()
                .iter()
                .map(|f| (f.name.clone(), f.line, f.kind))
                .collect()
        })
        .unwrap_or_default();
    assert_eq!(
        frames,
        vec![
            ("boom".to_string(), 3, FrameKind::Function),
            ("run".to_string(), 7, FrameKind::Function),
            ("script".to_string(), 9, FrameKind::Script),
        ]
    );
}

#[test]
fn undefined_variable_at_top_level() {
    let run = run_script("print(1);\nprint(x);\nprint(2);");
    assert_eq!(run.output, "1\n");
    assert_eq!(
        run.error_text().as_deref(),
        Some("NameError: Undefined variable 'x'.\n[line 2] in script")
    );
}

#[test]
fn assigning_undeclared_variable_is_a_name_error() {
    let run = run_script("y = 1;");
    assert_eq!(
        run.error.map(|e| e.category()),
        Some(ErrorCategory::NameError)
    );
}

#[test]
fn lambda_frames_are_named_lambda() {
    let run = run_script("var f = |x| {\n  return x + nil;\n};\nf(1);");
    assert_eq!(
        run.error_text().as_deref(),
        Some(
            "TypeError: Binary operands must be two numbers or two strings.\n\
             [line 2] in lambda()\n[line 4] in script"
        )
    );
}

#[test]
fn runaway_recursion_is_a_recursion_error() {
    let run = run_with("fn f(n) { return f(n + 1); }\nf(0);", |b| {
        b.max_call_depth(64)
    });
    let Some(err) = run.error else {
        panic!("expected an error");
    };
    assert_eq!(err.to_string().lines().next(), Some("RecursionError: Stack overflow."));
    // Every frame that was active is listed: 63 calls of `f` plus the script.
    assert_eq!(err.backtrace.map(|bt| bt.len()), Some(64));
}

#[test]
fn default_depth_limit_is_reported_before_native_overflow() {
    let run = run_script("fn f() { return f(); }\nf();");
    assert_eq!(
        run.error.map(|e| e.category()),
        Some(ErrorCategory::RecursionError)
    );
}

#[test]
fn call_depth_returns_to_zero_after_error() {
    let interner = tern_ir::SharedInterner::new();
    let source = "fn f() { return nil + 1; }\nf();";
    let tokens = tern_lexer::lex(source, &interner);
    let parsed = tern_parse::parse(&tokens, source, &interner);
    let mut interp = crate::InterpreterBuilder::new(interner)
        .print_handler(crate::silent_handler())
        .build();
    assert!(interp.run(&parsed.stmts).is_err());
    assert_eq!(interp.call_depth(), 0);
    assert!(interp.env.ptr_eq(interp.globals()));
}
