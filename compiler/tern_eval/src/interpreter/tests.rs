use super::*;
use crate::object::Instance;
use crate::{buffer_handler, ErrorCategory};
use pretty_assertions::assert_eq;
use std::rc::Rc;
use tern_ir::{Expr, ExprKind, Span, StmtKind};

fn parse(interner: &SharedInterner, source: &str) -> Vec<Stmt> {
    let tokens = tern_lexer::lex(source, interner);
    let parsed = tern_parse::parse(&tokens, source, interner);
    assert!(!parsed.has_errors(), "{:?}", parsed.errors);
    parsed.stmts
}

#[test]
fn globals_persist_between_runs() {
    let interner = SharedInterner::new();
    let handler = buffer_handler();
    let mut interp = InterpreterBuilder::new(interner.clone())
        .print_handler(handler.clone())
        .build();
    assert!(interp.run(&parse(&interner, "var x = 20;")).is_ok());
    assert!(interp.run(&parse(&interner, "print(x + 1);")).is_ok());
    assert_eq!(handler.get_output(), "21\n");
}

#[test]
fn builder_env_supplies_extra_globals() {
    let interner = SharedInterner::new();
    let env = Environment::global();
    env.define(interner.intern("answer"), Value::Number(42.0));
    let handler = buffer_handler();
    let mut interp = InterpreterBuilder::new(interner.clone())
        .env(env)
        .print_handler(handler.clone())
        .build();
    assert!(interp.run(&parse(&interner, "print(answer);")).is_ok());
    assert_eq!(handler.get_output(), "42\n");
}

#[test]
fn evaluate_single_expression() {
    let interner = SharedInterner::new();
    let mut interp = InterpreterBuilder::new(interner)
        .print_handler(crate::silent_handler())
        .build();
    let expr = Expr::new(
        ExprKind::Binary {
            op: tern_ir::BinaryOp::Mul,
            left: Box::new(Expr::new(ExprKind::Number(6.0), Span::DUMMY, 1)),
            right: Box::new(Expr::new(ExprKind::Number(7.0), Span::DUMMY, 1)),
        },
        Span::DUMMY,
        1,
    );
    assert_eq!(interp.evaluate(&expr), Ok(Value::Number(42.0)));
}

#[test]
fn execute_return_yields_signal() {
    let interner = SharedInterner::new();
    let mut interp = Interpreter::new(interner.clone());
    let stmts = parse(&interner, "fn f() { return 7; }");
    let Some(StmtKind::Function(decl)) = stmts.first().map(|s| &s.kind) else {
        panic!("expected function");
    };
    assert_eq!(
        interp.execute_stmts(&decl.body),
        Ok(ControlSignal::Return(Value::Number(7.0)))
    );
}

#[test]
fn call_value_checks_arity_of_natives() {
    let interner = SharedInterner::new();
    let mut interp = Interpreter::new(interner.clone());
    let print = interp.globals().lookup(interner.intern("print"));
    let Some(print) = print else {
        panic!("print is not defined");
    };
    let err = interp.call_value(&print, &[]);
    assert_eq!(
        err.map_err(|e| e.category()),
        Err(ErrorCategory::ArityError)
    );
}

#[test]
fn dropping_interpreter_breaks_instance_cycles() {
    let interner = SharedInterner::new();
    let mut interp = InterpreterBuilder::new(interner.clone())
        .print_handler(crate::silent_handler())
        .build();
    let source = r#"
class Node {
  fn __init__(self) { self.me = self; self.f = || self; }
}
var n = Node();
"#;
    assert!(interp.run(&parse(&interner, source)).is_ok());
    let Some(Value::Instance(node)) = interp.globals().lookup(interner.intern("n")) else {
        panic!("n is not an instance");
    };
    let weak: std::rc::Weak<Instance> = Rc::downgrade(&node);
    assert_eq!(node.field_count(), 2);
    assert!(interp.live_objects().instances >= 1);

    drop(interp);
    assert_eq!(node.field_count(), 0);
    drop(node);
    assert!(weak.upgrade().is_none());
}

const NODE_CLASS: &str = r#"
class Node {
  fn __init__(self) { self.me = || self; }
}
"#;

fn live_instances(interp: &mut Interpreter, _args: &[Value]) -> crate::EvalResult {
    #[expect(clippy::cast_precision_loss, reason = "test counts are small")]
    Ok(Value::Number(interp.live_objects().instances as f64))
}

fn counting_interpreter(interner: &SharedInterner, handler: SharedPrintHandler) -> Interpreter {
    let env = Environment::global();
    env.define(
        interner.intern("live"),
        Value::Native(crate::NativeFunction {
            name: "live",
            arity: 0,
            func: live_instances,
        }),
    );
    InterpreterBuilder::new(interner.clone())
        .env(env)
        .print_handler(handler)
        .build()
}

#[test]
fn unreachable_cycles_are_reclaimed_while_running() {
    let interner = SharedInterner::new();
    let handler = buffer_handler();
    let mut interp = counting_interpreter(&interner, handler.clone());
    let source = format!(
        "{NODE_CLASS}
var peak = 0;
var i = 0;
while i < 20000 {{
  var n = Node();
  if live() > peak {{ peak = live(); }}
  i += 1;
}}
print(peak < 5000);
"
    );
    assert!(interp.run(&parse(&interner, &source)).is_ok());
    assert_eq!(handler.get_output(), "true\n");
    assert_eq!(interp.live_objects().instances, 0);
    assert_eq!(interp.live_objects().envs, 1);
}

#[test]
fn collection_keeps_reachable_objects_intact() {
    let interner = SharedInterner::new();
    let handler = buffer_handler();
    let mut interp = counting_interpreter(&interner, handler.clone());
    let source = format!(
        "{NODE_CLASS}
fn make(n) {{
  var v = [];
  var k = 0;
  while k < n {{
    v.push(Node());
    k += 1;
  }}
  return v;
}}
var kept = make(3);
var seen = 0;
for node in make(5) {{
  var j = 0;
  while j < 3000 {{
    Node();
    j += 1;
  }}
  if node.me() == node {{ seen += 1; }}
}}
print(seen);
print(kept.len());
print(kept[2].me() == kept[2]);
"
    );
    assert!(interp.run(&parse(&interner, &source)).is_ok());
    assert_eq!(handler.get_output(), "5\n3\ntrue\n");
    assert_eq!(interp.live_objects().instances, 3);
}

#[test]
fn repl_style_runs_reclaim_garbage_between_runs() {
    let interner = SharedInterner::new();
    let mut interp = InterpreterBuilder::new(interner.clone())
        .print_handler(crate::silent_handler())
        .build();
    assert!(interp.run(&parse(&interner, NODE_CLASS)).is_ok());
    for _ in 0..3 {
        assert!(interp.run(&parse(&interner, "var n = Node();")).is_ok());
        assert_eq!(interp.live_objects().instances, 1);
    }
}
