use super::*;
use crate::object::{make_class, make_closure, make_instance};
use crate::Environment;
use pretty_assertions::assert_eq;
use rustc_hash::FxHashMap;
use tern_ir::{FunctionDecl, FunctionKind, Span, StringInterner};

fn function(interner: &StringInterner, name: &str) -> Rc<FunctionDecl> {
    Rc::new(FunctionDecl {
        name: interner.intern(name),
        params: Vec::new(),
        body: Vec::new(),
        kind: FunctionKind::Function,
        span: Span::DUMMY,
        line: 1,
    })
}

#[test]
fn truthiness() {
    assert!(!Value::Nil.is_truthy());
    assert!(!Value::Bool(false).is_truthy());
    assert!(Value::Bool(true).is_truthy());
    assert!(Value::Number(0.0).is_truthy());
    assert!(Value::from("").is_truthy());
    assert!(Value::Sentinel.is_truthy());
}

#[test]
fn display_scalars() {
    let interner = StringInterner::new();
    assert_eq!(Value::Nil.display(&interner), "nil");
    assert_eq!(Value::Bool(true).display(&interner), "true");
    assert_eq!(Value::Number(2.0).display(&interner), "2");
    assert_eq!(Value::Number(2.5).display(&interner), "2.5");
    assert_eq!(Value::Number(-0.0).display(&interner), "-0");
    assert_eq!(Value::from("hi").display(&interner), "hi");
    assert_eq!(
        Value::Range(RangeValue { start: 0, end: 3 }).display(&interner),
        "Range(0, 3)"
    );
    assert_eq!(Value::Sentinel.display(&interner), "<sentinel>");
}

#[test]
fn display_objects() {
    let interner = StringInterner::new();
    let class = make_class(interner.intern("Foo"), None, FxHashMap::default());
    let instance = make_instance(Rc::clone(&class));
    let closure = make_closure(function(&interner, "greet"), Environment::global());

    assert_eq!(Value::Class(class).display(&interner), "Foo");
    assert_eq!(Value::Instance(instance).display(&interner), "Foo instance");
    assert_eq!(Value::Closure(closure).display(&interner), "<fn greet>");
}

#[test]
fn display_nested_and_self_referencing_vec() {
    let interner = StringInterner::new();
    let inner = Value::vec(vec![Value::from("a"), Value::Nil]);
    let outer = Value::vec(vec![Value::Number(1.0), inner]);
    assert_eq!(outer.display(&interner), "[1, [a, nil]]");

    let Value::Vec(items) = &outer else {
        panic!("expected vec");
    };
    items.borrow_mut().push(outer.clone());
    assert_eq!(outer.display(&interner), "[1, [a, nil], [...]]");
    items.borrow_mut().clear();
}

#[test]
fn equality() {
    assert_eq!(Value::Number(1.0), Value::Number(1.0));
    assert_eq!(Value::from("a"), Value::from("a"));
    assert_ne!(Value::Nil, Value::Bool(false));
    assert_ne!(Value::Number(1.0), Value::from("1"));
    assert_eq!(
        Value::vec(vec![Value::Number(1.0)]),
        Value::vec(vec![Value::Number(1.0)])
    );
    assert_eq!(Value::Sentinel, Value::Sentinel);
}

#[test]
fn self_containing_vecs_compare_without_looping() {
    let a = Value::vec(vec![Value::Number(1.0)]);
    let b = Value::vec(vec![Value::Number(1.0)]);
    let c = Value::vec(vec![Value::Number(2.0)]);
    for v in [&a, &b, &c] {
        let Value::Vec(items) = v else {
            panic!("expected vec");
        };
        items.borrow_mut().push(v.clone());
    }
    assert_eq!(a, b);
    assert_ne!(a, c);

    for v in [&a, &b, &c] {
        let Value::Vec(items) = v else {
            panic!("expected vec");
        };
        items.borrow_mut().clear();
    }
}

#[test]
fn instances_compare_by_identity() {
    let interner = StringInterner::new();
    let class = make_class(interner.intern("Foo"), None, FxHashMap::default());
    let a = Value::Instance(make_instance(Rc::clone(&class)));
    let b = Value::Instance(make_instance(class));
    assert_eq!(a, a.clone());
    assert_ne!(a, b);
}

#[test]
fn as_integer_rejects_fractions() {
    assert_eq!(Value::Number(3.0).as_integer(), Some(3));
    assert_eq!(Value::Number(-2.0).as_integer(), Some(-2));
    assert_eq!(Value::Number(1.5).as_integer(), None);
    assert_eq!(Value::from("1").as_integer(), None);
}
