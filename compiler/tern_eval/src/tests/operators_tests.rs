use crate::operators::{evaluate_binary, evaluate_unary};
use crate::{ErrorCategory, Value};
use pretty_assertions::assert_eq;
use tern_ir::{BinaryOp, UnaryOp};

fn num(n: f64) -> Value {
    Value::Number(n)
}

#[test]
fn test_arithmetic() {
    assert_eq!(evaluate_binary(&num(2.0), &num(3.0), BinaryOp::Add), Ok(num(5.0)));
    assert_eq!(evaluate_binary(&num(5.0), &num(3.0), BinaryOp::Sub), Ok(num(2.0)));
    assert_eq!(evaluate_binary(&num(2.0), &num(3.0), BinaryOp::Mul), Ok(num(6.0)));
    assert_eq!(evaluate_binary(&num(7.0), &num(2.0), BinaryOp::Div), Ok(num(3.5)));
}

#[test]
fn test_string_concat() {
    assert_eq!(
        evaluate_binary(&Value::from("ab"), &Value::from("cd"), BinaryOp::Add),
        Ok(Value::from("abcd"))
    );
}

#[test]
fn test_mixed_add_is_type_error() {
    let err = evaluate_binary(&num(1.0), &Value::from("a"), BinaryOp::Add);
    assert!(matches!(err, Err(ref e) if e.category() == ErrorCategory::TypeError));
    assert_eq!(
        err.map_err(|e| e.to_string()),
        Err("TypeError: Binary operands must be two numbers or two strings.".to_string())
    );
}

#[test]
fn test_comparisons() {
    assert_eq!(evaluate_binary(&num(1.0), &num(2.0), BinaryOp::Lt), Ok(Value::Bool(true)));
    assert_eq!(evaluate_binary(&num(2.0), &num(2.0), BinaryOp::LtEq), Ok(Value::Bool(true)));
    assert_eq!(evaluate_binary(&num(1.0), &num(2.0), BinaryOp::Gt), Ok(Value::Bool(false)));
    assert_eq!(
        evaluate_binary(&Value::from("a"), &num(2.0), BinaryOp::Lt).map_err(|e| e.message()),
        Err("Binary operands must both be numbers.".to_string())
    );
}

#[test]
fn test_equality_across_types() {
    assert_eq!(evaluate_binary(&Value::Nil, &Value::Nil, BinaryOp::Eq), Ok(Value::Bool(true)));
    assert_eq!(
        evaluate_binary(&Value::Nil, &Value::Bool(false), BinaryOp::Eq),
        Ok(Value::Bool(false))
    );
    assert_eq!(
        evaluate_binary(&num(1.0), &Value::from("1"), BinaryOp::NotEq),
        Ok(Value::Bool(true))
    );
}

#[test]
fn test_unary() {
    assert_eq!(evaluate_unary(UnaryOp::Neg, &num(3.0)), Ok(num(-3.0)));
    assert_eq!(evaluate_unary(UnaryOp::Not, &Value::Nil), Ok(Value::Bool(true)));
    assert_eq!(evaluate_unary(UnaryOp::Not, &num(0.0)), Ok(Value::Bool(false)));
    assert!(evaluate_unary(UnaryOp::Neg, &Value::from("x")).is_err());
}
