use calculate::{calculate, EvalError};
use pretty_assertions::assert_eq;

fn output(a: &str, b: &str, op: &str) -> String {
    let mut out = Vec::new();
    calculate(a, b, op, &mut out).unwrap();
    String::from_utf8(out).unwrap()
}

#[test]
fn prints_integer_results() {
    assert_eq!(output("4", "2", "+"), "6\n");
    assert_eq!(output("4", "2", "-"), "2\n");
    assert_eq!(output("4", "2", "*"), "8\n");
    assert_eq!(output("2", "5", "-"), "-3\n");
}

#[test]
fn prints_division_as_float() {
    assert_eq!(output("4", "2", "/"), "2.0\n");
    assert_eq!(output("1", "3", "/"), "0.3333333333333333\n");
}

#[test]
fn prints_exponent_with_sign_and_two_digits() {
    assert_eq!(output("1", "200000", "/"), "5e-06\n");
    assert_eq!(output("100000000000000000", "1", "/"), "1e+17\n");
}

#[test]
fn large_dividend_keeps_exact_quotient() {
    assert_eq!(output("9007199254740993", "3", "/"), "3002399751580331.0\n");
}

#[test]
fn accepts_underscore_separated_operands() {
    assert_eq!(output("1_000", "2", "+"), "1002\n");
}

#[test]
fn prints_message_then_empty_line_on_zero_divisor() {
    assert_eq!(output("4", "0", "/"), "You cannot divide by zero!\n\n");
}

#[test]
fn negative_divisor_takes_zero_divisor_branch() {
    assert_eq!(output("4", "-2", "/"), "You cannot divide by zero!\n\n");
}

#[test]
fn prints_log_with_confirmation() {
    assert_eq!(output("8", "2", "log"), "Everything OK\n3.0\n");
}

#[test]
fn prints_domain_error_for_negative_log() {
    assert_eq!(output("-8", "2", "log"), "Math domain error!\n\n");
}

#[test]
fn prints_type_error_for_non_integer_operand() {
    assert_eq!(output("four", "2", "+"), "Math Type error!\n\n");
    assert_eq!(output("4", "2.0", "*"), "Math Type error!\n\n");
}

#[test]
fn unknown_operator_writes_nothing() {
    let mut out = Vec::new();
    let error = calculate("4", "2", "mod", &mut out).unwrap_err();
    assert!(matches!(error, EvalError::UnknownOperator(ref token) if token == "mod"));
    assert_eq!(error.to_string(), "Unknown operator: mod");
    assert!(out.is_empty());
}
