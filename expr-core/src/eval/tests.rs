use crate::{
    environment::prelude::{Environment, Value, ValueType, FALSE, TRUE},
    parser::prelude::parse_source,
};

use super::error::{RuntimeError, RuntimeErrorType};
use super::eval;

fn eval_str(input: &str, env: &mut Environment) -> Result<Value, RuntimeError> {
    let expression = parse_source(input).expect("input should parse");

    eval(&expression, env)
}

fn eval_value(input: &str) -> Value {
    match eval_str(input, &mut Environment::new()) {
        Ok(value) => value,
        Err(err) => panic!("{input:?} failed to evaluate: {err:?}"),
    }
}

fn eval_failure(input: &str, env: &mut Environment) -> RuntimeErrorType {
    match eval_str(input, env) {
        Ok(value) => panic!("{input:?} evaluated to {value}"),
        Err(err) => err.error,
    }
}

fn int(value: i64) -> Value {
    Value::Integer { value }
}

fn float(value: f64) -> Value {
    Value::Float { value }
}

#[test]
fn test_arithmetic() {
    assert_eq!(eval_value("1 + 2 * 3 ** 2 - 4 / 2"), float(17.0));
    assert_eq!(eval_value("2 ** 3 ** 2"), int(512));
    assert_eq!(eval_value("-2 ** 2"), int(-4));
    assert_eq!(eval_value("(-2) ** 2"), int(4));
    assert_eq!(eval_value("7 % 3 + 10 // 3"), int(4));
}

#[test]
fn test_true_division_yields_floats() {
    assert_eq!(eval_value("1 / 2"), float(0.5));
    assert_eq!(eval_value("6 / 2"), float(3.0));
}

#[test]
fn test_mixed_numeric_operands_promote() {
    assert_eq!(eval_value("1 + 2.5"), float(3.5));
    assert_eq!(eval_value("2.0 * 3"), float(6.0));
    assert_eq!(eval_value("7.0 // 2"), float(3.0));
}

#[test]
fn test_floor_division_rounds_down() {
    assert_eq!(eval_value("7 // 2"), int(3));
    assert_eq!(eval_value("-7 // 2"), int(-4));
    assert_eq!(eval_value("7 // -2"), int(-4));
    assert_eq!(eval_value("-7 // -2"), int(3));
    assert_eq!(eval_value("-7.0 // 2.0"), float(-4.0));
}

#[test]
fn test_modulo_sign_follows_divisor() {
    assert_eq!(eval_value("7 % 2"), int(1));
    assert_eq!(eval_value("-7 % 2"), int(1));
    assert_eq!(eval_value("7 % -2"), int(-1));
    assert_eq!(eval_value("-7 % -2"), int(-1));
    assert_eq!(eval_value("-7.5 % 2"), float(0.5));
}

#[test]
fn test_division_by_zero() {
    let mut env = Environment::new();

    for input in ["5 / 0", "5 // 0", "5 % 0", "5.0 / 0.0"] {
        assert!(matches!(
            eval_failure(input, &mut env),
            RuntimeErrorType::ZeroDivisionError { .. }
        ));
    }
}

#[test]
fn test_power() {
    assert_eq!(eval_value("2 ** 10"), int(1024));
    // a negative exponent switches to float arithmetic
    assert_eq!(eval_value("2 ** -3"), float(0.125));
    assert_eq!(eval_value("2.0 ** 0.5"), float(2.0_f64.powf(0.5)));
}

#[test]
fn test_integer_overflow() {
    let mut env = Environment::new();

    for input in [
        "9223372036854775807 + 1",
        "-9223372036854775807 - 2",
        "9223372036854775807 * 2",
        "--(-9223372036854775807 - 1)",
        "2 ** 64",
        "1 << 64",
        "(-9223372036854775807 - 1) // -1",
    ] {
        assert!(
            matches!(
                eval_failure(input, &mut env),
                RuntimeErrorType::ValueError { .. }
            ),
            "{input:?} should overflow"
        );
    }
}

#[test]
fn test_shifts() {
    assert_eq!(eval_value("1 << 10"), int(1024));
    assert_eq!(eval_value("1024 >> 3"), int(128));
    assert_eq!(eval_value("-16 >> 2"), int(-4));
    assert_eq!(eval_value("0 << 100"), int(0));
    // an oversize right shift saturates to the sign extension
    assert_eq!(eval_value("5 >> 100"), int(0));
    assert_eq!(eval_value("-5 >> 100"), int(-1));

    assert!(matches!(
        eval_failure("1 << -1", &mut Environment::new()),
        RuntimeErrorType::ValueError { .. }
    ));
    assert!(matches!(
        eval_failure("1 >> -1", &mut Environment::new()),
        RuntimeErrorType::ValueError { .. }
    ));
}

#[test]
fn test_bitwise_operators() {
    assert_eq!(eval_value("12 & 10"), int(8));
    assert_eq!(eval_value("12 | 10"), int(14));
    assert_eq!(eval_value("12 ^ 10"), int(6));
    assert_eq!(eval_value("~5"), int(-6));
}

#[test]
fn test_boolean_operators_return_operand_values() {
    assert_eq!(eval_value("0 and 5"), int(0));
    assert_eq!(eval_value("2 and 5"), int(5));
    assert_eq!(eval_value("0 or 5"), int(5));
    assert_eq!(eval_value("2 or 5"), int(2));
    assert_eq!(eval_value("() or 1"), int(1));
    assert_eq!(eval_value("not 0"), TRUE);
    assert_eq!(eval_value("not (1, 2)"), FALSE);
}

#[test]
fn test_short_circuit_skips_the_right_side() {
    let mut env = Environment::new();

    assert_eq!(eval_str("(x := 1) or (x := 2)", &mut env), Ok(int(1)));
    assert_eq!(env.get("x"), Some(&int(1)));

    assert_eq!(eval_str("(y := 0) and (y := 2)", &mut env), Ok(int(0)));
    assert_eq!(env.get("y"), Some(&int(0)));

    // the skipped side would have divided by zero
    assert_eq!(eval_str("1 or 1 / 0", &mut env), Ok(int(1)));
    assert_eq!(eval_str("0 and 1 / 0", &mut env), Ok(int(0)));
}

#[test]
fn test_comparison_chains() {
    assert_eq!(eval_value("1 < 2 < 3"), TRUE);
    assert_eq!(eval_value("1 < 2 < 0"), FALSE);
    assert_eq!(eval_value("1 <= 1 == 1.0"), TRUE);
}

#[test]
fn test_comparison_chain_evaluates_middle_once() {
    let mut env = Environment::new();
    env.set("x".to_string(), int(0));

    assert_eq!(eval_str("0 < (x := x + 1) < 10", &mut env), Ok(TRUE));
    assert_eq!(env.get("x"), Some(&int(1)));
}

#[test]
fn test_comparison_chain_short_circuits() {
    let mut env = Environment::new();

    // the chain fails at the first link, so `b` is never bound
    assert_eq!(eval_str("2 < 1 < (b := 5)", &mut env), Ok(FALSE));
    assert_eq!(env.get("b"), None);
}

#[test]
fn test_equality() {
    assert_eq!(eval_value("1 == 1.0"), TRUE);
    assert_eq!(eval_value("1 != 2"), TRUE);
    // booleans are their own kind, not integers
    assert_eq!(eval_value("1 == True"), FALSE);
    assert_eq!(eval_value("True == True"), TRUE);
    // mismatched kinds are unequal rather than an error
    assert_eq!(eval_value("(1, 2) == 1"), FALSE);
    assert_eq!(eval_value("(1, 2) == (1, 2)"), TRUE);
    assert_eq!(eval_value("(1, 2) == (1, 3)"), FALSE);
}

#[test]
fn test_is_matches_equality() {
    assert_eq!(eval_value("1 is 1.0"), TRUE);
    assert_eq!(eval_value("1 is not 2"), TRUE);
    assert_eq!(eval_value("True is 1"), FALSE);
}

#[test]
fn test_membership() {
    assert_eq!(eval_value("2 in (1, 2, 3)"), TRUE);
    assert_eq!(eval_value("5 in (1, 2, 3)"), FALSE);
    assert_eq!(eval_value("5 not in (1, 2, 3)"), TRUE);
    assert_eq!(eval_value("2.0 in (1, 2, 3)"), TRUE);

    assert!(matches!(
        eval_failure("1 in 2", &mut Environment::new()),
        RuntimeErrorType::TypeError { operator: "in", .. }
    ));
}

#[test]
fn test_ordering_is_numeric_only() {
    assert_eq!(eval_value("1 < 2.5"), TRUE);

    assert!(matches!(
        eval_failure("(1, 2) < (1, 3)", &mut Environment::new()),
        RuntimeErrorType::TypeError { .. }
    ));
    assert!(matches!(
        eval_failure("True < 2", &mut Environment::new()),
        RuntimeErrorType::TypeError { .. }
    ));
}

#[test]
fn test_ternary_evaluates_one_branch() {
    let mut env = Environment::new();

    assert_eq!(eval_str("1 if 2 > 1 else 1 / 0", &mut env), Ok(int(1)));
    assert_eq!(eval_str("(x := 1) if 0 else (y := 2)", &mut env), Ok(int(2)));
    assert_eq!(env.get("x"), None);
    assert_eq!(env.get("y"), Some(&int(2)));
}

#[test]
fn test_assignment() {
    let mut env = Environment::new();

    assert_eq!(eval_str("a = b = 7", &mut env), Ok(int(7)));
    assert_eq!(env.get("a"), Some(&int(7)));
    assert_eq!(env.get("b"), Some(&int(7)));

    assert_eq!(eval_str("a = a + 1", &mut env), Ok(int(8)));
    assert_eq!(env.get("a"), Some(&int(8)));
}

#[test]
fn test_walrus_binds_and_yields() {
    let mut env = Environment::new();

    assert_eq!(eval_str("(x := 5) + x", &mut env), Ok(int(10)));
    assert_eq!(env.get("x"), Some(&int(5)));
}

#[test]
fn test_tuples_evaluate_left_to_right() {
    let mut env = Environment::new();

    assert_eq!(
        eval_str("(x := 1), x + 1, (x := x + 10)", &mut env),
        Ok(Value::Tuple { elements: vec![int(1), int(2), int(11)] })
    );
    assert_eq!(env.get("x"), Some(&int(11)));
}

#[test]
fn test_bindings_survive_a_later_failure() {
    let mut env = Environment::new();

    assert!(eval_str("(x := 5) + (1 / 0)", &mut env).is_err());
    assert_eq!(env.get("x"), Some(&int(5)));
}

#[test]
fn test_name_errors() {
    assert_eq!(
        eval_failure("missing + 1", &mut Environment::new()),
        RuntimeErrorType::NameError { name: "missing".to_string() }
    );
}

#[test]
fn test_type_errors() {
    assert!(matches!(
        eval_failure("1 + True", &mut Environment::new()),
        RuntimeErrorType::TypeError {
            operator: "+",
            ..
        }
    ));
    assert!(matches!(
        eval_failure("-True", &mut Environment::new()),
        RuntimeErrorType::TypeError { operator: "-", .. }
    ));
    assert!(matches!(
        eval_failure("~1.5", &mut Environment::new()),
        RuntimeErrorType::TypeError { operator: "~", .. }
    ));
    assert!(matches!(
        eval_failure("(1, 2) + (3, 4)", &mut Environment::new()),
        RuntimeErrorType::TypeError { .. }
    ));
    assert!(matches!(
        eval_failure("True & False", &mut Environment::new()),
        RuntimeErrorType::TypeError { .. }
    ));
}

#[test]
fn test_type_error_reports_operand_types() {
    match eval_failure("1 + True", &mut Environment::new()) {
        RuntimeErrorType::TypeError { operands, .. } => {
            assert_eq!(operands, vec![ValueType::Integer, ValueType::Boolean]);
        },
        other => panic!("expected a type error, got {other:?}"),
    }
}

#[test]
fn test_parenthesized_and_bare_tuples_are_the_same_value() {
    assert_eq!(eval_value("(1, 2)"), eval_value("1, 2"));
}

#[test]
fn test_reevaluation_is_idempotent() {
    let mut env = Environment::new();
    let pure = parse_source("1 + 2 * 3").expect("should parse");

    assert_eq!(eval(&pure, &mut env), Ok(int(7)));
    assert_eq!(eval(&pure, &mut env), Ok(int(7)));

    let binding = parse_source("x = 1 + 2").expect("should parse");

    assert_eq!(eval(&binding, &mut env), Ok(int(3)));
    assert_eq!(eval(&binding, &mut env), Ok(int(3)));
    assert_eq!(env.get("x"), Some(&int(3)));
}

#[test]
fn test_value_rendering() {
    assert_eq!(eval_value("6 / 2").to_string(), "3.0");
    assert_eq!(eval_value("1.5 + 1").to_string(), "2.5");
    assert_eq!(eval_value("1 + 2").to_string(), "3");
    assert_eq!(eval_value("1 == 1").to_string(), "True");
    assert_eq!(eval_value("1, 2").to_string(), "(1, 2)");
    assert_eq!(eval_value("1,").to_string(), "(1,)");
    assert_eq!(eval_value("()").to_string(), "()");
    assert_eq!(eval_value("(6 / 3, (1, 2))").to_string(), "(2.0, (1, 2))");
}
