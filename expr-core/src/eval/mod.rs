use crate::{
    environment::prelude::{Environment, Value, FALSE, TRUE},
    parser::prelude::{
        Assign, Binary, BinaryOp, Compare, CompareOp, Expression, Identifier,
        Primitive, Ternary, Tuple, Unary, UnaryOp, Walrus,
    },
    utils::prelude::SrcSpan,
};

use self::error::{runtime_error, RuntimeError, RuntimeErrorType};

pub mod error;

pub mod prelude {
    pub use super::error::*;
    pub use super::eval;
}

#[cfg(test)]
mod tests;

/// Evaluates an expression against a mutable environment. Bindings made by
/// `=` and `:=` stay in the environment even when a later sub-expression
/// fails, matching left-to-right evaluation order.
pub fn eval(expression: &Expression, env: &mut Environment) -> Result<Value, RuntimeError> {
    match expression {
        Expression::Primitive(primitive) => Ok(eval_primitive(primitive)),
        Expression::Identifier(identifier) => eval_identifier(identifier, env),
        Expression::Unary(unary) => eval_unary(unary, env),
        Expression::Binary(binary) => eval_binary(binary, env),
        Expression::Compare(compare) => eval_compare(compare, env),
        Expression::Ternary(ternary) => eval_ternary(ternary, env),
        Expression::Walrus(walrus) => eval_walrus(walrus, env),
        Expression::Assign(assign) => eval_assign(assign, env),
        Expression::Tuple(tuple) => eval_tuple(tuple, env),
    }
}

fn eval_primitive(primitive: &Primitive) -> Value {
    match primitive {
        Primitive::Int { value, .. } => Value::Integer { value: *value },
        Primitive::Float { value, .. } => Value::Float { value: *value },
        Primitive::Bool { value, .. } => Value::Boolean { value: *value },
    }
}

fn eval_identifier(identifier: &Identifier, env: &Environment) -> Result<Value, RuntimeError> {
    match env.get(&identifier.value) {
        Some(value) => Ok(value.clone()),
        None => runtime_error(
            RuntimeErrorType::NameError { name: identifier.value.clone() },
            identifier.location
        ),
    }
}

fn eval_unary(unary: &Unary, env: &mut Environment) -> Result<Value, RuntimeError> {
    let operand = eval(&unary.operand, env)?;

    match (unary.op, operand) {
        (UnaryOp::Not, operand) => {
            Ok(Value::Boolean { value: !operand.is_truthy() })
        },
        (UnaryOp::Neg, Value::Integer { value }) => match value.checked_neg() {
            Some(value) => Ok(Value::Integer { value }),
            None => overflow_error(unary.op.as_literal(), unary.location),
        },
        (UnaryOp::Neg, Value::Float { value }) => Ok(Value::Float { value: -value }),
        (UnaryOp::Pos, operand @ (Value::Integer { .. } | Value::Float { .. })) => {
            Ok(operand)
        },
        (UnaryOp::BitNot, Value::Integer { value }) => {
            Ok(Value::Integer { value: !value })
        },
        (op, operand) => type_error(op.as_literal(), &[&operand], unary.location),
    }
}

fn eval_binary(binary: &Binary, env: &mut Environment) -> Result<Value, RuntimeError> {
    // `and`/`or` return one of their operand values as-is and must not
    // evaluate the right side when the left decides
    match binary.op {
        BinaryOp::And => {
            let left = eval(&binary.left, env)?;

            if !left.is_truthy() {
                return Ok(left);
            }

            return eval(&binary.right, env);
        },
        BinaryOp::Or => {
            let left = eval(&binary.left, env)?;

            if left.is_truthy() {
                return Ok(left);
            }

            return eval(&binary.right, env);
        },
        _ => {}
    }

    let left = eval(&binary.left, env)?;
    let right = eval(&binary.right, env)?;

    eval_binary_values(binary.op, left, right, binary.location)
}

enum NumericPair {
    Integers(i64, i64),
    Floats(f64, f64),
}

// mixed int/float operands promote to floats; booleans are not numbers
fn numeric_pair(left: &Value, right: &Value) -> Option<NumericPair> {
    match (left, right) {
        (Value::Integer { value: l }, Value::Integer { value: r }) => {
            Some(NumericPair::Integers(*l, *r))
        },
        (Value::Float { value: l }, Value::Float { value: r }) => {
            Some(NumericPair::Floats(*l, *r))
        },
        (Value::Integer { value: l }, Value::Float { value: r }) => {
            Some(NumericPair::Floats(*l as f64, *r))
        },
        (Value::Float { value: l }, Value::Integer { value: r }) => {
            Some(NumericPair::Floats(*l, *r as f64))
        },
        _ => None,
    }
}

fn eval_binary_values(
    op: BinaryOp,
    left: Value,
    right: Value,
    location: SrcSpan,
) -> Result<Value, RuntimeError> {
    match op {
        BinaryOp::Add => match numeric_pair(&left, &right) {
            Some(NumericPair::Integers(l, r)) => match l.checked_add(r) {
                Some(value) => Ok(Value::Integer { value }),
                None => overflow_error(op.as_literal(), location),
            },
            Some(NumericPair::Floats(l, r)) => Ok(Value::Float { value: l + r }),
            None => type_error(op.as_literal(), &[&left, &right], location),
        },
        BinaryOp::Sub => match numeric_pair(&left, &right) {
            Some(NumericPair::Integers(l, r)) => match l.checked_sub(r) {
                Some(value) => Ok(Value::Integer { value }),
                None => overflow_error(op.as_literal(), location),
            },
            Some(NumericPair::Floats(l, r)) => Ok(Value::Float { value: l - r }),
            None => type_error(op.as_literal(), &[&left, &right], location),
        },
        BinaryOp::Mul => match numeric_pair(&left, &right) {
            Some(NumericPair::Integers(l, r)) => match l.checked_mul(r) {
                Some(value) => Ok(Value::Integer { value }),
                None => overflow_error(op.as_literal(), location),
            },
            Some(NumericPair::Floats(l, r)) => Ok(Value::Float { value: l * r }),
            None => type_error(op.as_literal(), &[&left, &right], location),
        },
        // `/` is true division: the result is a float even for two integers
        BinaryOp::Div => match numeric_pair(&left, &right) {
            Some(NumericPair::Integers(_, 0)) => {
                zero_division_error(op.as_literal(), location)
            },
            Some(NumericPair::Integers(l, r)) => {
                Ok(Value::Float { value: l as f64 / r as f64 })
            },
            Some(NumericPair::Floats(_, r)) if r == 0.0 => {
                zero_division_error(op.as_literal(), location)
            },
            Some(NumericPair::Floats(l, r)) => Ok(Value::Float { value: l / r }),
            None => type_error(op.as_literal(), &[&left, &right], location),
        },
        BinaryOp::FloorDiv => match numeric_pair(&left, &right) {
            Some(NumericPair::Integers(_, 0)) => {
                zero_division_error(op.as_literal(), location)
            },
            Some(NumericPair::Integers(l, r)) => match floored_div(l, r) {
                Some(value) => Ok(Value::Integer { value }),
                None => overflow_error(op.as_literal(), location),
            },
            Some(NumericPair::Floats(_, r)) if r == 0.0 => {
                zero_division_error(op.as_literal(), location)
            },
            Some(NumericPair::Floats(l, r)) => {
                Ok(Value::Float { value: (l / r).floor() })
            },
            None => type_error(op.as_literal(), &[&left, &right], location),
        },
        BinaryOp::Mod => match numeric_pair(&left, &right) {
            Some(NumericPair::Integers(_, 0)) => {
                zero_division_error(op.as_literal(), location)
            },
            Some(NumericPair::Integers(l, r)) => {
                Ok(Value::Integer { value: floored_rem(l, r) })
            },
            Some(NumericPair::Floats(_, r)) if r == 0.0 => {
                zero_division_error(op.as_literal(), location)
            },
            Some(NumericPair::Floats(l, r)) => {
                // the remainder takes the sign of the divisor
                let remainder = l % r;

                if remainder != 0.0 && (remainder < 0.0) != (r < 0.0) {
                    Ok(Value::Float { value: remainder + r })
                } else {
                    Ok(Value::Float { value: remainder })
                }
            },
            None => type_error(op.as_literal(), &[&left, &right], location),
        },
        BinaryOp::Pow => match numeric_pair(&left, &right) {
            // a negative integer exponent switches to float arithmetic
            Some(NumericPair::Integers(l, r)) if r < 0 => {
                Ok(Value::Float { value: (l as f64).powf(r as f64) })
            },
            Some(NumericPair::Integers(l, r)) => {
                let raised = u32::try_from(r)
                    .ok()
                    .and_then(|exponent| l.checked_pow(exponent));

                match raised {
                    Some(value) => Ok(Value::Integer { value }),
                    None => overflow_error(op.as_literal(), location),
                }
            },
            Some(NumericPair::Floats(l, r)) => {
                Ok(Value::Float { value: l.powf(r) })
            },
            None => type_error(op.as_literal(), &[&left, &right], location),
        },
        BinaryOp::Shl => match (&left, &right) {
            (Value::Integer { value: l }, Value::Integer { value: r }) => {
                if *r < 0 {
                    return negative_shift_error(location);
                }

                if *r >= 64 {
                    return if *l == 0 {
                        Ok(Value::Integer { value: 0 })
                    } else {
                        overflow_error(op.as_literal(), location)
                    };
                }

                let shifted = l << r;

                // shifting a bit out of range loses information, which a
                // round-trip back down detects
                if shifted >> r == *l {
                    Ok(Value::Integer { value: shifted })
                } else {
                    overflow_error(op.as_literal(), location)
                }
            },
            _ => type_error(op.as_literal(), &[&left, &right], location),
        },
        BinaryOp::Shr => match (&left, &right) {
            (Value::Integer { value: l }, Value::Integer { value: r }) => {
                if *r < 0 {
                    return negative_shift_error(location);
                }

                // an oversize shift saturates to the sign extension
                if *r >= 64 {
                    return Ok(Value::Integer { value: if *l < 0 { -1 } else { 0 } });
                }

                Ok(Value::Integer { value: l >> r })
            },
            _ => type_error(op.as_literal(), &[&left, &right], location),
        },
        BinaryOp::BitAnd => match (&left, &right) {
            (Value::Integer { value: l }, Value::Integer { value: r }) => {
                Ok(Value::Integer { value: l & r })
            },
            _ => type_error(op.as_literal(), &[&left, &right], location),
        },
        BinaryOp::BitXor => match (&left, &right) {
            (Value::Integer { value: l }, Value::Integer { value: r }) => {
                Ok(Value::Integer { value: l ^ r })
            },
            _ => type_error(op.as_literal(), &[&left, &right], location),
        },
        BinaryOp::BitOr => match (&left, &right) {
            (Value::Integer { value: l }, Value::Integer { value: r }) => {
                Ok(Value::Integer { value: l | r })
            },
            _ => type_error(op.as_literal(), &[&left, &right], location),
        },
        BinaryOp::And | BinaryOp::Or => {
            unreachable!("short-circuit operators are handled before operand evaluation")
        }
    }
}

// floor division rounds toward negative infinity, so a nonzero remainder
// with mismatched signs moves the quotient down one
fn floored_div(l: i64, r: i64) -> Option<i64> {
    let quotient = l.checked_div(r)?;
    let remainder = l % r;

    if remainder != 0 && (remainder < 0) != (r < 0) {
        Some(quotient - 1)
    } else {
        Some(quotient)
    }
}

fn floored_rem(l: i64, r: i64) -> i64 {
    // i64::MIN % -1 is the one overflowing case and its remainder is 0
    let remainder = l.checked_rem(r).unwrap_or(0);

    if remainder != 0 && (remainder < 0) != (r < 0) {
        remainder + r
    } else {
        remainder
    }
}

fn eval_compare(compare: &Compare, env: &mut Environment) -> Result<Value, RuntimeError> {
    // `a < b < c` evaluates each operand once and stops at the first
    // failing link
    let mut previous = eval(&compare.first, env)?;

    for (op, operand) in &compare.comparisons {
        let next = eval(operand, env)?;

        if !compare_values(*op, &previous, &next, compare.location)? {
            return Ok(FALSE);
        }

        previous = next;
    }

    Ok(TRUE)
}

fn compare_values(
    op: CompareOp,
    left: &Value,
    right: &Value,
    location: SrcSpan,
) -> Result<bool, RuntimeError> {
    match op {
        CompareOp::Eq | CompareOp::Is => Ok(values_equal(left, right)),
        CompareOp::NotEq | CompareOp::IsNot => Ok(!values_equal(left, right)),
        CompareOp::Lt | CompareOp::LtEq | CompareOp::Gt | CompareOp::GtEq => {
            match numeric_pair(left, right) {
                Some(NumericPair::Integers(l, r)) => Ok(match op {
                    CompareOp::Lt => l < r,
                    CompareOp::LtEq => l <= r,
                    CompareOp::Gt => l > r,
                    _ => l >= r,
                }),
                Some(NumericPair::Floats(l, r)) => Ok(match op {
                    CompareOp::Lt => l < r,
                    CompareOp::LtEq => l <= r,
                    CompareOp::Gt => l > r,
                    _ => l >= r,
                }),
                None => type_error(op.as_literal(), &[left, right], location),
            }
        },
        CompareOp::In | CompareOp::NotIn => match right {
            Value::Tuple { elements } => {
                let found = elements
                    .iter()
                    .any(|element| values_equal(left, element));

                Ok(if op == CompareOp::In { found } else { !found })
            },
            _ => type_error(op.as_literal(), &[left, right], location),
        },
    }
}

// equality never fails: mismatched kinds are simply unequal, and ints
// compare equal to floats with the same magnitude. booleans are their own
// kind and never equal a number.
fn values_equal(left: &Value, right: &Value) -> bool {
    match (left, right) {
        (Value::Boolean { value: l }, Value::Boolean { value: r }) => l == r,
        (Value::Tuple { elements: l }, Value::Tuple { elements: r }) => {
            l.len() == r.len()
                && l.iter().zip(r).all(|(l, r)| values_equal(l, r))
        },
        _ => match numeric_pair(left, right) {
            Some(NumericPair::Integers(l, r)) => l == r,
            Some(NumericPair::Floats(l, r)) => l == r,
            None => false,
        }
    }
}

fn eval_ternary(ternary: &Ternary, env: &mut Environment) -> Result<Value, RuntimeError> {
    if eval(&ternary.condition, env)?.is_truthy() {
        eval(&ternary.truthy, env)
    } else {
        eval(&ternary.falsy, env)
    }
}

fn eval_walrus(walrus: &Walrus, env: &mut Environment) -> Result<Value, RuntimeError> {
    let value = eval(&walrus.value, env)?;
    env.set(walrus.name.value.clone(), value.clone());

    Ok(value)
}

fn eval_assign(assign: &Assign, env: &mut Environment) -> Result<Value, RuntimeError> {
    let value = eval(&assign.value, env)?;

    for target in &assign.targets {
        env.set(target.value.clone(), value.clone());
    }

    Ok(value)
}

fn eval_tuple(tuple: &Tuple, env: &mut Environment) -> Result<Value, RuntimeError> {
    let elements = tuple
        .elements
        .iter()
        .map(|element| eval(element, env))
        .collect::<Result<Vec<_>, _>>()?;

    Ok(Value::Tuple { elements })
}

fn type_error<T>(
    operator: &'static str,
    operands: &[&Value],
    location: SrcSpan,
) -> Result<T, RuntimeError> {
    runtime_error(
        RuntimeErrorType::TypeError {
            operator,
            operands: operands.iter().map(|operand| operand.value_type()).collect(),
        },
        location
    )
}

fn overflow_error<T>(operator: &str, location: SrcSpan) -> Result<T, RuntimeError> {
    runtime_error(
        RuntimeErrorType::ValueError {
            reason: format!("integer overflow in `{operator}`"),
        },
        location
    )
}

fn zero_division_error<T>(
    operator: &'static str,
    location: SrcSpan,
) -> Result<T, RuntimeError> {
    runtime_error(RuntimeErrorType::ZeroDivisionError { operator }, location)
}

fn negative_shift_error<T>(location: SrcSpan) -> Result<T, RuntimeError> {
    runtime_error(
        RuntimeErrorType::ValueError {
            reason: "negative shift count".to_string(),
        },
        location
    )
}
