use std::cmp::Ordering;

use crate::{
    environment::prelude::Value,
    parser::prelude::{Operator, OperatorKind}
};
use super::error::{runtime_error, RuntimeError, RuntimeErrorType};

/// Applies a built-in operator to already evaluated operands.
pub fn apply_operator(op: Operator, args: &[Value]) -> Result<Value, RuntimeError> {
    match op.kind() {
        OperatorKind::Binary => fold(op, args),
        OperatorKind::Comparison => chain(op, args),
    }
}

/// `(op a b c)` is `((a op b) op c)`; a lone operand comes back unchanged.
fn fold(op: Operator, args: &[Value]) -> Result<Value, RuntimeError> {
    let Some((first, rest)) = args.split_first() else {
        return runtime_error(
            RuntimeErrorType::MissingOperands,
            format!("`{op}` needs at least one operand")
        );
    };

    rest.iter().try_fold(first.clone(), |left, right| eval_infix(op, left, right))
}

/// `(op a b c)` holds iff `a op b` and `b op c` both hold. Every pair is
/// checked, so a bad operand is reported even after a false comparison.
fn chain(op: Operator, args: &[Value]) -> Result<Value, RuntimeError> {
    if args.len() < 2 {
        return runtime_error(
            RuntimeErrorType::MissingOperands,
            format!("`{op}` needs at least two operands, got {}", args.len())
        );
    }

    args.windows(2)
        .try_fold(true, |holds, pair| Ok(compare(op, &pair[0], &pair[1])? && holds))
        .map(Value::Boolean)
}

fn eval_infix(op: Operator, left: Value, right: &Value) -> Result<Value, RuntimeError> {
    match (op, &left, right) {
        (Operator::Add, Value::String(_), _) | (Operator::Add, _, Value::String(_)) => {
            Ok(Value::String(format!("{left}{right}")))
        },
        (Operator::Add, Value::Number(l), Value::Number(r)) => Ok(Value::Number(l + r)),
        (Operator::Sub, Value::Number(l), Value::Number(r)) => Ok(Value::Number(l - r)),
        (Operator::Mul, Value::Number(l), Value::Number(r)) => Ok(Value::Number(l * r)),
        (Operator::Div, Value::Number(l), Value::Number(r)) => Ok(Value::Number(l / r)),
        (op, left, right) => runtime_error(
            RuntimeErrorType::InvalidOperand,
            format!("cannot apply `{op}` to `{:?}` and `{:?}`", left._type(), right._type())
        )
    }
}

fn compare(op: Operator, left: &Value, right: &Value) -> Result<bool, RuntimeError> {
    let ordering = match (op, left, right) {
        (Operator::Eq, _, _) => return Ok(left == right),
        (Operator::Ne, _, _) => return Ok(left != right),
        (_, Value::Number(l), Value::Number(r)) => l.partial_cmp(r),
        (_, Value::String(l), Value::String(r)) => Some(l.cmp(r)),
        (op, left, right) => return runtime_error(
            RuntimeErrorType::InvalidOperand,
            format!("cannot compare `{:?}` with `{:?}` using `{op}`", left._type(), right._type())
        )
    };

    // NaN is unordered, so every ordering comparison with it is false
    let test: fn(Ordering) -> bool = match op {
        Operator::Gt => Ordering::is_gt,
        Operator::Lt => Ordering::is_lt,
        Operator::Ge => Ordering::is_ge,
        Operator::Le => Ordering::is_le,
        op => return runtime_error(
            RuntimeErrorType::UnknownOperator,
            format!("`{op}` is not a comparison")
        )
    };

    Ok(ordering.is_some_and(test))
}
