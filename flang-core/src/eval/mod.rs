pub mod error;
pub mod primitive;

pub mod prelude {
    pub use super::{
        error::*,
        primitive::*,
        apply,
        evaluate,
        evaluate_body,
        is_plain_identifier,
    };
}


use std::rc::Rc;

use crate::{
    parser::prelude::{Expression, Form, Marker, SpecialForm},
    environment::prelude::{Closure, Scope, ScopeRef, Value},
};
use error::{runtime_error, RuntimeError, RuntimeErrorType};
use primitive::apply_operator;

pub fn evaluate(expression: &Expression, scope: &ScopeRef) -> Result<Value, RuntimeError> {
    match expression {
        Expression::Number(value) => Ok(Value::Number(*value)),
        Expression::Boolean(value) => Ok(Value::Boolean(*value)),
        Expression::Identifier(name) => lookup(name, scope),
        Expression::Operator(op) => Ok(Value::Primitive(*op)),
        Expression::Marked(Marker::Str(value)) => Ok(Value::String(value.clone())),
        Expression::Marked(Marker::List(items)) => {
            let items = items.iter()
                .map(|item| evaluate(item, scope))
                .collect::<Result<Vec<Value>, RuntimeError>>()?;

            Ok(Value::List(Rc::new(items)))
        },
        Expression::Form(form) => eval_form(form, scope),
    }
}

/// Evaluates `body` in order directly in `scope` and returns the last value.
pub fn evaluate_body(body: &[Expression], scope: &ScopeRef) -> Result<Value, RuntimeError> {
    body.iter()
        .try_fold(Value::Null, |_, expression| evaluate(expression, scope))
}

/// Calls a function value with already evaluated arguments.
pub fn apply(callee: &Value, args: Vec<Value>) -> Result<Value, RuntimeError> {
    match callee {
        Value::Primitive(op) => apply_operator(*op, &args),
        Value::Closure(closure) => call_closure(closure, args),
        other => runtime_error(
            RuntimeErrorType::NotCallable,
            format!("`{other}` is not a function")
        )
    }
}

fn lookup(name: &str, scope: &ScopeRef) -> Result<Value, RuntimeError> {
    match scope.borrow().get(name) {
        Some(value) => Ok(value),
        None => runtime_error(
            RuntimeErrorType::UnboundVariable,
            format!("`{name}` is not defined")
        )
    }
}

fn eval_form(form: &Form, scope: &ScopeRef) -> Result<Value, RuntimeError> {
    if let Some(special_form) = form.special_form() {
        return eval_special_form(special_form, &form.args, scope);
    }

    let callee = match form.head.as_deref() {
        Some(Expression::Operator(op)) => Value::Primitive(*op),
        Some(Expression::Identifier(name)) => {
            let bound = scope.borrow().get(name);

            match bound {
                Some(value) if value.is_callable() => value,
                _ => return runtime_error(
                    RuntimeErrorType::UnknownOperator,
                    format!("unknown function or operator `{name}`")
                )
            }
        },
        Some(head @ Expression::Form(_)) => {
            let value = evaluate(head, scope)?;

            if !value.is_callable() {
                return runtime_error(
                    RuntimeErrorType::NotCallable,
                    format!("`{head}` evaluated to `{value}`, which is not a function")
                );
            }

            value
        },
        Some(head) => return runtime_error(
            RuntimeErrorType::UnknownOperator,
            format!("`{head}` cannot be called")
        ),
        None => return runtime_error(
            RuntimeErrorType::UnknownOperator,
            "an empty form `()` has nothing to call"
        )
    };

    let args = form.args.iter()
        .map(|arg| evaluate(arg, scope))
        .collect::<Result<Vec<Value>, RuntimeError>>()?;

    apply(&callee, args)
}

fn eval_special_form(
    special_form: SpecialForm,
    args: &[Expression],
    scope: &ScopeRef
) -> Result<Value, RuntimeError> {
    match special_form {
        SpecialForm::Do => evaluate_body(args, &Scope::child(scope)),
        SpecialForm::If => eval_if(args, scope),
        SpecialForm::Fn => eval_fn(args, scope),
        SpecialForm::Def | SpecialForm::Set => eval_binding(special_form, args, scope),
    }
}

fn eval_if(args: &[Expression], scope: &ScopeRef) -> Result<Value, RuntimeError> {
    let (condition, resolution, alternative) = match args {
        [condition, resolution] => (condition, resolution, None),
        [condition, resolution, alternative] => (condition, resolution, Some(alternative)),
        _ => return runtime_error(
            RuntimeErrorType::MalformedSpecialForm,
            format!("`if` expects a condition, a branch and an optional else branch, got {} arguments", args.len())
        )
    };

    if evaluate(condition, scope)?.is_truthy() {
        evaluate(resolution, scope)
    } else {
        match alternative {
            Some(alternative) => evaluate(alternative, scope),
            None => Ok(Value::Null)
        }
    }
}

/// Names usable as parameters and binding targets.
pub fn is_plain_identifier(name: &str) -> bool {
    !name.contains('.')
}

fn eval_fn(args: &[Expression], scope: &ScopeRef) -> Result<Value, RuntimeError> {
    let (name, rest) = match args {
        [Expression::Identifier(name), rest @ ..] => (Some(name.clone()), rest),
        rest => (None, rest)
    };

    let (params, body) = match rest {
        [Expression::Marked(Marker::List(params)), body @ ..] => (params, body),
        _ => return runtime_error(
            RuntimeErrorType::MalformedFunction,
            "`fn` expects a parameter list such as `[a b]`"
        )
    };

    let params = params.iter()
        .map(|param| match param {
            Expression::Identifier(name) if is_plain_identifier(name) => Ok(name.clone()),
            other => runtime_error(
                RuntimeErrorType::MalformedFunction,
                format!("parameter `{other}` is not a plain identifier")
            )
        })
        .collect::<Result<Vec<String>, RuntimeError>>()?;

    let closure = Closure::new(name, params, body.into(), scope.clone());

    Ok(Value::Closure(Rc::new(closure)))
}

fn call_closure(closure: &Rc<Closure>, args: Vec<Value>) -> Result<Value, RuntimeError> {
    let activation = Scope::child(closure.scope());

    {
        let mut activation = activation.borrow_mut();

        // a named function can call itself; parameters shadow the name
        if let Some(name) = closure.name() {
            activation.define(name.to_string(), Value::Closure(closure.clone()));
        }

        let mut args = args.into_iter();

        for param in closure.params() {
            activation.define(param.clone(), args.next().unwrap_or(Value::Null));
        }
    }

    evaluate_body(closure.body(), &Scope::child(&activation))
}

/// `def` always binds in the current scope. `set` rebinds the nearest scope
/// that already has the name and falls back to the current scope.
fn eval_binding(
    special_form: SpecialForm,
    args: &[Expression],
    scope: &ScopeRef
) -> Result<Value, RuntimeError> {
    let (name, value) = match args {
        [Expression::Identifier(name), value] if is_plain_identifier(name) => (name, value),
        _ => return runtime_error(
            RuntimeErrorType::MalformedSpecialForm,
            format!("`{}` expects a name and a value", special_form.as_literal())
        )
    };

    let value = evaluate(value, scope)?;

    if special_form == SpecialForm::Set {
        let unbound = scope.borrow_mut().assign(name, value.clone());

        if let Err(value) = unbound {
            scope.borrow_mut().define(name.clone(), value);
        }
    } else {
        scope.borrow_mut().define(name.clone(), value.clone());
    }

    Ok(value)
}
