use std::{fmt::Display, rc::Rc};

use crate::parser::prelude::{format_number, Expression, Operator};
use super::prelude::ScopeRef;

#[derive(Debug, Clone)]
pub enum Value {
    Null,
    Number(f64),
    Boolean(bool),
    String(String),
    List(Rc<Vec<Value>>),
    Primitive(Operator),
    Closure(Rc<Closure>),
}

/// A function value together with the scope it was defined in. The fields
/// are fixed once the closure is built.
pub struct Closure {
    name: Option<String>,
    params: Vec<String>,
    body: Rc<[Expression]>,
    scope: ScopeRef,
}

impl Closure {
    pub fn new(
        name: Option<String>,
        params: Vec<String>,
        body: Rc<[Expression]>,
        scope: ScopeRef
    ) -> Self {
        Self { name, params, body, scope }
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn params(&self) -> &[String] {
        &self.params
    }

    pub fn body(&self) -> &[Expression] {
        &self.body
    }

    pub fn scope(&self) -> &ScopeRef {
        &self.scope
    }
}

impl std::fmt::Debug for Closure {
    // the captured scope usually holds the closure itself
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Closure")
            .field("name", &self.name)
            .field("params", &self.params)
            .field("body", &self.body)
            .finish_non_exhaustive()
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Null, Self::Null) => true,
            (Self::Number(left), Self::Number(right)) => left == right,
            (Self::Boolean(left), Self::Boolean(right)) => left == right,
            (Self::String(left), Self::String(right)) => left == right,
            (Self::List(left), Self::List(right)) => left == right,
            (Self::Primitive(left), Self::Primitive(right)) => left == right,
            (Self::Closure(left), Self::Closure(right)) => Rc::ptr_eq(left, right),
            _ => false
        }
    }
}

impl Value {
    pub fn _type(&self) -> ValueType {
        match self {
            Self::Null => ValueType::Null,
            Self::Number(_) => ValueType::Number,
            Self::Boolean(_) => ValueType::Boolean,
            Self::String(_) => ValueType::String,
            Self::List(_) => ValueType::List,
            Self::Primitive(_) | Self::Closure(_) => ValueType::Function,
        }
    }

    /// Host truthiness: `null`, `false`, `0`, `NaN` and `""` are falsy.
    pub fn is_truthy(&self) -> bool {
        match self {
            Self::Null => false,
            Self::Boolean(value) => *value,
            Self::Number(value) => *value != 0.0 && !value.is_nan(),
            Self::String(value) => !value.is_empty(),
            Self::List(_) | Self::Primitive(_) | Self::Closure(_) => true,
        }
    }

    pub fn is_callable(&self) -> bool {
        matches!(self, Self::Primitive(_) | Self::Closure(_))
    }
}

impl Display for Value {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Null => write!(f, "null"),
            Self::Number(value) => write!(f, "{}", format_number(*value)),
            Self::Boolean(value) => write!(f, "{value}"),
            Self::String(value) => write!(f, "{value}"),
            Self::List(items) => {
                let items = items.iter()
                    .map(|item| match item {
                        Self::String(value) => format!("{value:?}"),
                        item => format!("{item}")
                    })
                    .collect::<Vec<String>>();

                write!(f, "[{}]", items.join(", "))
            },
            Self::Primitive(op) => write!(f, "[primitive {op}]"),
            Self::Closure(closure) => match closure.name() {
                Some(name) => write!(f, "[fn {name}]"),
                None => write!(f, "[fn]"),
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueType {
    Null,
    Number,
    Boolean,
    String,
    List,
    Function,
}
