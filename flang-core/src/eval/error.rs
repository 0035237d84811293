use std::fmt::Display;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RuntimeErrorType {
    UnboundVariable,
    UnknownOperator,
    MalformedFunction,
    MalformedSpecialForm,
    NotCallable,
    InvalidOperand,
    MissingOperands,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RuntimeError {
    pub kind: RuntimeErrorType,
    pub message: String,
}

impl RuntimeError {
    pub fn new(kind: RuntimeErrorType, message: impl Into<String>) -> Self {
        Self { kind, message: message.into() }
    }

    pub fn title(&self) -> &'static str {
        match self.kind {
            RuntimeErrorType::UnboundVariable => "Unbound variable",
            RuntimeErrorType::UnknownOperator => "Unknown function or operator",
            RuntimeErrorType::MalformedFunction => "Malformed function",
            RuntimeErrorType::MalformedSpecialForm => "Malformed special form",
            RuntimeErrorType::NotCallable => "Not a function",
            RuntimeErrorType::InvalidOperand => "Invalid operand",
            RuntimeErrorType::MissingOperands => "Missing operands",
        }
    }
}

impl Display for RuntimeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.title(), self.message)
    }
}

impl std::error::Error for RuntimeError {}

pub fn runtime_error<T>(kind: RuntimeErrorType, message: impl Into<String>) -> Result<T, RuntimeError> {
    Err(RuntimeError::new(kind, message))
}
