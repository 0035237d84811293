use std::fmt::Display;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompileErrorType {
    UnknownExpressionForm,
    MisplacedDefinition,
    MalformedSpecialForm,
    MalformedFunction,
    MissingOperands,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CompileError {
    pub error: CompileErrorType,
    pub message: String,
}

impl CompileError {
    pub fn title(&self) -> &'static str {
        match self.error {
            CompileErrorType::UnknownExpressionForm => "Unknown expression form",
            CompileErrorType::MisplacedDefinition => "Misplaced definition",
            CompileErrorType::MalformedSpecialForm => "Malformed special form",
            CompileErrorType::MalformedFunction => "Malformed function",
            CompileErrorType::MissingOperands => "Missing operands",
        }
    }
}

impl Display for CompileError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.title(), self.message)
    }
}

impl std::error::Error for CompileError {}

pub fn compile_error<T>(error: CompileErrorType, message: impl Into<String>) -> Result<T, CompileError> {
    Err(CompileError { error, message: message.into() })
}
