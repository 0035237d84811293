use std::fmt::Display;

use crate::{lexer::prelude::{LexicalError, Token}, utils::prelude::SrcSpan};

#[derive(Debug, Clone, PartialEq)]
pub enum ParseErrorType {
    UnexpectedToken {
        token: Token,
        expected: Vec<String>,
    },
    UnclosedGrouping {
        opening: char,
    },
    LexError { error: LexicalError },
}

#[derive(Debug, Clone, PartialEq)]
pub struct ParseError {
    pub error: ParseErrorType,
    pub span: SrcSpan
}

impl ParseError {
    pub fn details(&self) -> (&'static str, Vec<String>) {
        match &self.error {
            ParseErrorType::UnexpectedToken { token, expected } => {
                let found = match token {
                    Token::Number(_) => "a Number".to_string(),
                    Token::Str(_) => "a String".to_string(),
                    Token::Ident(_) => "an Identifier".to_string(),
                    _ => format!("`{}`", token.as_literal())
                };

                let messages = std::iter::once(format!("Found {found}, expected one of: "))
                    .chain(expected.iter().map(|s| format!("- {s}")))
                    .collect();

                ("Not expected this", messages)
            },
            ParseErrorType::UnclosedGrouping { opening } => {
                let closing = match opening {
                    '(' => ')',
                    _ => ']',
                };

                ("This is never closed", vec![format!("Expected `{closing}` before the end of input")])
            },
            ParseErrorType::LexError { error } => error.details()
        }
    }
}

impl Display for ParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.error {
            ParseErrorType::UnexpectedToken { token, .. } => {
                write!(f, "Unexpected {} at {}", token.as_literal(), self.span)
            },
            ParseErrorType::UnclosedGrouping { opening } => {
                write!(f, "Unclosed `{}` at {}", opening, self.span)
            },
            ParseErrorType::LexError { error } => write!(f, "{error}")
        }
    }
}

impl std::error::Error for ParseError {}

impl From<LexicalError> for ParseError {
    fn from(error: LexicalError) -> Self {
        Self {
            span: error.location,
            error: ParseErrorType::LexError { error },
        }
    }
}
