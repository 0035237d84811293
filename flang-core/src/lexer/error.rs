use std::fmt::Display;

use crate::utils::prelude::{LineColumn, SrcSpan};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LexicalErrorType {
    UnrecognizedToken { tok: char },
    UnterminatedString,
    UnexpectedInternalCall,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LexicalError {
    pub error: LexicalErrorType,
    pub location: SrcSpan,
    pub position: LineColumn,
}

impl LexicalError {
    pub fn details(&self) -> (&'static str, Vec<String>) {
        match self.error {
            LexicalErrorType::UnrecognizedToken { tok } => {
                ("I don't know what to do with this character", vec![
                    format!("Unknown character `{}`", tok.escape_default())
                ])
            },
            LexicalErrorType::UnterminatedString => {
                ("This string is never closed", vec![])
            },
            LexicalErrorType::UnexpectedInternalCall => {
                ("Unexpected internal call", vec![
                    "Names starting with `/` are reserved for internal markers".into()
                ])
            }
        }
    }
}

impl Display for LexicalError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let message = match self.error {
            LexicalErrorType::UnrecognizedToken { tok } => format!("unknown character {tok}"),
            LexicalErrorType::UnterminatedString => "unterminated string".to_string(),
            LexicalErrorType::UnexpectedInternalCall => "unexpected internal call".to_string(),
        };

        write!(f, "Syntax error at {}: {}", self.position, message)
    }
}

impl std::error::Error for LexicalError {}
