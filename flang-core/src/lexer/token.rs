use std::fmt::Display;

pub const PUNCTUATION: &str = "()[]{}:.-+";

#[derive(Debug, Clone, PartialEq)]
pub enum Token {
    // ( ) [ ] { } : . - +
    Punct(char),
    // {/ <digit> /}, NaN, Infinity
    Number(f64),
    // true | false
    Boolean(bool),
    // (<letter>|_|$){<letter>|<digit>|_|$|-|.}
    Ident(String),
    // longest run matching a prefix of * / > < >= <= == !=
    Operator(String),
    // '...' | "..." after dedent
    Str(String),
}

impl Token {
    pub fn as_literal(&self) -> String {
        match self {
            Token::Punct(ch) => ch.to_string(),
            Token::Number(value) if value.is_nan() => "NaN".to_string(),
            Token::Number(value) if value.is_infinite() => "Infinity".to_string(),
            Token::Number(value) => format!("{}", value),
            Token::Boolean(value) => format!("{}", value),
            Token::Ident(value) => value.clone(),
            Token::Operator(value) => value.clone(),
            Token::Str(value) => format!("{:?}", value),
        }
    }
}

impl Display for Token {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_literal())
    }
}

pub fn str_to_keyword(word: &str) -> Option<Token> {
	Some(match word {
		"true" => Token::Boolean(true),
		"false" => Token::Boolean(false),
		"NaN" => Token::Number(f64::NAN),
		"Infinity" => Token::Number(f64::INFINITY),
		_ => return None
	})
}

pub fn is_ident_start(ch: char) -> bool {
    ch.is_ascii_alphabetic() || ch == '_' || ch == '$'
}

pub fn is_ident_continue(ch: char) -> bool {
    is_ident_start(ch) || ch.is_ascii_digit() || ch == '-' || ch == '.'
}
