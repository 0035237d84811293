use super::error::{LexicalError, LexicalErrorType};
use super::token::{is_ident_continue, is_ident_start, str_to_keyword, Token, PUNCTUATION};
use crate::utils::prelude::{LineColumn, SrcSpan};

pub type Spanned = (u32, Token, u32);
pub type LexResult = std::result::Result<Spanned, LexicalError>;

/// Every operator the lexer knows. `+` and `-` never reach the operator
/// scanner because they are punctuation, but they still belong here so that
/// prefix matching agrees with the parser's operator table.
pub const OPERATORS: [&str; 10] = ["+", "-", "*", "/", ">", "<", ">=", "<=", "==", "!="];

fn can_be_operator(so_far: &str, ch: char) -> bool {
	let mut candidate = String::from(so_far);
	candidate.push(ch);

	OPERATORS.iter().any(|op| op.starts_with(&candidate))
}

#[derive(Debug)]
pub struct Lexer<T: Iterator<Item = (u32, char)>> {
	position: u32,
	next_position: u32,
	line_column: LineColumn,
	ch: Option<char>,
	next_ch: Option<char>,
	input: T,
}

impl<T: Iterator<Item = (u32, char)>> Lexer<T> {
	pub fn new(input: T) -> Self {
        let mut lexer = Self {
            position: 0,
            next_position: 0,
            line_column: LineColumn::default(),
            ch: None,
			next_ch: None,
            input,
        };

        lexer.next_char();
        lexer.next_char();

        lexer
    }

    pub fn next_token(&mut self) -> Option<LexResult> {
		while let Some(' ' | '\n' | '\r') = self.ch {
			self.next_char();
		}

		let ch = self.ch?;

		let result = match ch {
			c if PUNCTUATION.contains(c) => Ok(self.eat_one_char(Token::Punct(c))),
			'0'..='9' => Ok(self.lex_number()),
			c if is_ident_start(c) => Ok(self.lex_ident()),
			'\'' | '"' => self.lex_string(),
			c if can_be_operator("", c) => self.lex_operator(),
			c => {
				let start = self.position;
				Err(self.error(
					LexicalErrorType::UnrecognizedToken { tok: c },
					SrcSpan::from(start, start + c.len_utf8() as u32),
					self.line_column
				))
			}
		};

		Some(result)
    }

	fn next_char(&mut self) -> Option<char> {
		let ch = self.ch;

		if let Some(ch) = ch {
			self.line_column.advance(ch);
		}

		let next = match self.input.next() {
			Some((pos, ch)) => {
				self.position = self.next_position;
				self.next_position = pos;

				Some(ch)
			},
			None => {
				self.position = self.next_position;
				self.next_position += self.next_ch.map_or(0, |ch| ch.len_utf8() as u32);

				None
			}
		};

		self.ch = self.next_ch;
		self.next_ch = next;

		ch
	}

	fn error(&self, error: LexicalErrorType, location: SrcSpan, position: LineColumn) -> LexicalError {
		LexicalError { error, location, position }
	}

	fn eat_one_char(&mut self, token: Token) -> Spanned {
		let start_pos = self.position;
		self.next_char();
		let end_pos = self.position;

		(start_pos, token, end_pos)
	}

	fn lex_ident(&mut self) -> Spanned {
        let start_pos = self.position;
		let mut ident = String::new();

		while let Some(ch) = self.ch.filter(|ch| is_ident_continue(*ch)) {
			self.next_char();
			ident.push(ch);
		}

        let end_pos = self.position;

        match str_to_keyword(&ident) {
			Some(tok) => (start_pos, tok, end_pos),
			None => (start_pos, Token::Ident(ident), end_pos)
		}
	}

	fn lex_number(&mut self) -> Spanned {
		let start_pos = self.position;
		let mut digits = String::new();

		while let Some(ch) = self.ch.filter(char::is_ascii_digit) {
			self.next_char();
			digits.push(ch);
		}

		let end_pos = self.position;
		// a non-empty digit run always parses, rounded once like the host does
		let value = digits.parse::<f64>().unwrap_or(f64::NAN);

		(start_pos, Token::Number(value), end_pos)
	}

	fn lex_string(&mut self) -> LexResult {
		let start_pos = self.position;
		let start_line_column = self.line_column;
		let quote = self.next_char();

		let mut value = String::new();

		loop {
			match self.ch {
				Some(ch) if Some(ch) == quote => break,
				Some('\r') => {
					self.next_char();
				},
				Some(ch) => {
					self.next_char();
					value.push(ch);
				},
				None => {
					return Err(self.error(
						LexicalErrorType::UnterminatedString,
						SrcSpan::from(start_pos, self.position),
						start_line_column
					));
				}
			}
		}

		self.next_char(); // closing quote

		let end_pos = self.position;

		let value = if value.contains('\n') {
			dedent(&value)
		} else {
			value
		};

		Ok((start_pos, Token::Str(value), end_pos))
	}

	fn lex_operator(&mut self) -> LexResult {
		let start_pos = self.position;

		if self.ch == Some('/') && self.next_ch.is_some_and(is_ident_start) {
			return Err(self.error(
				LexicalErrorType::UnexpectedInternalCall,
				SrcSpan::from(start_pos, self.next_position + 1),
				self.line_column
			));
		}

		let mut operator = String::new();

		while let Some(ch) = self.ch.filter(|ch| can_be_operator(&operator, *ch)) {
			self.next_char();
			operator.push(ch);
		}

		let end_pos = self.position;

		Ok((start_pos, Token::Operator(operator), end_pos))
	}
}

impl<T: Iterator<Item = (u32, char)>> Iterator for Lexer<T> {
	type Item = LexResult;

	fn next(&mut self) -> Option<Self::Item> {
		self.next_token()
	}
}

/// Strips the indentation shared by every non-blank line and drops blank
/// lines altogether.
pub fn dedent(text: &str) -> String {
	let lines = text.split('\n')
		.filter(|line| !line.trim().is_empty())
		.collect::<Vec<&str>>();

	let indent = lines.iter()
		.map(|line| line.chars().take_while(|ch| matches!(ch, ' ' | '\t')).count())
		.min()
		.unwrap_or(0);

	lines.iter()
		.map(|line| line.chars().skip(indent).collect::<String>())
		.collect::<Vec<String>>()
		.join("\n")
}

pub fn tokenize(source: &str) -> Result<Vec<Spanned>, LexicalError> {
	Lexer::new(source.char_indices().map(|(i, c)| (i as u32, c))).collect()
}
