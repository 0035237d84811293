use crate::{lexer::prelude::{LexResult, LexicalError, Lexer, Spanned, Token}, utils::prelude::SrcSpan};
use super::error::{ParseError, ParseErrorType};
use super::ast::{Expression, Form, Operator};

const EXPRESSION_START: [&str; 5] = ["`(`", "`[`", "a literal", "an identifier", "an operator"];

pub struct Parser<T: Iterator<Item = LexResult>> {
    pub current_token: Option<Spanned>,
    pub next_token: Option<Spanned>,
    pub lex_errors: Vec<LexicalError>,

    tokens: T,
}

impl<T: Iterator<Item = LexResult>> Parser<T> {
    pub fn new(input: T) -> Self {
        let mut parser = Self {
            current_token: None,
            next_token: None,
            lex_errors: vec![],

            tokens: input,
        };

        parser.step();
        parser.step();

        parser
    }

    pub fn step(&mut self) {
        let _ = self.next_token();
    }

    pub fn next_token(&mut self) -> Option<Spanned> {
        let t = self.current_token.take();
        let mut next = None;

        // a lexer does not advance past a bad character, so stop pulling
        if self.lex_errors.is_empty() {
            match self.tokens.next() {
                Some(Err(err)) => self.lex_errors.push(err),
                Some(Ok(tok)) => next = Some(tok),
                None => {}
            }
        }

        self.current_token = self.next_token.take();
        self.next_token = next.take();

        t
    }

    /// Parses every expression up to the end of input into the `Program`
    /// root, an implicit `do` form.
    pub fn parse(&mut self) -> Result<Expression, ParseError> {
        let mut body = vec![];

        let result = loop {
            let Some(spanned) = self.next_token() else {
                break Ok(());
            };

            match self.parse_expression(spanned) {
                Ok(expression) => body.push(expression),
                Err(err) => break Err(err),
            }
        };

        if let Some(error) = self.lex_errors.first() {
            return Err((*error).into());
        }

        result?;

        Ok(Expression::program(body))
    }

    /// Builds the expression that starts with an already pulled token.
    pub fn parse_expression(&mut self, (start, token, end): Spanned) -> Result<Expression, ParseError> {
        match token {
            Token::Str(value) => Ok(Expression::string(value)),
            Token::Number(value) => Ok(Expression::Number(value)),
            Token::Boolean(value) => Ok(Expression::Boolean(value)),
            Token::Ident(name) => Ok(Expression::Identifier(name)),
            Token::Punct('(') => {
                let mut items = self.parse_sequence('(', ')', SrcSpan { start, end })?.into_iter();

                Ok(match items.next() {
                    Some(head) => Expression::form(head, items.collect()),
                    None => Expression::Form(Form::empty())
                })
            },
            Token::Punct('[') => {
                let items = self.parse_sequence('[', ']', SrcSpan { start, end })?;

                Ok(Expression::list(items))
            },
            Token::Punct(ch @ ('+' | '-')) => match Operator::from_symbol(&ch.to_string()) {
                Some(op) => Ok(Expression::Operator(op)),
                None => unexpected(Token::Punct(ch), SrcSpan { start, end })
            },
            Token::Operator(symbol) => match Operator::from_symbol(&symbol) {
                Some(op) => Ok(Expression::Operator(op)),
                None => unexpected(Token::Operator(symbol), SrcSpan { start, end })
            },
            token => unexpected(token, SrcSpan { start, end })
        }
    }

    fn parse_sequence(
        &mut self,
        opening: char,
        closing: char,
        opening_span: SrcSpan
    ) -> Result<Vec<Expression>, ParseError> {
        let mut items = vec![];

        loop {
            match self.next_token() {
                Some((_, Token::Punct(ch), _)) if ch == closing => return Ok(items),
                Some(spanned) => items.push(self.parse_expression(spanned)?),
                None => return parse_error(
                    ParseErrorType::UnclosedGrouping { opening },
                    opening_span
                )
            }
        }
    }
}

pub fn parse(src: &str) -> Result<Expression, ParseError> {
    let lexer = Lexer::new(src.char_indices().map(|(i, c)| (i as u32, c)));
    let mut parser = Parser::new(lexer);

    parser.parse()
}

pub fn parse_from_stream(stream: impl Iterator<Item = char>) -> Result<Expression, ParseError> {
    let lexer = Lexer::new(stream
        .scan(0, |pos, c| {
            *pos += c.len_utf8() as u32;
            Some((*pos - c.len_utf8() as u32, c))
        })
    );
    let mut parser = Parser::new(lexer);

    parser.parse()
}

fn unexpected<T>(token: Token, span: SrcSpan) -> Result<T, ParseError> {
    parse_error(
        ParseErrorType::UnexpectedToken {
            token,
            expected: EXPRESSION_START.iter().map(|s| s.to_string()).collect(),
        },
        span
    )
}

pub fn parse_error<T>(error: ParseErrorType, span: SrcSpan) -> Result<T, ParseError> {
    Err(ParseError { error, span })
}
