use super::prelude::{dedent, tokenize, Lexer, LexicalError, LexicalErrorType, Token};

fn tokens_of(input: &str) -> Result<Vec<Token>, LexicalError> {
    Ok(tokenize(input)?.into_iter().map(|(_, token, _)| token).collect())
}

#[test]
fn test_punctuation_and_idents() -> std::result::Result<(), LexicalError> {
    assert_eq!(
        tokens_of("(a b)")?,
        vec![
            Token::Punct('('),
            Token::Ident("a".into()),
            Token::Ident("b".into()),
            Token::Punct(')'),
        ]
    );

    assert_eq!(
        tokens_of("[ {x: y} ]")?,
        vec![
            Token::Punct('['),
            Token::Punct('{'),
            Token::Ident("x".into()),
            Token::Punct(':'),
            Token::Ident("y".into()),
            Token::Punct('}'),
            Token::Punct(']'),
        ]
    );

    Ok(())
}

#[test]
fn test_operators() -> std::result::Result<(), LexicalError> {
    assert_eq!(
        tokens_of("< > >= +")?,
        vec![
            Token::Operator("<".into()),
            Token::Operator(">".into()),
            Token::Operator(">=".into()),
            Token::Punct('+'),
        ]
    );

    assert_eq!(
        tokens_of("== != <= * / -")?,
        vec![
            Token::Operator("==".into()),
            Token::Operator("!=".into()),
            Token::Operator("<=".into()),
            Token::Operator("*".into()),
            Token::Operator("/".into()),
            Token::Punct('-'),
        ]
    );

    // greedy: `<=` then `=`
    assert_eq!(
        tokens_of("<==")?,
        vec![Token::Operator("<=".into()), Token::Operator("=".into())]
    );

    Ok(())
}

#[test]
fn test_numbers_and_keywords() -> std::result::Result<(), LexicalError> {
    let tokens = tokens_of("42 007 true false Infinity")?;

    assert_eq!(
        tokens,
        vec![
            Token::Number(42.0),
            Token::Number(7.0),
            Token::Boolean(true),
            Token::Boolean(false),
            Token::Number(f64::INFINITY),
        ]
    );

    match tokens_of("NaN")?.as_slice() {
        [Token::Number(value)] => assert!(value.is_nan()),
        other => panic!("expected NaN, got {other:?}"),
    }

    // long numerals round once, not once per digit
    assert_eq!(
        tokens_of("123456789012345678901234567890")?,
        vec![Token::Number(1.2345678901234568e29)]
    );
    assert_eq!(tokens_of("9007199254740993")?, vec![Token::Number(9007199254740992.0)]);

    // no fractions: `1.5` is a number, a dot and a number
    assert_eq!(
        tokens_of("1.5")?,
        vec![Token::Number(1.0), Token::Punct('.'), Token::Number(5.0)]
    );

    Ok(())
}

#[test]
fn test_identifier_shapes() -> std::result::Result<(), LexicalError> {
    assert_eq!(
        tokens_of("$el _tmp kebab-case console.log x1")?,
        vec![
            Token::Ident("$el".into()),
            Token::Ident("_tmp".into()),
            Token::Ident("kebab-case".into()),
            Token::Ident("console.log".into()),
            Token::Ident("x1".into()),
        ]
    );

    // digits stop a number even when letters follow
    assert_eq!(
        tokens_of("12abc")?,
        vec![Token::Number(12.0), Token::Ident("abc".into())]
    );

    Ok(())
}

#[test]
fn test_strings() -> std::result::Result<(), LexicalError> {
    assert_eq!(
        tokens_of(r#""sup" 'it''s'"#)?,
        vec![
            Token::Str("sup".into()),
            Token::Str("it".into()),
            Token::Str("s".into()),
        ]
    );

    // single-line literals are verbatim
    assert_eq!(tokens_of("'  padded  '")?, vec![Token::Str("  padded  ".into())]);

    Ok(())
}

#[test]
fn test_multiline_string_dedent() -> std::result::Result<(), LexicalError> {
    let input = "\"\n  first\n    second\n\n    third\n\"";

    assert_eq!(
        tokens_of(input)?,
        vec![Token::Str("first\n  second\n  third".into())]
    );

    assert_eq!(dedent("    a\r\n  b"), "  a\r\nb");
    assert_eq!(dedent("\n\n   x\n   \n"), "x");

    Ok(())
}

#[test]
fn test_carriage_returns() -> std::result::Result<(), LexicalError> {
    assert_eq!(
        tokens_of("(a\r\nb)")?,
        vec![
            Token::Punct('('),
            Token::Ident("a".into()),
            Token::Ident("b".into()),
            Token::Punct(')'),
        ]
    );

    assert_eq!(tokens_of("'a\r\n  b'")?, vec![Token::Str("a\n  b".into())]);

    // `\r` does not count as a column
    let err = tokenize("\r\r~").unwrap_err();
    assert_eq!((err.position.line, err.position.column), (1, 1));

    Ok(())
}

#[test]
fn test_spans() -> std::result::Result<(), LexicalError> {
    let tokens = tokenize("(foo 12)")?;

    assert_eq!(
        tokens,
        vec![
            (0, Token::Punct('('), 1),
            (1, Token::Ident("foo".into()), 4),
            (5, Token::Number(12.0), 7),
            (7, Token::Punct(')'), 8),
        ]
    );

    Ok(())
}

#[test]
fn test_invalid_input() {
    let fails = vec![
        ("~", LexicalErrorType::UnrecognizedToken { tok: '~' }, (1, 1)),
        ("(a\n  #)", LexicalErrorType::UnrecognizedToken { tok: '#' }, (2, 3)),
        ("\"abc", LexicalErrorType::UnterminatedString, (1, 1)),
        ("a\n 'abc\n", LexicalErrorType::UnterminatedString, (2, 2)),
        ("(/str 1)", LexicalErrorType::UnexpectedInternalCall, (1, 2)),
        ("\tx", LexicalErrorType::UnrecognizedToken { tok: '\t' }, (1, 1)),
    ];

    for (idx, (input, fail, (line, column))) in fails.into_iter().enumerate() {
        let err = match tokenize(input) {
            Err(err) => err,
            Ok(value) => {
                panic!("Stopped at {fail:?} ({idx}). Expected Err but got Ok({value:?})");
            }
        };

        assert_eq!(fail, err.error, "Unexpected error at {}", idx);
        assert_eq!(
            (line, column),
            (err.position.line, err.position.column),
            "Unexpected position at {}",
            idx
        );
    }
}

#[test]
fn test_error_message() {
    let err = tokenize("ab\ncd ~").unwrap_err();

    assert_eq!(err.to_string(), "Syntax error at 2:4: unknown character ~");
}

#[test]
fn test_lexer_is_lazy() {
    let input = "a ~";
    let mut lexer = Lexer::new(input.char_indices().map(|(i, c)| (i as u32, c)));

    assert!(matches!(lexer.next(), Some(Ok((_, Token::Ident(_), _)))));
    assert!(matches!(lexer.next(), Some(Err(_))));
}

#[test]
fn test_whitespace_only() -> std::result::Result<(), LexicalError> {
    assert_eq!(tokens_of("")?, vec![]);
    assert_eq!(tokens_of("  \n\r\n ")?, vec![]);

    Ok(())
}
