use crate::{parse_compile, parse_evaluate};

use super::prelude::{LineColumn, SrcSpan};

#[test]
fn test_line_column() {
    let mut position = LineColumn::default();
    assert_eq!(position.to_string(), "1:1");

    for ch in "ab\r\ncd".chars() {
        position.advance(ch);
    }

    assert_eq!(position, LineColumn { line: 2, column: 3 });
}

#[test]
fn test_span_display() {
    assert_eq!(SrcSpan::from(3, 7).to_string(), "3..7");
}

#[test]
fn test_pretty_syntax_error() {
    let Err(error) = parse_evaluate("(+ 1 ~)") else {
        panic!("`~` should not lex");
    };

    let report = error.pretty_string();

    assert!(report.contains("Syntax error"));
    assert!(report.contains("<input>:1:6"));
    assert!(report.contains("Unknown character `~`"));
}

#[test]
fn test_pretty_unclosed_grouping() {
    let Err(error) = parse_evaluate("(do\n  (+ 1 2)") else {
        panic!("unbalanced input should not parse");
    };

    let report = error.pretty_string();

    assert!(report.contains("This is never closed"));
    assert!(report.contains("Expected `)` before the end of input"));
}

#[test]
fn test_pretty_runtime_error() {
    let Err(error) = parse_evaluate("missing") else {
        panic!("`missing` should be unbound");
    };

    assert_eq!(error.pretty_string(), "error: Unbound variable\n\n`missing` is not defined\n\n");
}

#[test]
fn test_pretty_compile_error() {
    let Err(error) = parse_compile("(if 1)") else {
        panic!("`(if 1)` should not compile");
    };

    assert!(error.pretty_string().starts_with("error: Malformed special form\n\n"));
}
