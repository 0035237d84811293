use std::process::Command;

use crate::{
    environment::prelude::Value,
    parse_compile,
    parse_evaluate,
    parser::prelude::{format_number, parse, Expression},
    utils::prelude::Error,
};

use super::{codegen::{compile, mangle, number_literal, string_literal}, error::{CompileError, CompileErrorType}};

fn emit(source: &str) -> Result<String, CompileError> {
    compile(&parse(source).expect("test source should parse"))
}

fn emit_err(source: &str) -> CompileErrorType {
    match emit(source) {
        Err(err) => err.error,
        Ok(code) => panic!("Expected an error from `{source}`, got `{code}`"),
    }
}

#[test]
fn test_atoms() -> Result<(), CompileError> {
    assert_eq!(emit("")?, "null");
    assert_eq!(emit("42")?, "42");
    assert_eq!(emit("true")?, "true");
    assert_eq!(emit("'sup'")?, "\"sup\"");
    assert_eq!(emit("[1 'a' []]")?, "[1, \"a\", []]");
    assert_eq!(emit("my-var")?, "my$_var");
    assert_eq!(emit("NaN")?, "NaN");

    Ok(())
}

#[test]
fn test_literals() {
    assert_eq!(number_literal(1.5), "1.5");
    assert_eq!(number_literal(-2.0), "(-2)");
    assert_eq!(number_literal(f64::NEG_INFINITY), "(-Infinity)");
    assert_eq!(
        string_literal("line\n\"q\"\\\t\u{1}"),
        "\"line\\n\\\"q\\\"\\\\\\t\\u0001\""
    );
    assert_eq!(compile(&Expression::string("x\r")).ok(), Some("\"x\\r\"".to_string()));
}

#[test]
fn test_operators() -> Result<(), CompileError> {
    assert_eq!(emit("(+ 1 2 3)")?, "((1 + 2) + 3)");
    assert_eq!(emit("(- 10 2 3)")?, "((10 - 2) - 3)");
    assert_eq!(emit("(- 5)")?, "(5)");
    assert_eq!(emit("(== a b)")?, "(a === b)");
    assert_eq!(emit("(!= 1 2)")?, "(1 !== 2)");
    assert_eq!(
        emit("(< 1 (f) 3)")?,
        "((_0, _1, _2) => _0 < _1 && _1 < _2)(1, f(), 3)"
    );
    assert_eq!(
        emit("+")?,
        "((...args) => args.reduce((left, right) => left + right))"
    );
    assert_eq!(
        emit("==")?,
        "((...args) => args.slice(1).every((right, i) => args[i] === right))"
    );

    Ok(())
}

#[test]
fn test_if() -> Result<(), CompileError> {
    assert_eq!(emit("(if a 1 2)")?, "(a ? 1 : 2)");
    assert_eq!(emit("(if a 1)")?, "(a ? 1 : null)");

    assert_eq!(emit_err("(if 1)"), CompileErrorType::MalformedSpecialForm);

    Ok(())
}

#[test]
fn test_blocks() -> Result<(), CompileError> {
    assert_eq!(emit("(do)")?, "null");
    assert_eq!(emit("(do 1 2)")?, "(() => { 1; return 2; })()");
    assert_eq!(emit("(def x 1) (+ x 1)")?, "(() => { let x = 1; return (x + 1); })()");
    // a trailing definition is the block's value
    assert_eq!(emit("(def x 1)")?, "(() => { let x = 1; return x; })()");
    assert_eq!(emit("(do (def x 1))")?, "(() => { let x = 1; return x; })()");
    // redefinition in the same block assigns
    assert_eq!(
        emit("(def x 1) (def x 2) x")?,
        "(() => { let x = 1; x = 2; return x; })()"
    );
    assert_eq!(emit("(set x 2)")?, "(x = 2)");

    Ok(())
}

#[test]
fn test_functions() -> Result<(), CompileError> {
    assert_eq!(emit("(fn [a b] (+ a b))")?, "((a, b) => { return (a + b); })");
    assert_eq!(emit("(fn fact [n] n)")?, "(function fact(n) { return n; })");
    assert_eq!(emit("(fn [])")?, "(() => { return null; })");
    // parameters are already declared in the function body
    assert_eq!(emit("(fn [x] (def x 2) x)")?, "((x) => { x = 2; return x; })");
    // nested bodies declare their own names
    assert_eq!(
        emit("(fn [] (def y 1) (fn [] (def y 2) y))")?,
        "(() => { let y = 1; return (() => { let y = 2; return y; }); })"
    );

    Ok(())
}

#[test]
fn test_calls() -> Result<(), CompileError> {
    assert_eq!(emit("(my-fn 1 2)")?, "my$_fn(1, 2)");
    assert_eq!(emit("(console.log 'hi')")?, "console.log(\"hi\")");
    assert_eq!(emit("((fn [x] x) 42)")?, "(((x) => { return x; }))(42)");

    Ok(())
}

#[test]
fn test_errors() {
    assert_eq!(emit_err("()"), CompileErrorType::UnknownExpressionForm);
    assert_eq!(emit_err("(1 2)"), CompileErrorType::UnknownExpressionForm);
    assert_eq!(emit_err("(+)"), CompileErrorType::MissingOperands);
    assert_eq!(emit_err("(< 1)"), CompileErrorType::MissingOperands);
    assert_eq!(emit_err("(fn x)"), CompileErrorType::MalformedFunction);
    assert_eq!(emit_err("(fn [1] 1)"), CompileErrorType::MalformedFunction);
    assert_eq!(emit_err("(def 1 2)"), CompileErrorType::MalformedSpecialForm);
    assert_eq!(emit_err("(if (def x 1) 2)"), CompileErrorType::MisplacedDefinition);
    assert_eq!(emit_err("[(def x 1)]"), CompileErrorType::MisplacedDefinition);
}

#[test]
fn test_identifiers() -> Result<(), CompileError> {
    // hyphens and dollars are escaped so distinct names stay distinct
    assert_eq!(mangle("a-b"), "a$_b");
    assert_eq!(mangle("a_b"), "a_b");
    assert_eq!(mangle("a$_b"), "a$$_b");
    assert_eq!(mangle("$"), "$$");
    assert_eq!(
        emit("(def a-b 1) (def a_b 2) a-b")?,
        "(() => { let a$_b = 1; let a_b = 2; return a$_b; })()"
    );

    // reserved words
    assert_eq!(mangle("new"), "new$");
    assert_eq!(mangle("new$"), "new$$");
    assert_eq!(emit("(def new 1) new")?, "(() => { let new$ = 1; return new$; })()");
    assert_eq!(emit("((fn [this] this) 3)")?, "(((this$) => { return this$; }))(3)");
    assert_eq!(emit("(fn class [] 1)")?, "(function class$() { return 1; })");

    // property segments are not bindings
    assert_eq!(emit("(console.log 'hi')")?, "console.log(\"hi\")");
    assert_eq!(mangle("obj.new.my-key"), "obj.new.my$_key");
    assert_eq!(mangle("this.x"), "this$.x");

    Ok(())
}

/// The value `JSON.stringify` prints for `value`.
fn to_json(value: &Value) -> String {
    match value {
        Value::Null => "null".to_string(),
        Value::Number(value) if !value.is_finite() => "null".to_string(),
        Value::Number(value) => format_number(*value),
        Value::Boolean(value) => value.to_string(),
        Value::String(value) => string_literal(value),
        Value::List(items) => {
            let items = items.iter().map(to_json).collect::<Vec<String>>();

            format!("[{}]", items.join(","))
        },
        Value::Primitive(_) | Value::Closure(_) => "undefined".to_string(),
    }
}

#[test]
fn test_compiled_code_agrees_with_interpreter() -> Result<(), Error> {
    let sources = [
        "(- 10 2 3)",
        "(/ 100 10 5)",
        "[(<= 1 2 3) (<= 1 3 2) (== 2 2 2) (!= 1 2 1)]",
        "(def x 1) (def f (fn [] x)) (def x 2) (f)",
        "(def x 1) (def f (fn [] x)) ((fn [] (def x 2) (f)))",
        "(def make-counter (fn [] (def n 0) (fn [] (set n (+ n 1)))))
         (def a (make-counter))
         (def b (make-counter))
         (a) (a) (b)
         [(a) (b)]",
        "(def fact (fn fact [n] (if (<= n 1) 1 (* n (fact (- n 1)))))) (fact 5)",
        "(def count 0) (def bump (fn [] (set count (+ count 1)))) (bump) (bump) count",
        "(def a-b 1) (def a_b 2) [a-b a_b]",
        "(def $x 1) (def $$x 2) (def x$ 3) [$x $$x x$]",
        "(def new 1) (def class 5) (+ new class)",
        "((fn [this] this) 3)",
        "((fn [x] (def x 2) x) 1)",
        "(+ 'a' 1 true)",
        "(if 0 'yes' 'no')",
        "[(if '' 1 2) (if [] 1 2) (if NaN 1 2)]",
        "'say \"hi\"'",
        "9007199254740993",
        "(+ 0.1 0.2)",
        "((if true * +) 3 4)",
        "(def plus +) (plus 1 2 3)",
    ];

    for source in sources {
        let expected = to_json(&parse_evaluate(source)?);
        let script = format!("console.log(JSON.stringify({}))", parse_compile(source)?);

        let output = match Command::new("node").arg("-e").arg(&script).output() {
            Ok(output) => output,
            // no host available
            Err(_) => return Ok(()),
        };

        assert!(
            output.status.success(),
            "`{source}` compiled to `{script}`, which failed: {}",
            String::from_utf8_lossy(&output.stderr)
        );
        assert_eq!(
            String::from_utf8_lossy(&output.stdout).trim_end(),
            expected,
            "`{source}` compiled to `{script}`"
        );
    }

    Ok(())
}
