use std::collections::HashSet;

use crate::{
    eval::prelude::is_plain_identifier,
    parser::prelude::{format_number, Expression, Form, Marker, Operator, OperatorKind, SpecialForm}
};
use super::error::{compile_error, CompileError, CompileErrorType};

/// Emits JavaScript for an expression tree.
pub struct Codegen {
    // names already declared with `let` in each open block
    blocks: Vec<HashSet<String>>,
}

impl Codegen {
    pub fn compile(expression: &Expression) -> Result<String, CompileError> {
        Self { blocks: vec![] }.compile_expr(expression)
    }

    fn compile_expr(&mut self, expression: &Expression) -> Result<String, CompileError> {
        match expression {
            Expression::Number(value) => Ok(number_literal(*value)),
            Expression::Boolean(value) => Ok(value.to_string()),
            Expression::Identifier(name) => Ok(mangle(name)),
            Expression::Operator(op) => Ok(operator_function(*op)),
            Expression::Marked(Marker::Str(value)) => Ok(string_literal(value)),
            Expression::Marked(Marker::List(items)) => Ok(format!("[{}]", self.compile_args(items)?)),
            Expression::Form(form) => self.compile_form(form),
        }
    }

    fn compile_args(&mut self, args: &[Expression]) -> Result<String, CompileError> {
        Ok(self.compile_each(args)?.join(", "))
    }

    fn compile_each(&mut self, args: &[Expression]) -> Result<Vec<String>, CompileError> {
        args.iter()
            .map(|arg| self.compile_expr(arg))
            .collect()
    }

    fn compile_form(&mut self, form: &Form) -> Result<String, CompileError> {
        if let Some(special_form) = form.special_form() {
            return self.compile_special_form(special_form, &form.args);
        }

        match form.head.as_deref() {
            Some(Expression::Operator(op)) => self.compile_operation(*op, &form.args),
            Some(Expression::Identifier(name)) => {
                Ok(format!("{}({})", mangle(name), self.compile_args(&form.args)?))
            },
            Some(head @ Expression::Form(_)) => {
                let head = self.compile_expr(head)?;

                Ok(format!("({head})({})", self.compile_args(&form.args)?))
            },
            Some(head) => compile_error(
                CompileErrorType::UnknownExpressionForm,
                format!("`{head}` cannot be called")
            ),
            None => compile_error(
                CompileErrorType::UnknownExpressionForm,
                "an empty form `()` has nothing to call"
            )
        }
    }

    fn compile_special_form(
        &mut self,
        special_form: SpecialForm,
        args: &[Expression]
    ) -> Result<String, CompileError> {
        match special_form {
            SpecialForm::Do => self.compile_do(args),
            SpecialForm::If => self.compile_if(args),
            SpecialForm::Fn => self.compile_fn(args),
            SpecialForm::Def => compile_error(
                CompileErrorType::MisplacedDefinition,
                "`def` can only appear directly inside a `do` block or a function body"
            ),
            SpecialForm::Set => {
                let (name, value) = binding(special_form, args)?;

                Ok(format!("({} = {})", mangle(name), self.compile_expr(value)?))
            }
        }
    }

    fn compile_do(&mut self, args: &[Expression]) -> Result<String, CompileError> {
        match args {
            [] => Ok("null".to_string()),
            [single] if definition(single)?.is_none() => self.compile_expr(single),
            body => Ok(format!("(() => {{ {} }})()", self.compile_block(body, vec![])?))
        }
    }

    fn compile_if(&mut self, args: &[Expression]) -> Result<String, CompileError> {
        let (condition, resolution, alternative) = match args {
            [condition, resolution] => (condition, resolution, None),
            [condition, resolution, alternative] => (condition, resolution, Some(alternative)),
            _ => return compile_error(
                CompileErrorType::MalformedSpecialForm,
                format!("`if` expects a condition, a branch and an optional else branch, got {} arguments", args.len())
            )
        };

        let condition = self.compile_expr(condition)?;
        let resolution = self.compile_expr(resolution)?;
        let alternative = match alternative {
            Some(alternative) => self.compile_expr(alternative)?,
            None => "null".to_string()
        };

        Ok(format!("({condition} ? {resolution} : {alternative})"))
    }

    fn compile_fn(&mut self, args: &[Expression]) -> Result<String, CompileError> {
        let (name, rest) = match args {
            [Expression::Identifier(name), rest @ ..] => (Some(name), rest),
            rest => (None, rest)
        };

        let (params, body) = match rest {
            [Expression::Marked(Marker::List(params)), body @ ..] => (params, body),
            _ => return compile_error(
                CompileErrorType::MalformedFunction,
                "`fn` expects a parameter list such as `[a b]`"
            )
        };

        let params = params.iter()
            .map(|param| match param {
                Expression::Identifier(name) if is_plain_identifier(name) => Ok(mangle(name)),
                other => compile_error(
                    CompileErrorType::MalformedFunction,
                    format!("parameter `{other}` is not a plain identifier")
                )
            })
            .collect::<Result<Vec<String>, CompileError>>()?;

        let block = self.compile_block(body, params.clone())?;
        let params = params.join(", ");

        Ok(match name {
            Some(name) => format!("(function {}({params}) {{ {block} }})", mangle(name)),
            None => format!("(({params}) => {{ {block} }})")
        })
    }

    /// Statements of a block ending in `return`. `declared` holds names the
    /// block must not redeclare, such as function parameters.
    fn compile_block(
        &mut self,
        body: &[Expression],
        declared: Vec<String>
    ) -> Result<String, CompileError> {
        self.blocks.push(declared.into_iter().collect());
        let block = self.compile_statements(body);
        self.blocks.pop();

        block
    }

    fn compile_statements(&mut self, body: &[Expression]) -> Result<String, CompileError> {
        let Some((last, init)) = body.split_last() else {
            return Ok("return null;".to_string());
        };

        let mut statements = init.iter()
            .map(|statement| self.compile_statement(statement))
            .collect::<Result<Vec<String>, CompileError>>()?;

        match definition(last)? {
            Some((name, value)) => {
                statements.push(self.compile_definition(name, value)?);
                statements.push(format!("return {};", mangle(name)));
            },
            None => statements.push(format!("return {};", self.compile_expr(last)?))
        }

        Ok(statements.join(" "))
    }

    fn compile_statement(&mut self, statement: &Expression) -> Result<String, CompileError> {
        match definition(statement)? {
            Some((name, value)) => self.compile_definition(name, value),
            None => Ok(format!("{};", self.compile_expr(statement)?))
        }
    }

    /// The first `def` of a name in a block declares it; later ones assign.
    fn compile_definition(&mut self, name: &str, value: &Expression) -> Result<String, CompileError> {
        let value = self.compile_expr(value)?;
        let name = mangle(name);

        let is_new = match self.blocks.last_mut() {
            Some(block) => block.insert(name.clone()),
            None => true
        };

        Ok(if is_new {
            format!("let {name} = {value};")
        } else {
            format!("{name} = {value};")
        })
    }

    fn compile_operation(&mut self, op: Operator, args: &[Expression]) -> Result<String, CompileError> {
        let operands = self.compile_each(args)?;
        let symbol = host_operator(op);

        match (op.kind(), operands.as_slice()) {
            (OperatorKind::Binary, []) => compile_error(
                CompileErrorType::MissingOperands,
                format!("`{op}` needs at least one operand")
            ),
            (OperatorKind::Binary, [single]) => Ok(format!("({single})")),
            (OperatorKind::Binary, [first, rest @ ..]) => Ok(rest.iter()
                .fold(first.clone(), |left, right| format!("({left} {symbol} {right})"))),
            (OperatorKind::Comparison, [] | [_]) => compile_error(
                CompileErrorType::MissingOperands,
                format!("`{op}` needs at least two operands, got {}", operands.len())
            ),
            (OperatorKind::Comparison, [left, right]) => Ok(format!("({left} {symbol} {right})")),
            (OperatorKind::Comparison, operands) => {
                // bind every operand once, then test each adjacent pair
                let names = (0..operands.len())
                    .map(|idx| format!("_{idx}"))
                    .collect::<Vec<String>>();

                let pairs = names.windows(2)
                    .map(|pair| format!("{} {symbol} {}", pair[0], pair[1]))
                    .collect::<Vec<String>>()
                    .join(" && ");

                Ok(format!("(({}) => {pairs})({})", names.join(", "), operands.join(", ")))
            }
        }
    }
}

/// Compiles an expression tree, usually a parsed program, to JavaScript.
pub fn compile(expression: &Expression) -> Result<String, CompileError> {
    Codegen::compile(expression)
}

/// `Some((name, value))` when `expression` is a well-formed `def`.
fn definition(expression: &Expression) -> Result<Option<(&str, &Expression)>, CompileError> {
    match expression {
        Expression::Form(form) if form.special_form() == Some(SpecialForm::Def) => {
            binding(SpecialForm::Def, &form.args).map(Some)
        },
        _ => Ok(None)
    }
}

fn binding(special_form: SpecialForm, args: &[Expression]) -> Result<(&str, &Expression), CompileError> {
    match args {
        [Expression::Identifier(name), value] if is_plain_identifier(name) => Ok((name, value)),
        _ => compile_error(
            CompileErrorType::MalformedSpecialForm,
            format!("`{}` expects a name and a value", special_form.as_literal())
        )
    }
}

fn host_operator(op: Operator) -> &'static str {
    match op {
        Operator::Eq => "===",
        Operator::Ne => "!==",
        op => op.as_literal()
    }
}

/// A standalone operator becomes a variadic function with the same
/// fold or chain behaviour as an operator head.
fn operator_function(op: Operator) -> String {
    let symbol = host_operator(op);

    match op.kind() {
        OperatorKind::Binary => {
            format!("((...args) => args.reduce((left, right) => left {symbol} right))")
        },
        OperatorKind::Comparison => {
            format!("((...args) => args.slice(1).every((right, i) => args[i] {symbol} right))")
        }
    }
}

// words a JavaScript binding or reference cannot be spelled as
const RESERVED: [&str; 48] = [
    "arguments", "await", "break", "case", "catch", "class", "const",
    "continue", "debugger", "default", "delete", "do", "else", "enum", "eval",
    "export", "extends", "false", "finally", "for", "function", "if",
    "implements", "import", "in", "instanceof", "interface", "let", "new",
    "null", "package", "private", "protected", "public", "return", "static",
    "super", "switch", "this", "throw", "true", "try", "typeof", "var", "void",
    "while", "with", "yield",
];

/// Spells an identifier as a JavaScript name. `$` is doubled and `-` becomes
/// `$_`, so distinct names never meet; a reserved word gains a lone trailing
/// `$`. Segments after a `.` are property names and only get the escapes.
pub fn mangle(name: &str) -> String {
    name.split('.')
        .enumerate()
        .map(|(idx, segment)| {
            let mut mangled = segment.replace('$', "$$").replace('-', "$_");

            if idx == 0 && RESERVED.contains(&segment) {
                mangled.push('$');
            }

            mangled
        })
        .collect::<Vec<String>>()
        .join(".")
}

pub fn number_literal(value: f64) -> String {
    let literal = format_number(value);

    if value.is_sign_negative() && value != 0.0 {
        format!("({literal})")
    } else {
        literal
    }
}

pub fn string_literal(value: &str) -> String {
    let mut literal = String::with_capacity(value.len() + 2);
    literal.push('"');

    for ch in value.chars() {
        match ch {
            '"' => literal.push_str("\\\""),
            '\\' => literal.push_str("\\\\"),
            '\n' => literal.push_str("\\n"),
            '\r' => literal.push_str("\\r"),
            '\t' => literal.push_str("\\t"),
            // line terminators inside JavaScript string literals
            '\u{2028}' | '\u{2029}' => literal.push_str(&format!("\\u{:04x}", ch as u32)),
            ch if ch.is_control() => literal.push_str(&format!("\\u{:04x}", ch as u32)),
            ch => literal.push(ch)
        }
    }

    literal.push('"');
    literal
}
