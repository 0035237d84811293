use std::{fmt::Display, rc::Rc};

/// Built-in operators. Binary operators fold over their operands, comparison
/// operators are chained pairwise.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operator {
    Add,
    Sub,
    Mul,
    Div,
    Gt,
    Lt,
    Ge,
    Le,
    Eq,
    Ne,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OperatorKind {
    Binary,
    Comparison,
}

impl Operator {
    pub const ALL: [Operator; 10] = [
        Operator::Add,
        Operator::Sub,
        Operator::Mul,
        Operator::Div,
        Operator::Gt,
        Operator::Lt,
        Operator::Ge,
        Operator::Le,
        Operator::Eq,
        Operator::Ne,
    ];

    pub fn from_symbol(symbol: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|op| op.as_literal() == symbol)
    }

    pub fn as_literal(&self) -> &'static str {
        match self {
            Self::Add => "+",
            Self::Sub => "-",
            Self::Mul => "*",
            Self::Div => "/",
            Self::Gt => ">",
            Self::Lt => "<",
            Self::Ge => ">=",
            Self::Le => "<=",
            Self::Eq => "==",
            Self::Ne => "!=",
        }
    }

    pub fn kind(&self) -> OperatorKind {
        match self {
            Self::Add | Self::Sub | Self::Mul | Self::Div => OperatorKind::Binary,
            _ => OperatorKind::Comparison,
        }
    }
}

impl Display for Operator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_literal())
    }
}

/// Heads with fixed evaluation rules in both back ends.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpecialForm {
    Do,
    If,
    Fn,
    Def,
    Set,
}

impl SpecialForm {
    pub fn from_name(name: &str) -> Option<Self> {
        Some(match name {
            "do" => Self::Do,
            "if" => Self::If,
            "fn" => Self::Fn,
            "def" => Self::Def,
            "set" => Self::Set,
            _ => return None,
        })
    }

    pub fn as_literal(&self) -> &'static str {
        match self {
            Self::Do => "do",
            Self::If => "if",
            Self::Fn => "fn",
            Self::Def => "def",
            Self::Set => "set",
        }
    }
}

/// Internal-only heads tagging literal values inside the tree.
#[derive(Debug, Clone, PartialEq)]
pub enum Marker {
    // /str
    Str(String),
    // /list
    List(Rc<[Expression]>),
}

impl Marker {
    pub fn as_literal(&self) -> &'static str {
        match self {
            Self::Str(_) => "/str",
            Self::List(_) => "/list",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Form {
    /// `None` only for the empty form `()`.
    pub head: Option<Box<Expression>>,
    pub args: Rc<[Expression]>,
}

impl Form {
    pub fn new(head: Expression, args: Vec<Expression>) -> Self {
        Self {
            head: Some(Box::new(head)),
            args: args.into(),
        }
    }

    pub fn empty() -> Self {
        Self {
            head: None,
            args: Rc::new([]),
        }
    }

    /// The special form named by the head, if any.
    pub fn special_form(&self) -> Option<SpecialForm> {
        match self.head.as_deref() {
            Some(Expression::Identifier(name)) => SpecialForm::from_name(name),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Expression {
    Number(f64),
    Boolean(bool),
    Identifier(String),
    Operator(Operator),
    Marked(Marker),
    Form(Form),
}

impl Expression {
    pub fn string(value: impl Into<String>) -> Self {
        Self::Marked(Marker::Str(value.into()))
    }

    pub fn list(items: Vec<Expression>) -> Self {
        Self::Marked(Marker::List(items.into()))
    }

    pub fn ident(name: impl Into<String>) -> Self {
        Self::Identifier(name.into())
    }

    pub fn form(head: Expression, args: Vec<Expression>) -> Self {
        Self::Form(Form::new(head, args))
    }

    /// Builds the `Program` root: an implicit `do` over every expression.
    pub fn program(body: Vec<Expression>) -> Self {
        Self::form(Self::ident(SpecialForm::Do.as_literal()), body)
    }
}

/// Formats a number the way the host language prints it.
pub fn format_number(value: f64) -> String {
    if value.is_nan() {
        "NaN".to_string()
    } else if value.is_infinite() {
        if value < 0.0 { "-Infinity" } else { "Infinity" }.to_string()
    } else {
        format!("{value}")
    }
}

fn join(items: &[Expression]) -> String {
    items.iter()
        .map(|item| format!("{item}"))
        .collect::<Vec<String>>()
        .join(" ")
}

impl Display for Expression {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Number(value) => write!(f, "{}", format_number(*value)),
            Self::Boolean(value) => write!(f, "{value}"),
            Self::Identifier(name) => write!(f, "{name}"),
            Self::Operator(op) => write!(f, "{op}"),
            Self::Marked(marker @ Marker::Str(value)) => {
                write!(f, "({} {:?})", marker.as_literal(), value)
            },
            Self::Marked(marker @ Marker::List(items)) if items.is_empty() => {
                write!(f, "({})", marker.as_literal())
            },
            Self::Marked(marker @ Marker::List(items)) => {
                write!(f, "({} {})", marker.as_literal(), join(items))
            },
            Self::Form(Form { head: None, .. }) => write!(f, "()"),
            Self::Form(Form { head: Some(head), args }) if args.is_empty() => write!(f, "({head})"),
            Self::Form(Form { head: Some(head), args }) => write!(f, "({head} {})", join(args)),
        }
    }
}
