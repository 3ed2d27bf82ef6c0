//! Output AST Module
//!
//! The small expression IR the widgets transformer emits. Code is built as
//! typed nodes and only turned into source text by
//! [`abstract_emitter`](super::abstract_emitter).

use crate::parse_util::ParseSourceSpan;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BinaryOperator {
    Plus,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Expression {
    ReadVar(ReadVarExpr),
    ReadProp(ReadPropExpr),
    InvokeFn(InvokeFunctionExpr),
    Literal(LiteralExpr),
    LiteralArray(LiteralArrayExpr),
    LiteralMap(LiteralMapExpr),
    BinaryOp(BinaryOperatorExpr),
    Parens(ParenthesizedExpr),
    RawCode(RawCodeExpr),
}

#[derive(Debug, Clone, PartialEq)]
pub struct ReadVarExpr {
    pub name: String,
    pub source_span: Option<ParseSourceSpan>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ReadPropExpr {
    pub receiver: Box<Expression>,
    pub name: String,
    pub source_span: Option<ParseSourceSpan>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct InvokeFunctionExpr {
    pub fn_: Box<Expression>,
    pub args: Vec<Expression>,
    pub source_span: Option<ParseSourceSpan>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct LiteralExpr {
    pub value: LiteralValue,
    pub source_span: Option<ParseSourceSpan>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum LiteralValue {
    Null,
    String(String),
    Number(f64),
    Bool(bool),
}

#[derive(Debug, Clone, PartialEq)]
pub struct LiteralArrayExpr {
    pub entries: Vec<Expression>,
    pub source_span: Option<ParseSourceSpan>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct LiteralMapEntry {
    pub key: String,
    pub value: Box<Expression>,
    pub quoted: bool,
}

impl LiteralMapEntry {
    pub fn new(key: impl Into<String>, value: Expression, quoted: bool) -> Self {
        LiteralMapEntry {
            key: key.into(),
            value: Box::new(value),
            quoted,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct LiteralMapExpr {
    pub entries: Vec<LiteralMapEntry>,
    pub source_span: Option<ParseSourceSpan>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct BinaryOperatorExpr {
    pub operator: BinaryOperator,
    pub lhs: Box<Expression>,
    pub rhs: Box<Expression>,
    pub source_span: Option<ParseSourceSpan>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ParenthesizedExpr {
    pub expr: Box<Expression>,
    pub source_span: Option<ParseSourceSpan>,
}

/// Expression source copied verbatim from the template, e.g. the value of
/// an `expression` field. It is trusted to be valid in the target language.
#[derive(Debug, Clone, PartialEq)]
pub struct RawCodeExpr {
    pub code: String,
    pub source_span: Option<ParseSourceSpan>,
}

pub fn variable(name: impl Into<String>) -> Expression {
    Expression::ReadVar(ReadVarExpr {
        name: name.into(),
        source_span: None,
    })
}

pub fn literal(value: impl Into<LiteralValue>) -> Expression {
    Expression::Literal(LiteralExpr {
        value: value.into(),
        source_span: None,
    })
}

pub fn null_expr() -> Expression {
    literal(LiteralValue::Null)
}

pub fn literal_arr(values: Vec<Expression>) -> Expression {
    Expression::LiteralArray(LiteralArrayExpr {
        entries: values,
        source_span: None,
    })
}

pub fn literal_map(entries: Vec<LiteralMapEntry>) -> Expression {
    Expression::LiteralMap(LiteralMapExpr {
        entries,
        source_span: None,
    })
}

pub fn raw_code(code: impl Into<String>) -> Expression {
    Expression::RawCode(RawCodeExpr {
        code: code.into(),
        source_span: None,
    })
}

impl From<String> for LiteralValue {
    fn from(s: String) -> Self {
        LiteralValue::String(s)
    }
}

impl From<&str> for LiteralValue {
    fn from(s: &str) -> Self {
        LiteralValue::String(s.to_string())
    }
}

impl From<f64> for LiteralValue {
    fn from(n: f64) -> Self {
        LiteralValue::Number(n)
    }
}

impl From<bool> for LiteralValue {
    fn from(b: bool) -> Self {
        LiteralValue::Bool(b)
    }
}

impl Expression {
    pub fn prop(self, name: impl Into<String>) -> Expression {
        Expression::ReadProp(ReadPropExpr {
            receiver: Box::new(self),
            name: name.into(),
            source_span: None,
        })
    }

    pub fn call_fn(self, args: Vec<Expression>) -> Expression {
        Expression::InvokeFn(InvokeFunctionExpr {
            fn_: Box::new(self),
            args,
            source_span: None,
        })
    }

    pub fn plus(self, rhs: Expression) -> Expression {
        Expression::BinaryOp(BinaryOperatorExpr {
            operator: BinaryOperator::Plus,
            lhs: Box::new(self),
            rhs: Box::new(rhs),
            source_span: None,
        })
    }

    pub fn parens(self) -> Expression {
        Expression::Parens(ParenthesizedExpr {
            expr: Box::new(self),
            source_span: None,
        })
    }

    pub fn with_source_span(mut self, span: Option<ParseSourceSpan>) -> Expression {
        match &mut self {
            Expression::ReadVar(e) => e.source_span = span,
            Expression::ReadProp(e) => e.source_span = span,
            Expression::InvokeFn(e) => e.source_span = span,
            Expression::Literal(e) => e.source_span = span,
            Expression::LiteralArray(e) => e.source_span = span,
            Expression::LiteralMap(e) => e.source_span = span,
            Expression::BinaryOp(e) => e.source_span = span,
            Expression::Parens(e) => e.source_span = span,
            Expression::RawCode(e) => e.source_span = span,
        }
        self
    }

    /// The string value if this is a string literal.
    pub fn as_string_literal(&self) -> Option<&str> {
        match self {
            Expression::Literal(LiteralExpr {
                value: LiteralValue::String(s),
                ..
            }) => Some(s),
            _ => None,
        }
    }

    /// Structural equality ignoring source spans.
    pub fn is_equivalent(&self, other: &Self) -> bool {
        match (self, other) {
            (Expression::ReadVar(a), Expression::ReadVar(b)) => a.name == b.name,
            (Expression::ReadProp(a), Expression::ReadProp(b)) => {
                a.name == b.name && a.receiver.is_equivalent(&b.receiver)
            }
            (Expression::InvokeFn(a), Expression::InvokeFn(b)) => {
                a.fn_.is_equivalent(&b.fn_) && all_equivalent(&a.args, &b.args)
            }
            (Expression::Literal(a), Expression::Literal(b)) => a.value == b.value,
            (Expression::LiteralArray(a), Expression::LiteralArray(b)) => {
                all_equivalent(&a.entries, &b.entries)
            }
            (Expression::LiteralMap(a), Expression::LiteralMap(b)) => {
                a.entries.len() == b.entries.len()
                    && a.entries.iter().zip(&b.entries).all(|(x, y)| {
                        x.key == y.key && x.quoted == y.quoted && x.value.is_equivalent(&y.value)
                    })
            }
            (Expression::BinaryOp(a), Expression::BinaryOp(b)) => {
                a.operator == b.operator
                    && a.lhs.is_equivalent(&b.lhs)
                    && a.rhs.is_equivalent(&b.rhs)
            }
            (Expression::Parens(a), Expression::Parens(b)) => a.expr.is_equivalent(&b.expr),
            (Expression::RawCode(a), Expression::RawCode(b)) => a.code == b.code,
            _ => false,
        }
    }
}

fn all_equivalent(a: &[Expression], b: &[Expression]) -> bool {
    a.len() == b.len() && a.iter().zip(b).all(|(x, y)| x.is_equivalent(y))
}
