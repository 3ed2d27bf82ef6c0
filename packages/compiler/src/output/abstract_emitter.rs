//! Abstract Emitter Module
//!
//! Prints [`output_ast`](super::output_ast) expressions as JavaScript source.
//!
//! Layout is fixed so generated fragments are stable across runs: call
//! arguments and object entries are separated by `", "`, array entries by
//! `","`.

use std::fmt;

use once_cell::sync::Lazy;
use regex::Regex;

use crate::output::output_ast as o;
use crate::util::json_string;

static LEGAL_IDENTIFIER_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[a-zA-Z_$][0-9a-zA-Z_$]*$").unwrap());

/// Whether `name` can be printed unquoted as a property or object key.
pub fn is_legal_identifier(name: &str) -> bool {
    LEGAL_IDENTIFIER_RE.is_match(name)
}

/// Accumulates printed parts for one expression.
#[derive(Debug, Default)]
pub struct EmitterVisitorContext {
    parts: Vec<String>,
}

impl EmitterVisitorContext {
    pub fn create_root() -> Self {
        Self::default()
    }

    pub fn print(&mut self, part: impl Into<String>) {
        let part = part.into();
        if !part.is_empty() {
            self.parts.push(part);
        }
    }

    pub fn to_source(&self) -> String {
        self.parts.concat()
    }
}

pub struct JsEmitter;

impl JsEmitter {
    pub fn visit_expression(&self, expr: &o::Expression, ctx: &mut EmitterVisitorContext) {
        match expr {
            o::Expression::ReadVar(e) => ctx.print(e.name.as_str()),
            o::Expression::ReadProp(e) => self.visit_read_prop(e, ctx),
            o::Expression::InvokeFn(e) => self.visit_invoke_fn(e, ctx),
            o::Expression::Literal(e) => ctx.print(literal_source(&e.value)),
            o::Expression::LiteralArray(e) => {
                ctx.print("[");
                self.visit_all(&e.entries, ",", ctx);
                ctx.print("]");
            }
            o::Expression::LiteralMap(e) => self.visit_literal_map(e, ctx),
            o::Expression::BinaryOp(e) => {
                self.visit_expression(&e.lhs, ctx);
                ctx.print(match e.operator {
                    o::BinaryOperator::Plus => " + ",
                });
                self.visit_expression(&e.rhs, ctx);
            }
            o::Expression::Parens(e) => {
                ctx.print("(");
                self.visit_expression(&e.expr, ctx);
                ctx.print(")");
            }
            o::Expression::RawCode(e) => ctx.print(e.code.as_str()),
        }
    }

    fn visit_read_prop(&self, expr: &o::ReadPropExpr, ctx: &mut EmitterVisitorContext) {
        self.visit_expression(&expr.receiver, ctx);
        if is_legal_identifier(&expr.name) {
            ctx.print(".");
            ctx.print(expr.name.as_str());
        } else {
            ctx.print(format!("[{}]", json_string(&expr.name)));
        }
    }

    fn visit_invoke_fn(&self, expr: &o::InvokeFunctionExpr, ctx: &mut EmitterVisitorContext) {
        self.visit_expression(&expr.fn_, ctx);
        ctx.print("(");
        self.visit_all(&expr.args, ", ", ctx);
        ctx.print(")");
    }

    fn visit_literal_map(&self, expr: &o::LiteralMapExpr, ctx: &mut EmitterVisitorContext) {
        ctx.print("{");
        for (i, entry) in expr.entries.iter().enumerate() {
            if i > 0 {
                ctx.print(", ");
            }
            if entry.quoted || !is_legal_identifier(&entry.key) {
                ctx.print(json_string(&entry.key));
            } else {
                ctx.print(entry.key.as_str());
            }
            ctx.print(": ");
            self.visit_expression(&entry.value, ctx);
        }
        ctx.print("}");
    }

    fn visit_all(&self, exprs: &[o::Expression], separator: &str, ctx: &mut EmitterVisitorContext) {
        for (i, expr) in exprs.iter().enumerate() {
            if i > 0 {
                ctx.print(separator);
            }
            self.visit_expression(expr, ctx);
        }
    }
}

fn literal_source(value: &o::LiteralValue) -> String {
    match value {
        o::LiteralValue::Null => "null".to_string(),
        o::LiteralValue::String(s) => json_string(s),
        o::LiteralValue::Bool(b) => b.to_string(),
        o::LiteralValue::Number(n) if n.is_finite() && n.fract() == 0.0 => {
            format!("{}", *n as i64)
        }
        o::LiteralValue::Number(n) => n.to_string(),
    }
}

/// Print a single expression.
pub fn emit_expression(expr: &o::Expression) -> String {
    let mut ctx = EmitterVisitorContext::create_root();
    JsEmitter.visit_expression(expr, &mut ctx);
    ctx.to_source()
}

/// Print an expression used as a statement.
pub fn emit_statement(expr: &o::Expression) -> String {
    format!("{};", emit_expression(expr))
}

impl fmt::Display for o::Expression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&emit_expression(self))
    }
}
