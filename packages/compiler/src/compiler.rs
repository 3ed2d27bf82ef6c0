//! Compiler Host
//!
//! Services a taglib transform needs from the host template compiler: value
//! coercion and tag-handler node creation.

use crate::chars;
use crate::error::CoercionError;
use crate::markup::{AttrValue, Element};
use crate::output::output_ast as o;
use crate::parse_util::{Diagnostics, ParseSourceSpan};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TargetType {
    /// Text, with `${expr}` placeholders spliced in
    String,
    /// Raw expression source
    Expression,
}

pub trait CompilerHost {
    /// Convert a raw attribute or property value into an expression of the
    /// requested type. With `allow_expressions == false`, dynamic values are
    /// reported to `diagnostics`.
    fn convert_type(
        &self,
        value: &AttrValue,
        target: TargetType,
        allow_expressions: bool,
        diagnostics: &mut Diagnostics,
        span: Option<&ParseSourceSpan>,
    ) -> o::Expression;

    fn create_tag_handler_node(&self, namespace: &str, local_name: &str) -> Element;
}

/// Coercion rules of the stock template compiler.
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultCompiler;

impl CompilerHost for DefaultCompiler {
    fn convert_type(
        &self,
        value: &AttrValue,
        target: TargetType,
        allow_expressions: bool,
        diagnostics: &mut Diagnostics,
        span: Option<&ParseSourceSpan>,
    ) -> o::Expression {
        let text = match value {
            AttrValue::Expression(expr) => return expr.clone(),
            AttrValue::Text(text) => text,
        };

        let parts = match split_placeholders(text) {
            Ok(parts) => parts,
            Err(err) => {
                diagnostics.error(err.to_string(), span);
                return o::literal(text.as_str());
            }
        };
        let is_dynamic = parts.iter().any(|p| matches!(p, TextPart::Placeholder(_)));

        if is_dynamic && !allow_expressions {
            diagnostics.error(
                CoercionError::DynamicValueNotAllowed {
                    value: text.clone(),
                }
                .to_string(),
                span,
            );
            return o::literal(text.as_str());
        }

        match target {
            TargetType::String => concat_parts(parts),
            TargetType::Expression => match parts.as_slice() {
                [TextPart::Placeholder(code)] => o::raw_code(code.trim()),
                _ => o::raw_code(text.trim()),
            },
        }
    }

    fn create_tag_handler_node(&self, namespace: &str, local_name: &str) -> Element {
        Element::tag_handler(namespace, local_name)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum TextPart {
    Literal(String),
    Placeholder(String),
}

/// Split `a${b}c` into literal and placeholder parts. Braces and quotes
/// inside a placeholder are balanced, so `${ {x: 1}.x }` is one placeholder.
fn split_placeholders(text: &str) -> Result<Vec<TextPart>, CoercionError> {
    let mut parts = Vec::new();
    let mut rest = text;

    while let Some(start) = rest.find("${") {
        if start > 0 {
            parts.push(TextPart::Literal(rest[..start].to_string()));
        }
        let body = &rest[start + 2..];
        let end = find_closing_brace(body).ok_or_else(|| CoercionError::UnterminatedPlaceholder {
            value: text.to_string(),
        })?;
        parts.push(TextPart::Placeholder(body[..end].to_string()));
        rest = &body[end + 1..];
    }
    if !rest.is_empty() || parts.is_empty() {
        parts.push(TextPart::Literal(rest.to_string()));
    }
    Ok(parts)
}

fn find_closing_brace(body: &str) -> Option<usize> {
    let mut depth = 0usize;
    let mut quote: Option<char> = None;
    let mut escaped = false;

    for (i, ch) in body.char_indices() {
        if let Some(q) = quote {
            if escaped {
                escaped = false;
            } else if ch == chars::BACKSLASH {
                escaped = true;
            } else if ch == q {
                quote = None;
            }
            continue;
        }
        match ch {
            '{' => depth += 1,
            '}' if depth == 0 => return Some(i),
            '}' => depth -= 1,
            c if chars::is_quote(c) => quote = Some(c),
            _ => {}
        }
    }
    None
}

fn concat_parts(parts: Vec<TextPart>) -> o::Expression {
    let mut exprs: Vec<o::Expression> = parts
        .into_iter()
        .map(|part| match part {
            TextPart::Literal(text) => o::literal(text),
            TextPart::Placeholder(code) => o::raw_code(code.trim()).parens(),
        })
        .collect();

    // Start from a string so `+` concatenates rather than adds.
    if exprs.len() > 1 && !matches!(exprs[0], o::Expression::Literal(_)) {
        exprs.insert(0, o::literal(""));
    }

    let mut exprs = exprs.into_iter();
    let Some(first) = exprs.next() else {
        return o::literal("");
    };
    exprs.fold(first, |acc, expr| acc.plus(expr))
}
