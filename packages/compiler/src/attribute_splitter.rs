//! Attribute Splitter
//!
//! Splits a single attribute value such as `foo=bar; target=onClick` into
//! named fields according to a [`FieldSchema`].
//!
//! Grammar:
//!
//! ```text
//! value  := field (';' field)*
//! field  := name '=' text | text | <empty>
//! ```
//!
//! `;` and `=` inside quoted strings never split, and `=` that belongs to an
//! operator (`==`, `===`, `!=`, `<=`, `>=`, `=>`) is never the name separator.
//! A bare `text` is assigned to [`SplitOptions::default_name`]; only one bare
//! value is accepted per attribute.

use indexmap::IndexMap;

use crate::chars;
use crate::error::{InvalidAttributeValue, SplitError};
use crate::parse_util::{Diagnostics, ParseError, ParseSourceSpan};
use crate::util::dash_case_to_camel_case;

/// Schema key matching any field name without an explicit entry.
pub const WILDCARD: &str = "*";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    /// Raw expression source, passed through untouched
    Expression,
    /// Opaque text interpreted by the caller
    Custom,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldSpec {
    pub kind: FieldKind,
    /// Key to store the value under instead of the written name
    pub rename: Option<String>,
}

impl FieldSpec {
    pub fn new(kind: FieldKind) -> Self {
        FieldSpec { kind, rename: None }
    }

    pub fn expression() -> Self {
        Self::new(FieldKind::Expression)
    }

    pub fn custom() -> Self {
        Self::new(FieldKind::Custom)
    }

    pub fn renamed(mut self, name: impl Into<String>) -> Self {
        self.rename = Some(name.into());
        self
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldSchema {
    fields: IndexMap<String, FieldSpec>,
}

impl FieldSchema {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, name: impl Into<String>, spec: FieldSpec) -> Self {
        self.insert(name, spec);
        self
    }

    pub fn insert(&mut self, name: impl Into<String>, spec: FieldSpec) {
        self.fields.insert(name.into(), spec);
    }

    /// Exact entry for `name`, falling back to the wildcard entry.
    pub fn lookup(&self, name: &str) -> Option<&FieldSpec> {
        self.fields.get(name).or_else(|| self.fields.get(WILDCARD))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldValue {
    Expression(String),
    Custom(String),
}

impl FieldValue {
    fn new(kind: FieldKind, text: &str) -> Self {
        match kind {
            FieldKind::Expression => FieldValue::Expression(text.to_string()),
            FieldKind::Custom => FieldValue::Custom(text.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            FieldValue::Expression(s) | FieldValue::Custom(s) => s,
        }
    }

    pub fn into_string(self) -> String {
        match self {
            FieldValue::Expression(s) | FieldValue::Custom(s) => s,
        }
    }
}

/// Fields produced by one [`split`] call, in the order they were written.
pub type ParsedFields = IndexMap<String, FieldValue>;

#[derive(Debug, Clone, Default)]
pub struct SplitOptions {
    /// Name given to the first unnamed value
    pub default_name: Option<String>,
    /// Store `foo-bar` as `fooBar`
    pub remove_dashes: bool,
    /// What is being parsed, used in diagnostics (`event attribute "event-click"`)
    pub subject: Option<String>,
    /// Span attached to every diagnostic
    pub source_span: Option<ParseSourceSpan>,
}

impl SplitOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn default_name(mut self, name: impl Into<String>) -> Self {
        self.default_name = Some(name.into());
        self
    }

    pub fn remove_dashes(mut self, remove_dashes: bool) -> Self {
        self.remove_dashes = remove_dashes;
        self
    }

    pub fn subject(mut self, subject: impl Into<String>) -> Self {
        self.subject = Some(subject.into());
        self
    }

    pub fn source_span(mut self, span: Option<ParseSourceSpan>) -> Self {
        self.source_span = span;
        self
    }
}

/// One `;`-delimited piece of the input, before any schema checks.
#[derive(Debug, Clone, PartialEq, Eq)]
struct RawField<'a> {
    text: &'a str,
    /// Byte offset of the name separator within `text`
    eq_index: Option<usize>,
    unterminated_quote: Option<char>,
}

fn scan_fields(value: &str) -> Vec<RawField<'_>> {
    let mut fields = Vec::new();
    let mut start = 0;
    let mut eq_index: Option<usize> = None;
    let mut quote: Option<char> = None;
    let mut escaped = false;
    let mut prev: Option<char> = None;
    let mut iter = value.char_indices().peekable();

    while let Some((i, ch)) = iter.next() {
        if let Some(q) = quote {
            if escaped {
                escaped = false;
            } else if ch == chars::BACKSLASH {
                escaped = true;
            } else if ch == q {
                quote = None;
            }
        } else if chars::is_quote(ch) {
            quote = Some(ch);
        } else if ch == chars::SEMICOLON {
            fields.push(RawField {
                text: &value[start..i],
                eq_index: eq_index.map(|eq| eq - start),
                unterminated_quote: None,
            });
            start = i + 1;
            eq_index = None;
        } else if ch == chars::EQ && eq_index.is_none() {
            let next = iter.peek().map(|&(_, c)| c);
            let is_operator = prev.is_some_and(chars::is_operator_prefix)
                || next == Some(chars::EQ)
                || next == Some(chars::GT);
            if !is_operator {
                eq_index = Some(i);
            }
        }
        prev = Some(ch);
    }

    fields.push(RawField {
        text: &value[start..],
        eq_index: eq_index.map(|eq| eq - start),
        unterminated_quote: quote,
    });
    fields
}

fn is_valid_field_name(name: &str) -> bool {
    if name == WILDCARD {
        return false;
    }
    let mut rest = name.chars();
    match rest.next() {
        Some(first) => chars::is_identifier_start(first) && rest.all(chars::is_identifier_part),
        None => false,
    }
}

/// Split `value` into named fields.
///
/// Never fails: malformed fields are reported to `diagnostics` and skipped,
/// and the remaining fields are still parsed. An empty `value` yields an
/// empty map.
pub fn split(
    value: &str,
    schema: &FieldSchema,
    options: &SplitOptions,
    diagnostics: &mut Diagnostics,
) -> ParsedFields {
    let mut result = ParsedFields::new();
    let mut seen_unnamed = false;

    let mut report = |error: SplitError| {
        let message = InvalidAttributeValue {
            value: value.to_string(),
            subject: options
                .subject
                .clone()
                .unwrap_or_else(|| "attribute".to_string()),
            source: error,
        };
        diagnostics.push(ParseError::new(
            options.source_span.clone(),
            message.to_string(),
        ));
    };

    for field in scan_fields(value) {
        if let Some(quote) = field.unterminated_quote {
            report(SplitError::UnterminatedQuote {
                quote,
                field: field.text.trim().to_string(),
            });
            continue;
        }

        let (name, text) = match field.eq_index {
            Some(eq) => {
                let name = field.text[..eq].trim();
                if name.is_empty() {
                    report(SplitError::EmptyFieldName {
                        field: field.text.trim().to_string(),
                    });
                    continue;
                }
                if !is_valid_field_name(name) {
                    report(SplitError::InvalidFieldName {
                        name: name.to_string(),
                    });
                    continue;
                }
                (name.to_string(), field.text[eq + 1..].trim())
            }
            None => {
                let text = field.text.trim();
                if text.is_empty() {
                    continue;
                }
                match &options.default_name {
                    None => {
                        report(SplitError::MissingName {
                            value: text.to_string(),
                        });
                        continue;
                    }
                    Some(default_name) if seen_unnamed => {
                        report(SplitError::ExtraUnnamedValue {
                            value: text.to_string(),
                            default_name: default_name.clone(),
                        });
                        continue;
                    }
                    Some(default_name) => {
                        seen_unnamed = true;
                        (default_name.clone(), text)
                    }
                }
            }
        };

        let Some(spec) = schema.lookup(&name) else {
            report(SplitError::UnknownField { name });
            continue;
        };

        let mut key = spec.rename.clone().unwrap_or(name);
        if options.remove_dashes {
            key = dash_case_to_camel_case(&key);
        }
        if result.contains_key(&key) {
            report(SplitError::DuplicateField { name: key });
            continue;
        }
        result.insert(key, FieldValue::new(spec.kind, text));
    }

    result
}
