//! Error types
//!
//! Every user-facing problem found while compiling ends up as a
//! [`ParseError`](crate::parse_util::ParseError) in a
//! [`Diagnostics`](crate::parse_util::Diagnostics) collector. The enums here
//! only own the wording of those messages.

use thiserror::Error;

/// Problems found inside a single attribute value by the attribute splitter.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SplitError {
    #[error("Unterminated quote ({quote}) in \"{field}\"")]
    UnterminatedQuote { quote: char, field: String },

    #[error("Missing attribute name before \"=\" in \"{field}\"")]
    EmptyFieldName { field: String },

    #[error("Invalid attribute name \"{name}\"")]
    InvalidFieldName { name: String },

    #[error("Invalid attribute \"{name}\"")]
    UnknownField { name: String },

    #[error("Duplicate attribute \"{name}\"")]
    DuplicateField { name: String },

    #[error("Value \"{value}\" must be given a name (name=value)")]
    MissingName { value: String },

    #[error("Unexpected unnamed value \"{value}\". Only the first unnamed value is allowed and it is assigned to \"{default_name}\"")]
    ExtraUnnamedValue { value: String, default_name: String },
}

/// A [`SplitError`] together with the raw value and what was being parsed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Invalid value of \"{value}\" for {subject}. Error: {source}")]
pub struct InvalidAttributeValue {
    pub value: String,
    pub subject: String,
    #[source]
    pub source: SplitError,
}

/// Validation failures raised by the widgets transformer.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WidgetError {
    #[error("Invalid value of \"{value}\" for event attribute \"{name}\". Target message not provided")]
    MissingTargetMessage { value: String, name: String },

    #[error("The \"{prefix}:el-id\" attribute cannot be used in conjuction with the \"id\" attribute")]
    ElIdConflict { prefix: String },
}

/// Failures while coercing a raw attribute value into an expression.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CoercionError {
    #[error("Dynamic expressions are not allowed in \"{value}\"")]
    DynamicValueNotAllowed { value: String },

    #[error("Unterminated \"${{\" placeholder in \"{value}\"")]
    UnterminatedPlaceholder { value: String },
}

/// Invalid [`WidgetsConfig`](crate::config::WidgetsConfig) values.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("config field \"{field}\" must not be empty")]
    EmptyField { field: &'static str },

    #[error("helper alias \"{alias}\" is not a valid identifier")]
    InvalidAlias { alias: String },
}
