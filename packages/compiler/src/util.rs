//! Utility Functions

use once_cell::sync::Lazy;
use regex::Regex;

/// Regex for dash-case to camelCase conversion
static DASH_CASE_REGEXP: Lazy<Regex> = Lazy::new(|| Regex::new(r"-+([a-z0-9])").unwrap());

/// Convert dash-case to camelCase
pub fn dash_case_to_camel_case(input: &str) -> String {
    DASH_CASE_REGEXP
        .replace_all(input, |caps: &regex::Captures| caps[1].to_uppercase())
        .into_owned()
}

/// Quote `value` as a JSON string literal, which is also a valid JavaScript
/// string literal.
pub fn json_string(value: &str) -> String {
    serde_json::Value::String(value.to_string()).to_string()
}
