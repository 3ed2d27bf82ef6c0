//! Markup Tags
//!
//! Namespace-qualified names for elements, attributes and properties.

use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct QualifiedName {
    pub namespace: Option<String>,
    pub local_name: String,
}

impl QualifiedName {
    pub fn new(namespace: Option<&str>, local_name: impl Into<String>) -> Self {
        QualifiedName {
            namespace: namespace.map(str::to_string),
            local_name: local_name.into(),
        }
    }

    pub fn plain(local_name: impl Into<String>) -> Self {
        Self::new(None, local_name)
    }

    pub fn ns(namespace: &str, local_name: impl Into<String>) -> Self {
        Self::new(Some(namespace), local_name)
    }

    pub fn matches(&self, namespace: Option<&str>, local_name: &str) -> bool {
        self.namespace.as_deref() == namespace && self.local_name == local_name
    }
}

impl fmt::Display for QualifiedName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&merge_ns_and_name(self.namespace.as_deref(), &self.local_name))
    }
}

/// Split namespace and name from a `:namespace:name` string
///
/// Returns: (namespace, name) or (None, name)
pub fn split_ns_name(qualified: &str) -> Result<(Option<&str>, &str), String> {
    let Some(rest) = qualified.strip_prefix(':') else {
        return Ok((None, qualified));
    };
    match rest.find(':') {
        Some(idx) if idx > 0 => Ok((Some(&rest[..idx]), &rest[idx + 1..])),
        _ => Err(format!(
            "Unsupported format \"{}\" expecting \":namespace:name\"",
            qualified
        )),
    }
}

/// Merge namespace and local name
pub fn merge_ns_and_name(namespace: Option<&str>, local_name: &str) -> String {
    match namespace {
        Some(ns) if !ns.is_empty() => format!(":{}:{}", ns, local_name),
        _ => local_name.to_string(),
    }
}

impl std::str::FromStr for QualifiedName {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (namespace, local_name) = split_ns_name(s)?;
        Ok(QualifiedName::new(namespace, local_name))
    }
}
