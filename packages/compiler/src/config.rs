//! Widgets taglib configuration
//!
//! The vocabulary the transformer recognizes (namespace, tag name) and the
//! runtime helpers it calls. Defaults match the stock widgets taglib.

use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::error::ConfigError;

pub const DEFAULT_NAMESPACE: &str = "widgets";
pub const DEFAULT_PREFIX: &str = "w";
pub const DEFAULT_HELPER_MODULE: &str = "widgets/taglib/WidgetFunctions";

/// A runtime function the generated template calls, imported once under a
/// local alias.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HelperConfig {
    pub export_name: String,
    pub alias: String,
}

impl HelperConfig {
    pub fn new(export_name: impl Into<String>, alias: impl Into<String>) -> Self {
        HelperConfig {
            export_name: export_name.into(),
            alias: alias.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct WidgetsConfig {
    /// Namespace URI of the widget attributes and properties
    pub namespace: String,
    /// Prefix used when naming attributes in diagnostics (`w:el-id`)
    pub prefix: String,
    /// Local name of the widget tag handler
    pub widget_tag: String,
    pub helper_module: String,
    pub widget_args_helper: HelperConfig,
    pub cleanup_helper: HelperConfig,
}

impl Default for WidgetsConfig {
    fn default() -> Self {
        WidgetsConfig {
            namespace: DEFAULT_NAMESPACE.to_string(),
            prefix: DEFAULT_PREFIX.to_string(),
            widget_tag: "widget".to_string(),
            helper_module: DEFAULT_HELPER_MODULE.to_string(),
            widget_args_helper: HelperConfig::new("widgetArgs", "_widgetArgs"),
            cleanup_helper: HelperConfig::new("cleanupWidgetArgs", "_cleanupWidgetArgs"),
        }
    }
}

impl WidgetsConfig {
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let content = fs::read_to_string(path)?;
        let config = Self::from_json_str(&content)?;
        Ok(config)
    }

    pub fn from_json_str(content: &str) -> anyhow::Result<Self> {
        let config: WidgetsConfig = serde_json::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let required = [
            ("namespace", &self.namespace),
            ("prefix", &self.prefix),
            ("widgetTag", &self.widget_tag),
            ("helperModule", &self.helper_module),
        ];
        for (field, value) in required {
            if value.trim().is_empty() {
                return Err(ConfigError::EmptyField { field });
            }
        }

        for helper in [&self.widget_args_helper, &self.cleanup_helper] {
            if helper.export_name.trim().is_empty() {
                return Err(ConfigError::EmptyField { field: "exportName" });
            }
            if !is_identifier(&helper.alias) {
                return Err(ConfigError::InvalidAlias {
                    alias: helper.alias.clone(),
                });
            }
        }
        Ok(())
    }
}

fn is_identifier(name: &str) -> bool {
    let mut rest = name.chars();
    match rest.next() {
        Some(first) if crate::chars::is_identifier_start(first) => rest
            .all(|c| crate::chars::is_identifier_start(c) || crate::chars::is_digit(c)),
        _ => false,
    }
}
