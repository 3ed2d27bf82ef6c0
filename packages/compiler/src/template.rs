//! Template Builder
//!
//! Code-generation services a compiled template offers to taglib transforms.

use indexmap::IndexMap;

use crate::output::emit_statement;
use crate::output::output_ast as o;
use crate::util::json_string;

/// A runtime function imported by the generated template under a local alias.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HelperFunction {
    pub module_path: String,
    pub export_name: String,
    pub singleton: bool,
    pub alias: String,
}

impl HelperFunction {
    pub fn new(
        module_path: impl Into<String>,
        export_name: impl Into<String>,
        singleton: bool,
        alias: impl Into<String>,
    ) -> Self {
        HelperFunction {
            module_path: module_path.into(),
            export_name: export_name.into(),
            singleton,
            alias: alias.into(),
        }
    }

    /// `require("<module>").<export>` (or `require("<module>")` for singletons)
    pub fn import_expression(&self) -> o::Expression {
        let module = o::variable("require").call_fn(vec![o::literal(self.module_path.as_str())]);
        if self.singleton {
            module
        } else {
            module.prop(self.export_name.as_str())
        }
    }
}

pub trait TemplateBuilder {
    /// Wrap a code fragment as an expression.
    fn make_expression(&self, code: &str) -> o::Expression {
        o::raw_code(code)
    }

    /// Declare a helper. Registering the same alias again is a no-op.
    fn add_helper_function(&mut self, helper: HelperFunction);
}

/// Helper registry for one compiled template.
#[derive(Debug, Clone, Default)]
pub struct TemplateContext {
    helpers: IndexMap<String, HelperFunction>,
}

impl TemplateContext {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn helpers(&self) -> impl Iterator<Item = &HelperFunction> {
        self.helpers.values()
    }

    pub fn helper(&self, alias: &str) -> Option<&HelperFunction> {
        self.helpers.get(alias)
    }

    /// `var <alias> = require(...)...;` for every helper, in registration order.
    pub fn helper_declarations(&self) -> Vec<String> {
        self.helpers
            .values()
            .map(|helper| {
                format!(
                    "var {} = {}",
                    helper.alias,
                    emit_statement(&helper.import_expression())
                )
            })
            .collect()
    }
}

impl TemplateBuilder for TemplateContext {
    fn add_helper_function(&mut self, helper: HelperFunction) {
        match self.helpers.get(&helper.alias) {
            Some(existing) if *existing == helper => {}
            Some(existing) => {
                log::warn!(
                    "helper alias {} already bound to {}; ignoring {}",
                    helper.alias,
                    json_string(&existing.module_path),
                    json_string(&helper.module_path)
                );
            }
            None => {
                log::debug!("registering helper {} -> {}", helper.alias, helper.export_name);
                self.helpers.insert(helper.alias.clone(), helper);
            }
        }
    }
}
