#![deny(clippy::all)]

/**
 * Widgets Taglib Compiler
 *
 * Compile-time stage that splits structured attribute values and rewrites
 * widget markup into wrapper nodes and runtime helper calls
 */

// Core modules
pub mod attribute_splitter;
pub mod chars;
pub mod compiler;
pub mod config;
pub mod error;
pub mod parse_util;
pub mod template;
pub mod util;

// Node model and generated code
pub mod markup;
pub mod output;

// Taglib transforms
pub mod taglib;

// Re-exports
pub use attribute_splitter::{
    split, FieldKind, FieldSchema, FieldSpec, FieldValue, ParsedFields, SplitOptions,
};
pub use compiler::{CompilerHost, DefaultCompiler, TargetType};
pub use config::WidgetsConfig;
pub use parse_util::{Diagnostics, ParseError, ParseErrorLevel, ParseSourceSpan};
pub use taglib::widgets::{WidgetTransformPlan, WidgetsTransformer};
pub use template::{HelperFunction, TemplateBuilder, TemplateContext};

/// Run the widgets transform over a parsed template.
///
/// Returns the plan for every element visited, parents first.
pub fn transform_tree<'a>(
    nodes: &mut [markup::Node],
    config: &'a WidgetsConfig,
    compiler: &'a dyn CompilerHost,
    template: &'a mut dyn TemplateBuilder,
    diagnostics: &'a mut Diagnostics,
) -> Vec<WidgetTransformPlan> {
    WidgetsTransformer::new(config, compiler, template, diagnostics).transform_all(nodes)
}
