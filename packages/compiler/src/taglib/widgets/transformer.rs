//! Widgets Transformer
//!
//! Four stages run on every element, in order:
//!
//! 1. property args: `id` and `event-*` properties become a
//!    `_widgetArgs(...)` call before the element and `_cleanupWidgetArgs()`
//!    after it
//! 2. widget class: a `widget` attribute wraps the element in a widget tag
//!    handler that instantiates the class
//! 3. el-id: an `el-id` attribute becomes an `id` scoped to the widget
//! 4. widget scope: a widget tag with an `id` gets `scope = widget`
//!
//! Each stage only acts when its markers are present. Problems are reported
//! to [`Diagnostics`] and never stop the remaining stages.

use bitflags::bitflags;

use crate::compiler::{CompilerHost, TargetType};
use crate::config::WidgetsConfig;
use crate::error::WidgetError;
use crate::markup::{AttrValue, Element, Node, QualifiedName};
use crate::output::output_ast as o;
use crate::parse_util::Diagnostics;
use crate::template::{HelperFunction, TemplateBuilder};

use super::args::WidgetArgs;
use super::events::{self, EventBinding};
use super::{CONFIG_ATTR, EL_ID_ATTR, EVENT_PREFIX, ID_ATTR, WIDGET_ATTR, WIDGET_SCOPE};

/// Placeholder the runtime replaces with the widget's generated element id
const GENERATED_EL_ID: &str = "${widget.elId()}";

bitflags! {
    /// Stages that changed the element
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct WidgetStages: u8 {
        const PROPERTY_ARGS = 0b0001;
        const WIDGET_CLASS = 0b0010;
        const EL_ID = 0b0100;
        const WIDGET_SCOPE = 0b1000;
    }
}

/// What [`WidgetsTransformer::transform_node`] did to one element.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WidgetTransformPlan {
    pub stages: WidgetStages,
    /// Namespaced attributes and properties taken off the element
    pub removed: Vec<QualifiedName>,
    pub pre_invoke: Option<o::Expression>,
    pub post_invoke: Option<o::Expression>,
    pub events: Vec<EventBinding>,
    /// The element now sits inside a new widget tag handler
    pub wrapped: bool,
}

impl WidgetTransformPlan {
    pub fn is_empty(&self) -> bool {
        self.stages.is_empty() && self.removed.is_empty()
    }
}

pub struct WidgetsTransformer<'a> {
    config: &'a WidgetsConfig,
    compiler: &'a dyn CompilerHost,
    template: &'a mut dyn TemplateBuilder,
    diagnostics: &'a mut Diagnostics,
}

impl<'a> WidgetsTransformer<'a> {
    pub fn new(
        config: &'a WidgetsConfig,
        compiler: &'a dyn CompilerHost,
        template: &'a mut dyn TemplateBuilder,
        diagnostics: &'a mut Diagnostics,
    ) -> Self {
        WidgetsTransformer {
            config,
            compiler,
            template,
            diagnostics,
        }
    }

    /// Run all four stages on `element`.
    ///
    /// When a `widget` attribute is present `element` is replaced in place by
    /// the new widget node and the original becomes its only child.
    pub fn transform_node(&mut self, element: &mut Element) -> WidgetTransformPlan {
        let mut plan = WidgetTransformPlan::default();

        self.apply_property_args(element, &mut plan);
        let wrapper = self.apply_widget_class(element, &mut plan);
        self.apply_el_id(element, &mut plan);
        self.apply_widget_scope(element, &mut plan);

        // Stages 3 and 4 look at the original element, so wrap last.
        if let Some(wrapper) = wrapper {
            element.wrap_with(wrapper);
            plan.wrapped = true;
        }

        if !plan.is_empty() {
            log::debug!(
                "widgets: <{}> stages={:?} removed={}",
                element.name,
                plan.stages,
                plan.removed.len()
            );
        }
        plan
    }

    /// Transform every element in `nodes` and their descendants, parents
    /// first. Elements created by the transform are not visited again.
    pub fn transform_all(&mut self, nodes: &mut [Node]) -> Vec<WidgetTransformPlan> {
        let mut plans = Vec::new();
        for node in nodes.iter_mut() {
            if let Node::Element(element) = node {
                self.transform_subtree(element, &mut plans);
            }
        }
        plans
    }

    fn transform_subtree(&mut self, element: &mut Element, plans: &mut Vec<WidgetTransformPlan>) {
        let plan = self.transform_node(element);
        let wrapped = plan.wrapped;
        plans.push(plan);

        let children = if wrapped {
            match element.children.last_mut() {
                Some(Node::Element(original)) => &mut original.children,
                _ => return,
            }
        } else {
            &mut element.children
        };
        for child in children.iter_mut() {
            if let Node::Element(child) = child {
                self.transform_subtree(child, plans);
            }
        }
    }

    fn apply_property_args(&mut self, element: &mut Element, plan: &mut WidgetTransformPlan) {
        let config = self.config;
        let ns = config.namespace.as_str();
        if element.attribute_ns(ns, WIDGET_ATTR).is_some() {
            return;
        }
        let props = element.properties_ns(ns);
        if props.is_empty() {
            return;
        }

        let span = element.source_span.clone();
        let mut args = WidgetArgs::default();
        let mut handled = Vec::new();

        for (name, value) in &props {
            if name == ID_ATTR {
                handled.push(name.as_str());
                let id = self.compiler.convert_type(
                    value,
                    TargetType::String,
                    true,
                    self.diagnostics,
                    span.as_ref(),
                );
                args.set_id(id);
            } else if let Some(source_event) = name.strip_prefix(EVENT_PREFIX) {
                handled.push(name.as_str());
                let binding = events::parse_event_binding(
                    name,
                    source_event,
                    &value.source_text(),
                    span.as_ref(),
                    self.diagnostics,
                );
                plan.events.extend(binding);
            }
        }

        for name in handled {
            if element.remove_property_ns(ns, name).is_some() {
                plan.removed.push(QualifiedName::ns(ns, name));
            }
        }

        args.events = events::events_literal(&plan.events);
        if args.is_empty() {
            return;
        }

        self.register_helpers();
        let pre_invoke = o::variable(config.widget_args_helper.alias.as_str())
            .call_fn(args.call_args().into_vec());
        let post_invoke = o::variable(config.cleanup_helper.alias.as_str()).call_fn(Vec::new());
        element.add_pre_invoke_code(pre_invoke.clone());
        element.add_post_invoke_code(post_invoke.clone());

        plan.stages |= WidgetStages::PROPERTY_ARGS;
        plan.pre_invoke = Some(pre_invoke);
        plan.post_invoke = Some(post_invoke);
    }

    fn register_helpers(&mut self) {
        let config = self.config;
        for helper in [&config.widget_args_helper, &config.cleanup_helper] {
            // The helper module exports both functions, so each is imported
            // as `require(module).export` rather than as a singleton module.
            self.template.add_helper_function(HelperFunction::new(
                config.helper_module.as_str(),
                helper.export_name.as_str(),
                false,
                helper.alias.as_str(),
            ));
        }
    }

    /// Returns the wrapper node; the caller performs the wrap.
    fn apply_widget_class(
        &mut self,
        element: &mut Element,
        plan: &mut WidgetTransformPlan,
    ) -> Option<Element> {
        let config = self.config;
        let ns = config.namespace.as_str();
        let class_value = element.remove_attribute_ns(ns, WIDGET_ATTR)?;
        plan.removed.push(QualifiedName::ns(ns, WIDGET_ATTR));
        plan.stages |= WidgetStages::WIDGET_CLASS;

        let span = element.source_span.clone();
        let class_expr = self.compiler.convert_type(
            &class_value,
            TargetType::String,
            true,
            self.diagnostics,
            span.as_ref(),
        );

        let assigned_id = match element.remove_attribute_ns(ns, ID_ATTR) {
            Some(value) => {
                plan.removed.push(QualifiedName::ns(ns, ID_ATTR));
                Some(self.compiler.convert_type(
                    &value,
                    TargetType::String,
                    true,
                    self.diagnostics,
                    span.as_ref(),
                ))
            }
            None => None,
        };

        let widget_config = match element.remove_attribute_ns(ns, CONFIG_ATTR) {
            Some(value) => {
                plan.removed.push(QualifiedName::ns(ns, CONFIG_ATTR));
                Some(self.compiler.convert_type(
                    &value,
                    TargetType::Expression,
                    true,
                    self.diagnostics,
                    span.as_ref(),
                ))
            }
            None => None,
        };

        let mut wrapper = self.compiler.create_tag_handler_node(ns, &config.widget_tag);
        wrapper.source_span = span.clone();
        wrapper.set_property(
            "path",
            o::variable("require")
                .prop("resolve")
                .call_fn(vec![class_expr]),
        );
        if let Some(widget_config) = widget_config {
            wrapper.set_property("config", widget_config);
        }
        if let Some(assigned_id) = assigned_id {
            wrapper.set_property("assignedId", assigned_id);
            wrapper.set_property("scope", self.template.make_expression(WIDGET_SCOPE));
        }

        match element.attribute(ID_ATTR).cloned() {
            Some(el_id) => {
                let el_id = self.compiler.convert_type(
                    &el_id,
                    TargetType::String,
                    true,
                    self.diagnostics,
                    span.as_ref(),
                );
                wrapper.set_property("elId", el_id);
            }
            None => element.set_attribute(ID_ATTR, GENERATED_EL_ID),
        }

        Some(wrapper)
    }

    fn apply_el_id(&mut self, element: &mut Element, plan: &mut WidgetTransformPlan) {
        let config = self.config;
        let ns = config.namespace.as_str();
        let Some(el_id) = element.remove_attribute_ns(ns, EL_ID_ATTR) else {
            return;
        };
        plan.removed.push(QualifiedName::ns(ns, EL_ID_ATTR));

        if element.has_attribute(ID_ATTR) {
            self.diagnostics.error(
                WidgetError::ElIdConflict {
                    prefix: config.prefix.clone(),
                }
                .to_string(),
                element.source_span.as_ref(),
            );
            return;
        }

        let override_id = match el_id {
            AttrValue::Text(text) => o::literal(text),
            AttrValue::Expression(expr) => expr,
        };
        element.set_attribute(
            ID_ATTR,
            o::variable(WIDGET_SCOPE)
                .prop("elId")
                .call_fn(vec![override_id]),
        );
        plan.stages |= WidgetStages::EL_ID;
    }

    fn apply_widget_scope(&mut self, element: &mut Element, plan: &mut WidgetTransformPlan) {
        let config = self.config;
        if !element.is_tag(&config.namespace, &config.widget_tag)
            || !element.has_attribute(ID_ATTR)
        {
            return;
        }
        element.set_property("scope", self.template.make_expression(WIDGET_SCOPE));
        plan.stages |= WidgetStages::WIDGET_SCOPE;
    }
}
