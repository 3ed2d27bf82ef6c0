//! Widgets Transformer Tests

use widgets_compiler::compiler::DefaultCompiler;
use widgets_compiler::config::WidgetsConfig;
use widgets_compiler::markup::{AttrValue, Element, QualifiedName};
use widgets_compiler::output::emit_expression;
use widgets_compiler::output::output_ast as o;
use widgets_compiler::parse_util::{Diagnostics, ParseSourceSpan};
use widgets_compiler::taglib::widgets::{WidgetStages, WidgetTransformPlan, WidgetsTransformer};
use widgets_compiler::template::TemplateContext;

struct Outcome {
    plan: WidgetTransformPlan,
    template: TemplateContext,
    diagnostics: Diagnostics,
}

fn transform_with(config: &WidgetsConfig, element: &mut Element) -> Outcome {
    let mut template = TemplateContext::new();
    let mut diagnostics = Diagnostics::new();
    let plan = WidgetsTransformer::new(config, &DefaultCompiler, &mut template, &mut diagnostics)
        .transform_node(element);
    Outcome {
        plan,
        template,
        diagnostics,
    }
}

fn transform(element: &mut Element) -> Outcome {
    transform_with(&WidgetsConfig::default(), element)
}

fn printed(expr: Option<&o::Expression>) -> Option<String> {
    expr.map(emit_expression)
}

fn printed_value(value: Option<&AttrValue>) -> Option<String> {
    value.map(AttrValue::source_text)
}

mod property_args {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn should_emit_widget_args_for_assigned_id() {
        let mut el = Element::html("div").with_property_ns("widgets", "id", "x");
        let out = transform(&mut el);

        assert_eq!(
            printed(out.plan.pre_invoke.as_ref()).as_deref(),
            Some("_widgetArgs(\"x\", \"widget\")")
        );
        assert_eq!(
            printed(out.plan.post_invoke.as_ref()).as_deref(),
            Some("_cleanupWidgetArgs()")
        );
        assert_eq!(el.pre_invoke_code.len(), 1);
        assert_eq!(el.post_invoke_code.len(), 1);
        assert!(el.properties.is_empty());
        assert_eq!(out.plan.stages, WidgetStages::PROPERTY_ARGS);
        assert!(out.diagnostics.is_empty());
    }

    #[test]
    fn should_register_both_helpers() {
        let mut el = Element::html("div").with_property_ns("widgets", "id", "x");
        let out = transform(&mut el);

        assert_eq!(
            out.template.helper_declarations(),
            vec![
                "var _widgetArgs = require(\"widgets/taglib/WidgetFunctions\").widgetArgs;",
                "var _cleanupWidgetArgs = require(\"widgets/taglib/WidgetFunctions\").cleanupWidgetArgs;",
            ]
        );
    }

    #[test]
    fn should_register_helpers_once_across_nodes() {
        let config = WidgetsConfig::default();
        let mut template = TemplateContext::new();
        let mut diagnostics = Diagnostics::new();
        let mut transformer =
            WidgetsTransformer::new(&config, &DefaultCompiler, &mut template, &mut diagnostics);

        let mut a = Element::html("div").with_property_ns("widgets", "id", "a");
        let mut b = Element::html("div").with_property_ns("widgets", "event-click", "onClick");
        transformer.transform_node(&mut a);
        transformer.transform_node(&mut b);

        assert_eq!(template.helpers().count(), 2);
    }

    #[test]
    fn should_emit_events_for_bare_target() {
        let mut el = Element::html("button").with_property_ns("widgets", "event-click", "onClick");
        let out = transform(&mut el);

        let binding = &out.plan.events[0];
        assert_eq!(binding.source_event, "click");
        assert_eq!(binding.target_message, "onClick");
        assert!(binding.event_props.is_empty());
        assert_eq!(
            printed(out.plan.pre_invoke.as_ref()).as_deref(),
            Some("_widgetArgs(null, null, [[\"click\",\"onClick\"]])")
        );
    }

    #[test]
    fn should_emit_event_props_as_expressions() {
        let mut el = Element::html("button").with_property_ns(
            "widgets",
            "event-click",
            "foo=bar; target=onClick",
        );
        let out = transform(&mut el);

        assert_eq!(out.plan.events[0].target_message, "onClick");
        assert_eq!(
            printed(out.plan.pre_invoke.as_ref()).as_deref(),
            Some("_widgetArgs(null, null, [[\"click\",\"onClick\",{\"foo\": bar}]])")
        );
    }

    #[test]
    fn should_pass_id_scope_and_events_in_order() {
        let mut el = Element::html("div")
            .with_property_ns("widgets", "event-mouseover", "onHover")
            .with_property_ns("widgets", "id", "main");
        let out = transform(&mut el);

        assert_eq!(
            printed(out.plan.pre_invoke.as_ref()).as_deref(),
            Some("_widgetArgs(\"main\", \"widget\", [[\"mouseover\",\"onHover\"]])")
        );
    }

    #[test]
    fn should_build_tuples_by_event_props() {
        let mut el = Element::html("div")
            .with_property_ns("widgets", "event-click", "onClick")
            .with_property_ns("widgets", "event-focus", "onFocus")
            .with_property_ns("widgets", "event-tap", "delay=100; target=onTap");
        let out = transform(&mut el);

        let lengths: Vec<usize> = out
            .plan
            .events
            .iter()
            .map(|binding| match binding.to_expression() {
                o::Expression::LiteralArray(tuple) => tuple.entries.len(),
                other => panic!("unexpected event expression {}", other),
            })
            .collect();
        assert_eq!(lengths, vec![2, 2, 3]);
    }

    #[test]
    fn should_coerce_dynamic_id() {
        let mut el = Element::html("li").with_property_ns("widgets", "id", "item-${i}");
        let out = transform(&mut el);
        assert_eq!(
            printed(out.plan.pre_invoke.as_ref()).as_deref(),
            Some("_widgetArgs(\"item-\" + (i), \"widget\")")
        );
    }

    #[test]
    fn should_pass_expression_id_through() {
        let mut el = Element::html("li").with_property_ns("widgets", "id", o::raw_code("data.id"));
        let out = transform(&mut el);
        assert_eq!(
            printed(out.plan.pre_invoke.as_ref()).as_deref(),
            Some("_widgetArgs(data.id, \"widget\")")
        );
    }

    #[test]
    fn should_leave_unrelated_properties() {
        let mut el = Element::html("div")
            .with_property_ns("widgets", "id", "x")
            .with_property_ns("widgets", "body", "content")
            .with_property_ns("other", "id", "y");
        transform(&mut el);

        let remaining: Vec<String> = el.properties.iter().map(|p| p.name.to_string()).collect();
        assert_eq!(remaining, vec![":widgets:body", ":other:id"]);
    }

    #[test]
    fn should_skip_when_widget_attribute_present() {
        let mut el = Element::html("div")
            .with_attribute_ns("widgets", "widget", "./W")
            .with_property_ns("widgets", "id", "x");
        let out = transform(&mut el);

        assert!(out.plan.pre_invoke.is_none());
        let original = el.children[0].as_element().unwrap();
        assert_eq!(original.properties.len(), 1);
    }
}

mod event_errors {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn should_drop_binding_without_target_and_report_once() {
        let mut el = Element::html("button").with_property_ns("widgets", "event-click", "foo=bar");
        let out = transform(&mut el);

        assert!(out.plan.events.is_empty());
        assert_eq!(
            out.diagnostics.messages(),
            vec!["Invalid value of \"foo=bar\" for event attribute \"event-click\". Target message not provided"]
        );
        assert!(out.plan.pre_invoke.is_none());
        assert_eq!(out.template.helpers().count(), 0);
    }

    #[test]
    fn should_remove_rejected_properties() {
        let mut el = Element::html("button").with_property_ns("widgets", "event-click", "foo=bar");
        let out = transform(&mut el);

        assert!(el.properties.is_empty());
        assert_eq!(
            out.plan.removed,
            vec![QualifiedName::ns("widgets", "event-click")]
        );
    }

    #[test]
    fn should_keep_valid_bindings_next_to_invalid_ones() {
        let mut el = Element::html("button")
            .with_property_ns("widgets", "event-click", "")
            .with_property_ns("widgets", "event-tap", "onTap");
        let out = transform(&mut el);

        assert_eq!(out.diagnostics.len(), 1);
        assert_eq!(
            printed(out.plan.pre_invoke.as_ref()).as_deref(),
            Some("_widgetArgs(null, null, [[\"tap\",\"onTap\"]])")
        );
    }

    #[test]
    fn should_report_splitter_errors_with_attribute_name() {
        let mut el = Element::html("button").with_property_ns(
            "widgets",
            "event-click",
            "onClick; onTap",
        );
        let out = transform(&mut el);

        assert_eq!(out.plan.events.len(), 1);
        let messages = out.diagnostics.messages();
        assert_eq!(messages.len(), 1);
        assert!(messages[0]
            .starts_with("Invalid value of \"onClick; onTap\" for event attribute \"event-click\". Error: "));
    }

    #[test]
    fn should_remove_repeated_property_each_time() {
        let mut el = Element::html("button")
            .with_property_ns("widgets", "event-click", "a")
            .with_property_ns("widgets", "event-click", "b");
        let out = transform(&mut el);

        assert!(el.properties.is_empty());
        assert_eq!(out.plan.removed.len(), 2);
    }
}

mod widget_class {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn should_wrap_node_in_widget_handler() {
        let mut el = Element::html("div")
            .with_attribute_ns("widgets", "widget", "./MyWidget")
            .with_attribute("class", "box");
        let out = transform(&mut el);

        assert!(out.plan.wrapped);
        assert!(el.is_tag_handler);
        assert!(el.is_tag("widgets", "widget"));
        assert_eq!(
            printed_value(el.property("path")).as_deref(),
            Some("require.resolve(\"./MyWidget\")")
        );
        assert!(el.property("scope").is_none());
        assert!(el.property("config").is_none());

        assert_eq!(el.children.len(), 1);
        let original = el.children[0].as_element().unwrap();
        assert_eq!(original.name, QualifiedName::plain("div"));
        assert_eq!(original.attribute("id"), Some(&AttrValue::from("${widget.elId()}")));
        assert!(original.attribute_ns("widgets", "widget").is_none());
        assert_eq!(original.attribute("class"), Some(&AttrValue::from("box")));
    }

    #[test]
    fn should_copy_assigned_id_config_and_el_id() {
        let mut el = Element::html("div")
            .with_attribute_ns("widgets", "widget", "./MyWidget")
            .with_attribute_ns("widgets", "id", "main")
            .with_attribute_ns("widgets", "config", "{size: 2}")
            .with_attribute("id", "root");
        let out = transform(&mut el);

        assert_eq!(printed_value(el.property("assignedId")).as_deref(), Some("\"main\""));
        assert_eq!(printed_value(el.property("scope")).as_deref(), Some("widget"));
        assert_eq!(printed_value(el.property("config")).as_deref(), Some("{size: 2}"));
        assert_eq!(printed_value(el.property("elId")).as_deref(), Some("\"root\""));

        let original = el.children[0].as_element().unwrap();
        assert_eq!(original.attribute("id"), Some(&AttrValue::from("root")));
        assert!(original.attrs.iter().all(|a| a.name.namespace.is_none()));
        assert_eq!(out.plan.removed.len(), 3);
        assert!(out.diagnostics.is_empty());
    }

    #[test]
    fn should_conflict_with_el_id_after_synthesizing_id() {
        let mut el = Element::html("div")
            .with_attribute_ns("widgets", "widget", "./MyWidget")
            .with_attribute_ns("widgets", "el-id", "foo");
        let out = transform(&mut el);

        assert_eq!(out.diagnostics.len(), 1);
        let original = el.children[0].as_element().unwrap();
        assert_eq!(original.attribute("id"), Some(&AttrValue::from("${widget.elId()}")));
        assert!(original.attribute_ns("widgets", "el-id").is_none());
    }
}

mod el_id {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn should_set_id_from_el_id() {
        let mut el = Element::html("input").with_attribute_ns("widgets", "el-id", "name");
        let out = transform(&mut el);

        assert_eq!(
            printed_value(el.attribute("id")).as_deref(),
            Some("widget.elId(\"name\")")
        );
        assert!(el.attribute_ns("widgets", "el-id").is_none());
        assert_eq!(out.plan.stages, WidgetStages::EL_ID);
    }

    #[test]
    fn should_report_conflict_with_plain_id() {
        let mut el = Element::html("input")
            .with_attribute("id", "fixed")
            .with_attribute_ns("widgets", "el-id", "foo");
        let out = transform(&mut el);

        assert_eq!(
            out.diagnostics.messages(),
            vec!["The \"w:el-id\" attribute cannot be used in conjuction with the \"id\" attribute"]
        );
        assert_eq!(el.attribute("id"), Some(&AttrValue::from("fixed")));
        assert!(el.attribute_ns("widgets", "el-id").is_none());
        assert!(!out.plan.stages.contains(WidgetStages::EL_ID));
    }

    #[test]
    fn should_attach_element_span_to_conflict() {
        let source = "<input id=\"fixed\" w:el-id=\"foo\">";
        let span = ParseSourceSpan::for_content(source, "form.html");
        let mut el = Element::html("input")
            .with_attribute("id", "fixed")
            .with_attribute_ns("widgets", "el-id", "foo")
            .with_source_span(span.clone());
        let out = transform(&mut el);

        let error = out.diagnostics.iter().next().unwrap();
        assert_eq!(error.span.as_ref(), Some(&span));
        assert!(error.to_string().ends_with(": form.html@0:0"));
    }
}

mod widget_scope {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn should_scope_widget_tag_with_id() {
        let mut el = Element::tag_handler("widgets", "widget").with_attribute("id", "w1");
        let out = transform(&mut el);

        assert_eq!(el.property("scope"), Some(&AttrValue::from(o::raw_code("widget"))));
        assert_eq!(out.plan.stages, WidgetStages::WIDGET_SCOPE);
    }

    #[test]
    fn should_be_idempotent() {
        let mut el = Element::tag_handler("widgets", "widget").with_attribute("id", "w1");
        transform(&mut el);
        let once = el.clone();
        transform(&mut el);

        assert_eq!(el, once);
        assert_eq!(el.properties.len(), 1);
    }

    #[test]
    fn should_ignore_widget_tag_without_id() {
        let mut el = Element::tag_handler("widgets", "widget");
        let out = transform(&mut el);
        assert!(el.property("scope").is_none());
        assert!(out.plan.is_empty());
    }

    #[test]
    fn should_ignore_same_name_in_other_namespace() {
        let mut el = Element::tag_handler("ui", "widget").with_attribute("id", "w1");
        transform(&mut el);
        assert!(el.property("scope").is_none());
    }
}

mod configuration {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn should_follow_configured_vocabulary() {
        let config = WidgetsConfig::from_json_str(
            r#"{
                "namespace": "raptor-widgets",
                "helperModule": "raptor/templating/taglibs/widgets/WidgetFunctions"
            }"#,
        )
        .unwrap();

        let mut el = Element::html("div")
            .with_property_ns("raptor-widgets", "id", "x")
            .with_attribute_ns("raptor-widgets", "el-id", "e");
        let out = transform_with(&config, &mut el);

        assert!(el.properties.is_empty());
        assert!(out.plan.stages.contains(WidgetStages::PROPERTY_ARGS | WidgetStages::EL_ID));
        assert_eq!(
            out.template.helper("_widgetArgs").map(|h| h.module_path.as_str()),
            Some("raptor/templating/taglibs/widgets/WidgetFunctions")
        );
    }

    #[test]
    fn should_use_configured_prefix_in_messages() {
        let config = WidgetsConfig::from_json_str(r#"{"prefix": "wd"}"#).unwrap();
        let mut el = Element::html("input")
            .with_attribute("id", "fixed")
            .with_attribute_ns("widgets", "el-id", "foo");
        let out = transform_with(&config, &mut el);

        assert!(out.diagnostics.messages()[0].starts_with("The \"wd:el-id\" attribute"));
    }
}
