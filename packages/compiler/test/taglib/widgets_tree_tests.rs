//! Widgets Tree Tests
//!
//! Whole-template runs of the widgets transform.

use widgets_compiler::markup::{AttrValue, Element, Node, Text};
use widgets_compiler::output::emit_expression;
use widgets_compiler::{
    transform_tree, DefaultCompiler, Diagnostics, TemplateContext, WidgetsConfig,
};

fn element(node: &Node) -> &Element {
    node.as_element().expect("element node")
}

fn page() -> Vec<Node> {
    vec![Element::html("main")
        .with_child(
            Element::html("section")
                .with_attribute_ns("widgets", "widget", "./Tabs")
                .with_child(Element::html("ul").with_attribute_ns("widgets", "el-id", "list"))
                .with_child(Text::new("tabs")),
        )
        .with_child(
            Element::html("button").with_property_ns("widgets", "event-click", "onSave"),
        )
        .into()]
}

#[test]
fn should_transform_every_element_once() {
    let mut nodes = page();
    let config = WidgetsConfig::default();
    let mut template = TemplateContext::new();
    let mut diagnostics = Diagnostics::new();

    let plans = transform_tree(
        &mut nodes,
        &config,
        &DefaultCompiler,
        &mut template,
        &mut diagnostics,
    );

    // main, section (wrapped), ul, button
    assert_eq!(plans.len(), 4);
    assert_eq!(plans.iter().filter(|p| p.wrapped).count(), 1);
    assert!(diagnostics.is_empty());
}

#[test]
fn should_rewrite_nested_markup() {
    let mut nodes = page();
    let config = WidgetsConfig::default();
    let mut template = TemplateContext::new();
    let mut diagnostics = Diagnostics::new();
    transform_tree(
        &mut nodes,
        &config,
        &DefaultCompiler,
        &mut template,
        &mut diagnostics,
    );

    let main = element(&nodes[0]);
    let wrapper = element(&main.children[0]);
    assert!(wrapper.is_tag("widgets", "widget"));

    let section = element(&wrapper.children[0]);
    assert_eq!(section.attribute("id"), Some(&AttrValue::from("${widget.elId()}")));

    let list = element(&section.children[0]);
    assert_eq!(
        list.attribute("id").map(AttrValue::source_text).as_deref(),
        Some("widget.elId(\"list\")")
    );

    let button = element(&main.children[1]);
    assert_eq!(
        button.pre_invoke_code.iter().map(emit_expression).collect::<Vec<_>>(),
        vec!["_widgetArgs(null, null, [[\"click\",\"onSave\"]])"]
    );
    assert_eq!(template.helpers().count(), 2);
}

#[test]
fn should_collect_diagnostics_across_nodes() {
    let mut nodes: Vec<Node> = vec![
        Element::html("a")
            .with_property_ns("widgets", "event-click", "x=1")
            .into(),
        Element::html("b")
            .with_attribute("id", "b")
            .with_attribute_ns("widgets", "el-id", "b")
            .into(),
        Node::Text(Text::new("plain")),
    ];
    let config = WidgetsConfig::default();
    let mut template = TemplateContext::new();
    let mut diagnostics = Diagnostics::new();

    let plans = transform_tree(
        &mut nodes,
        &config,
        &DefaultCompiler,
        &mut template,
        &mut diagnostics,
    );

    assert_eq!(plans.len(), 2);
    assert_eq!(diagnostics.len(), 2);
    assert!(diagnostics.has_errors());
}
