//! Markup AST
//!
//! Template node model handed to compile-time transforms. Elements keep
//! their attributes (as written in markup) separately from properties
//! (inputs of a tag handler), and carry the code fragments that run right
//! before and after the element's own generated invocation.

use crate::output::abstract_emitter::emit_expression;
use crate::output::output_ast as o;
use crate::parse_util::ParseSourceSpan;

use super::tags::QualifiedName;

/// Value of an attribute or property: either text as written in the
/// template or an expression produced by a transform.
#[derive(Debug, Clone, PartialEq)]
pub enum AttrValue {
    Text(String),
    Expression(o::Expression),
}

impl AttrValue {
    /// Source text of the value. Expressions are printed.
    pub fn source_text(&self) -> String {
        match self {
            AttrValue::Text(text) => text.clone(),
            AttrValue::Expression(expr) => emit_expression(expr),
        }
    }
}

impl From<&str> for AttrValue {
    fn from(text: &str) -> Self {
        AttrValue::Text(text.to_string())
    }
}

impl From<String> for AttrValue {
    fn from(text: String) -> Self {
        AttrValue::Text(text)
    }
}

impl From<o::Expression> for AttrValue {
    fn from(expr: o::Expression) -> Self {
        AttrValue::Expression(expr)
    }
}

/// Attribute or property entry
#[derive(Debug, Clone, PartialEq)]
pub struct Attribute {
    pub name: QualifiedName,
    pub value: AttrValue,
    pub source_span: Option<ParseSourceSpan>,
}

impl Attribute {
    pub fn new(name: QualifiedName, value: impl Into<AttrValue>) -> Self {
        Attribute {
            name,
            value: value.into(),
            source_span: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    Element(Element),
    Text(Text),
}

impl Node {
    pub fn as_element(&self) -> Option<&Element> {
        match self {
            Node::Element(el) => Some(el),
            Node::Text(_) => None,
        }
    }
}

impl From<Element> for Node {
    fn from(element: Element) -> Self {
        Node::Element(element)
    }
}

impl From<Text> for Node {
    fn from(text: Text) -> Self {
        Node::Text(text)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Text {
    pub value: String,
    pub source_span: Option<ParseSourceSpan>,
}

impl Text {
    pub fn new(value: impl Into<String>) -> Self {
        Text {
            value: value.into(),
            source_span: None,
        }
    }
}

/// Element node
///
/// Plain HTML elements and tag handlers share this type; `is_tag_handler`
/// marks nodes that compile to a runtime handler call instead of markup.
#[derive(Debug, Clone, PartialEq)]
pub struct Element {
    pub name: QualifiedName,
    pub is_tag_handler: bool,
    pub attrs: Vec<Attribute>,
    pub properties: Vec<Attribute>,
    pub children: Vec<Node>,
    pub pre_invoke_code: Vec<o::Expression>,
    pub post_invoke_code: Vec<o::Expression>,
    pub source_span: Option<ParseSourceSpan>,
}

impl Element {
    pub fn new(name: QualifiedName) -> Self {
        Element {
            name,
            is_tag_handler: false,
            attrs: Vec::new(),
            properties: Vec::new(),
            children: Vec::new(),
            pre_invoke_code: Vec::new(),
            post_invoke_code: Vec::new(),
            source_span: None,
        }
    }

    /// Plain markup element, e.g. `<div>`
    pub fn html(local_name: &str) -> Self {
        Self::new(QualifiedName::plain(local_name))
    }

    pub fn tag_handler(namespace: &str, local_name: &str) -> Self {
        Element {
            is_tag_handler: true,
            ..Self::new(QualifiedName::ns(namespace, local_name))
        }
    }

    pub fn with_attribute(mut self, name: &str, value: impl Into<AttrValue>) -> Self {
        self.set_attribute(name, value);
        self
    }

    pub fn with_attribute_ns(
        mut self,
        namespace: &str,
        name: &str,
        value: impl Into<AttrValue>,
    ) -> Self {
        self.attrs
            .push(Attribute::new(QualifiedName::ns(namespace, name), value));
        self
    }

    pub fn with_property_ns(
        mut self,
        namespace: &str,
        name: &str,
        value: impl Into<AttrValue>,
    ) -> Self {
        self.properties
            .push(Attribute::new(QualifiedName::ns(namespace, name), value));
        self
    }

    pub fn with_child(mut self, child: impl Into<Node>) -> Self {
        self.children.push(child.into());
        self
    }

    pub fn with_source_span(mut self, span: ParseSourceSpan) -> Self {
        self.source_span = Some(span);
        self
    }

    pub fn is_tag(&self, namespace: &str, local_name: &str) -> bool {
        self.name.matches(Some(namespace), local_name)
    }

    // Attributes

    pub fn attribute_ns(&self, namespace: &str, name: &str) -> Option<&AttrValue> {
        find(&self.attrs, Some(namespace), name).map(|a| &a.value)
    }

    pub fn remove_attribute_ns(&mut self, namespace: &str, name: &str) -> Option<AttrValue> {
        remove(&mut self.attrs, Some(namespace), name)
    }

    pub fn attribute(&self, name: &str) -> Option<&AttrValue> {
        find(&self.attrs, None, name).map(|a| &a.value)
    }

    pub fn has_attribute(&self, name: &str) -> bool {
        self.attribute(name).is_some()
    }

    pub fn set_attribute(&mut self, name: &str, value: impl Into<AttrValue>) {
        upsert(&mut self.attrs, QualifiedName::plain(name), value.into());
    }

    // Properties

    /// Snapshot of the properties in `namespace`, keyed by local name, in
    /// declaration order.
    pub fn properties_ns(&self, namespace: &str) -> Vec<(String, AttrValue)> {
        self.properties
            .iter()
            .filter(|p| p.name.namespace.as_deref() == Some(namespace))
            .map(|p| (p.name.local_name.clone(), p.value.clone()))
            .collect()
    }

    pub fn remove_property_ns(&mut self, namespace: &str, name: &str) -> Option<AttrValue> {
        remove(&mut self.properties, Some(namespace), name)
    }

    pub fn property(&self, name: &str) -> Option<&AttrValue> {
        find(&self.properties, None, name).map(|p| &p.value)
    }

    pub fn set_property(&mut self, name: &str, value: impl Into<AttrValue>) {
        upsert(&mut self.properties, QualifiedName::plain(name), value.into());
    }

    // Children and generated code

    pub fn append_child(&mut self, child: impl Into<Node>) {
        self.children.push(child.into());
    }

    pub fn add_pre_invoke_code(&mut self, code: o::Expression) {
        self.pre_invoke_code.push(code);
    }

    pub fn add_post_invoke_code(&mut self, code: o::Expression) {
        self.post_invoke_code.push(code);
    }

    /// Replace this element with `wrapper` and move it into the wrapper as
    /// its last child.
    pub fn wrap_with(&mut self, wrapper: Element) {
        let original = std::mem::replace(self, wrapper);
        self.append_child(original);
    }
}

fn find<'a>(list: &'a [Attribute], namespace: Option<&str>, name: &str) -> Option<&'a Attribute> {
    list.iter().find(|a| a.name.matches(namespace, name))
}

fn remove(list: &mut Vec<Attribute>, namespace: Option<&str>, name: &str) -> Option<AttrValue> {
    let index = list.iter().position(|a| a.name.matches(namespace, name))?;
    Some(list.remove(index).value)
}

fn upsert(list: &mut Vec<Attribute>, name: QualifiedName, value: AttrValue) {
    match list.iter_mut().find(|a| a.name == name) {
        Some(existing) => existing.value = value,
        None => list.push(Attribute::new(name, value)),
    }
}
