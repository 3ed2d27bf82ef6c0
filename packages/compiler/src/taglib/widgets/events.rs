//! Event bindings declared with `event-<name>` properties.
//!
//! ```text
//! w:event-click="onClick"
//! w:event-click="foo=bar; target=onClick"
//! ```

use crate::attribute_splitter::{
    self, FieldSchema, FieldSpec, ParsedFields, SplitOptions, WILDCARD,
};
use crate::error::WidgetError;
use crate::output::output_ast as o;
use crate::parse_util::{Diagnostics, ParseSourceSpan};

/// Field naming the widget method that receives the event
pub const TARGET_FIELD: &str = "target";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventBinding {
    pub source_event: String,
    pub target_message: String,
    /// Extra fields; values are expression source
    pub event_props: ParsedFields,
}

/// Any field is an expression except `target`.
pub fn event_schema() -> FieldSchema {
    FieldSchema::new()
        .with(WILDCARD, FieldSpec::expression())
        .with(TARGET_FIELD, FieldSpec::custom())
}

/// Parse the value of the `attr_name` property (`event-click`) into a
/// binding for `source_event` (`click`).
///
/// A value without a target is reported and yields `None`.
pub fn parse_event_binding(
    attr_name: &str,
    source_event: &str,
    value: &str,
    span: Option<&ParseSourceSpan>,
    diagnostics: &mut Diagnostics,
) -> Option<EventBinding> {
    let options = SplitOptions::new()
        .default_name(TARGET_FIELD)
        .subject(format!("event attribute \"{}\"", attr_name))
        .source_span(span.cloned());
    let mut event_props = attribute_splitter::split(value, &event_schema(), &options, diagnostics);

    let target_message = event_props
        .shift_remove(TARGET_FIELD)
        .map(|target| target.into_string())
        .filter(|target| !target.is_empty());

    let Some(target_message) = target_message else {
        diagnostics.error(
            WidgetError::MissingTargetMessage {
                value: value.to_string(),
                name: attr_name.to_string(),
            }
            .to_string(),
            span,
        );
        return None;
    };

    Some(EventBinding {
        source_event: source_event.to_string(),
        target_message,
        event_props,
    })
}

impl EventBinding {
    /// `["click","onClick"]`, or `["click","onClick",{"foo": bar}]` when
    /// there are event props.
    pub fn to_expression(&self) -> o::Expression {
        let mut entries = vec![
            o::literal(self.source_event.as_str()),
            o::literal(self.target_message.as_str()),
        ];
        if !self.event_props.is_empty() {
            let props = self
                .event_props
                .iter()
                .map(|(name, value)| {
                    o::LiteralMapEntry::new(name.as_str(), o::raw_code(value.as_str()), true)
                })
                .collect();
            entries.push(o::literal_map(props));
        }
        o::literal_arr(entries)
    }
}

/// Array literal with one entry per binding, `None` when there are none.
pub fn events_literal(bindings: &[EventBinding]) -> Option<o::Expression> {
    if bindings.is_empty() {
        return None;
    }
    Some(o::literal_arr(
        bindings.iter().map(EventBinding::to_expression).collect(),
    ))
}
