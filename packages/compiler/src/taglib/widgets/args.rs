//! Arguments of the pre-invoke widget-args call.

use smallvec::SmallVec;

use crate::output::output_ast as o;

use super::WIDGET_SCOPE;

/// Collected per node; becomes `_widgetArgs(id, scope[, events])`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WidgetArgs {
    pub id: Option<o::Expression>,
    pub scope: Option<String>,
    pub events: Option<o::Expression>,
}

impl WidgetArgs {
    /// An assigned id always runs in the enclosing widget's scope.
    pub fn set_id(&mut self, id: o::Expression) {
        self.id = Some(id);
        self.scope = Some(WIDGET_SCOPE.to_string());
    }

    pub fn is_empty(&self) -> bool {
        self.id.is_none() && self.scope.is_none() && self.events.is_none()
    }

    /// Positional arguments: id and scope always (null when absent), events
    /// only when present.
    pub fn call_args(&self) -> SmallVec<[o::Expression; 3]> {
        let mut args = SmallVec::new();
        args.push(self.id.clone().unwrap_or_else(o::null_expr));
        args.push(match &self.scope {
            Some(scope) => o::literal(scope.as_str()),
            None => o::null_expr(),
        });
        if let Some(events) = &self.events {
            args.push(events.clone());
        }
        args
    }
}
