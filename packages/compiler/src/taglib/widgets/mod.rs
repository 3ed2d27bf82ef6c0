//! Widgets Taglib
//!
//! Rewrites the widget vocabulary (`widget`, `id`, `config`, `el-id` and
//! `event-*` in the widgets namespace) into wrapper nodes and the runtime
//! calls that bind a rendered element to its widget.

pub mod args;
pub mod events;
pub mod transformer;

pub use args::WidgetArgs;
pub use events::EventBinding;
pub use transformer::{WidgetStages, WidgetTransformPlan, WidgetsTransformer};

/// Attribute holding the widget class module
pub const WIDGET_ATTR: &str = "widget";
pub const ID_ATTR: &str = "id";
pub const CONFIG_ATTR: &str = "config";
pub const EL_ID_ATTR: &str = "el-id";
pub const EVENT_PREFIX: &str = "event-";
/// Runtime variable holding the current widget
pub const WIDGET_SCOPE: &str = "widget";
