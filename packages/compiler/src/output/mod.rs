//! Output Module
//!
//! Expression IR for generated code and its source printer

pub mod abstract_emitter;
pub mod output_ast;

pub use abstract_emitter::{emit_expression, emit_statement};
