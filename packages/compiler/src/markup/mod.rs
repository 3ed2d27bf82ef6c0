//! Markup Module
//!
//! Template node model consumed by the taglib transforms

pub mod ast;
pub mod tags;

pub use ast::*;
pub use tags::*;
