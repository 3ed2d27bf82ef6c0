//! Taglib Module
//!
//! Compile-time transforms contributed by taglibs

pub mod widgets;
