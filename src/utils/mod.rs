//! Utility functions shared across the pipeline.
//!
//! This module provides:
//! - Regex compilation for static patterns
//! - Whitespace collapsing and log-safe truncation

mod pattern;
mod text;

pub use pattern::compile_regex_unsafe;
pub use text::{collapse_whitespace, preview};
