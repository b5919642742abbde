//! Error handling.
//!
//! This module provides:
//! - Error type definitions (initialization, fetch, render, cache)
//! - Categorization of `reqwest` failures into fetch error kinds
//!
//! Propagation policy:
//! - **Search errors** (render failure, cancellation) are fatal for a search and
//!   surface in `DistilledResult::error`
//! - **Fetch errors** are per-hop and absorbed by the redirect resolver
//! - **Cache errors** are logged; the search runs uncached

mod categorization;
mod types;

// Re-export public API
pub use categorization::fetch_error_from_reqwest;
pub use types::{
    CacheError, FetchError, FetchErrorKind, InitializationError, RenderError, SearchError,
};
