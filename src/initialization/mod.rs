//! Application initialization and resource setup.
//!
//! This module provides functions to initialize the shared resources that are
//! constructed once at process start and passed into the pipeline:
//! - HTTP clients (redirect resolution and render service)
//! - Logger

mod client;
mod logger;

// Re-export public API
pub use client::{init_redirect_client, init_render_client};
pub use logger::init_logger_with;
