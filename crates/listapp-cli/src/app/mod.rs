//! Application-level utilities for the Listapp CLI.
//!
//! This module provides:
//! - Path resolution for config and database files
//! - The per-invocation application context
//! - Logger setup

mod context;
mod logging;
mod resolver;

// Re-export public API
pub use context::AppContext;
pub use logging::init_logging;
pub use resolver::{missing_db_message, resolve_config_path, resolve_db_path};
