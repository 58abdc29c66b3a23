//! UI primitives for the Listapp CLI.
//!
//! This module provides:
//! - **Context**: Environment detection (TTY, width, color)
//! - **Mode**: Output mode resolution (json, plain, pretty)
//! - **Theme**: Badges and text styles
//! - **Render**: Tables, headers, receipts, hints
//! - **Format**: String utilities (short IDs, dates, truncation)
//!
//! # Usage
//!
//! ```ignore
//! let ui = ctx.ui_context();
//!
//! if ui.mode.is_json() {
//!     // Handle JSON output separately
//!     return Ok(());
//! }
//!
//! print(&ui, &header(&ui, "collections", None));
//! print(&ui, &simple_table(&ui, &columns, &rows));
//! ```

mod context;
pub mod format;
mod mode;
pub mod render;
pub mod theme;

// Re-export core types at module level
pub use context::UiContext;
pub use mode::OutputMode;
pub use theme::Badge;

// Re-export commonly used render functions
pub use render::{
    badge, blank_line, error_message, header, hint, kv, print, receipt, simple_table, Column,
};

// Re-export commonly used format functions
pub use format::{format_datetime, short_id, single_line};
