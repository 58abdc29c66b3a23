//! Parsing helper functions for the CLI.

mod parsing;

// Re-export public API
pub use parsing::{parse_entry_order, parse_id};
