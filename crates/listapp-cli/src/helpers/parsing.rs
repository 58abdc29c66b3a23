//! Parsing helpers for IDs and entry ordering.

use uuid::Uuid;

use listapp_core::EntryOrder;

use crate::errors::CliError;

/// Parse a full UUID given on the command line.
pub fn parse_id(kind: &str, value: &str) -> Result<Uuid, CliError> {
    Uuid::parse_str(value.trim())
        .map_err(|_| CliError::invalid_input(format!("Invalid {} ID: {}", kind, value)))
}

/// clap value parser for `--sort`.
pub fn parse_entry_order(value: &str) -> Result<EntryOrder, String> {
    value.parse::<EntryOrder>().map_err(|e| e.to_string())
}
