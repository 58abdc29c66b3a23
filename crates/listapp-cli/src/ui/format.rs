//! String formatting utilities.

use chrono::{DateTime, Utc};
use uuid::Uuid;

/// Format a short ID from a UUID (first 8 characters).
pub fn short_id(id: &Uuid) -> String {
    id.to_string()[..8].to_string()
}

/// Format a datetime for display.
pub fn format_datetime(dt: &DateTime<Utc>, pretty: bool) -> String {
    if pretty {
        dt.format("%Y-%m-%d %H:%M UTC").to_string()
    } else {
        dt.to_rfc3339()
    }
}

/// Sanitize a string for single-line output (replace newlines with spaces).
pub fn single_line(s: &str) -> String {
    s.replace('\n', " ").replace('\r', "")
}
