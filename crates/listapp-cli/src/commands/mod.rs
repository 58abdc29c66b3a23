//! Command handlers, one module per command group.

pub mod collections;
pub mod entries;
pub mod init;
pub mod maintenance;
pub mod misc;

use serde::Serialize;

use listapp_core::Entry;

use crate::ui::theme::{checkbox, pin_marker};
use crate::ui::{short_id, single_line, Column, OutputMode, UiContext};

pub use init::handle_init;
pub use maintenance::handle_check;
pub use misc::handle_completions;

/// Print a value as pretty JSON on stdout.
pub(crate) fn print_json<T: Serialize + ?Sized>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

pub(crate) const ENTRY_COLUMNS: [Column; 4] = [
    Column::new(""),
    Column::new("Name"),
    Column::new("Description"),
    Column::new("ID"),
];

/// Rows for an entry table.
///
/// Plain rows are `entry id=... collection=... completed=... name=...` so the
/// free-text name is always last.
pub(crate) fn entry_rows(ui: &UiContext, entries: &[Entry]) -> Vec<Vec<String>> {
    entries
        .iter()
        .map(|e| match ui.mode {
            OutputMode::Pretty => vec![
                checkbox(e.completed, ui.unicode).to_string(),
                single_line(&e.name),
                single_line(e.description.as_deref().unwrap_or("")),
                short_id(&e.id),
            ],
            OutputMode::Plain | OutputMode::Json => vec![
                "entry".to_string(),
                format!("id={}", e.id),
                format!("collection={}", e.collection_id),
                format!("completed={}", e.completed),
                format!("name={}", single_line(&e.name)),
            ],
        })
        .collect()
}

/// Title shown above a collection's entries in pretty mode.
pub(crate) fn collection_title(ui: &UiContext, name: &str, is_pinned: bool) -> String {
    if is_pinned {
        format!("{} {}", pin_marker(ui.unicode), single_line(name))
    } else {
        single_line(name)
    }
}
