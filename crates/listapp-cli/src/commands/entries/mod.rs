pub mod add;
pub mod random;
pub mod remove;
pub mod update;

pub use add::handle_add;
pub use random::handle_random;
pub use remove::{handle_delete, handle_remove};
pub use update::{handle_toggle, handle_update};

use listapp_core::Entry;

use crate::ui::{receipt, UiContext};

/// Receipt after a single-entry mutation.
pub(crate) fn entry_receipt(ui: &UiContext, title: &str, entry: &Entry) -> String {
    let id = entry.id.to_string();
    let collection = entry.collection_id.to_string();
    let completed = entry.completed.to_string();
    receipt(
        ui,
        title,
        &[
            ("id", &id),
            ("collection", &collection),
            ("completed", &completed),
            ("name", &entry.name),
        ],
    )
}
