pub mod create;
pub mod delete;
pub mod list;
pub mod pin;
pub mod show;
pub mod update;

pub use create::handle_create;
pub use delete::handle_delete;
pub use list::handle_list;
pub use pin::{handle_pin, handle_unpin};
pub use show::handle_show;
pub use update::handle_update;

use listapp_core::Collection;

use crate::ui::{kv, receipt, OutputMode, UiContext};

/// Key/value lines describing one collection record.
pub(crate) fn collection_fields(ui: &UiContext, collection: &Collection) -> Vec<String> {
    let pretty = ui.mode == OutputMode::Pretty;
    vec![
        kv(ui, "id", &collection.id.to_string()),
        kv(ui, "name", &crate::ui::single_line(&collection.name)),
        kv(
            ui,
            "description",
            &crate::ui::single_line(collection.description.as_deref().unwrap_or("")),
        ),
        kv(ui, "pinned", &collection.is_pinned.to_string()),
        kv(ui, "entries", &collection.entry_ids.len().to_string()),
        kv(
            ui,
            "last_updated",
            &crate::ui::format_datetime(&collection.last_updated, pretty),
        ),
        kv(
            ui,
            "created_at",
            &crate::ui::format_datetime(&collection.created_at, pretty),
        ),
    ]
}

/// Receipt after a single-collection mutation.
pub(crate) fn collection_receipt(ui: &UiContext, title: &str, collection: &Collection) -> String {
    let id = collection.id.to_string();
    let pinned = collection.is_pinned.to_string();
    receipt(
        ui,
        title,
        &[("id", &id), ("name", &collection.name), ("pinned", &pinned)],
    )
}
