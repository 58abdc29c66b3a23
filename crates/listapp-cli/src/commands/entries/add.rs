use listapp_core::{IntegrityManager, NewEntry};

use crate::app::AppContext;
use crate::cli::EntryAddArgs;
use crate::commands::entries::entry_receipt;
use crate::commands::print_json;
use crate::helpers::parse_id;
use crate::ui::print;

pub fn handle_add(ctx: &AppContext, args: &EntryAddArgs) -> anyhow::Result<()> {
    let collection_id = parse_id("collection", &args.collection)?;

    let mut new_entry = NewEntry::new(&args.name);
    if let Some(description) = &args.description {
        new_entry = new_entry.with_description(description);
    }

    let storage = ctx.open_storage()?;
    let entry = IntegrityManager::new(&storage).add_entry_to_collection(&collection_id, &new_entry)?;

    let ui = ctx.ui_context();
    if ui.mode.is_json() {
        return print_json(&entry);
    }
    if !ctx.quiet() {
        print(&ui, &entry_receipt(&ui, "Added entry", &entry));
    }
    Ok(())
}
