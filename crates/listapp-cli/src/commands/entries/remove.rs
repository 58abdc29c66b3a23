use listapp_core::IntegrityManager;

use crate::app::AppContext;
use crate::cli::{EntryIdArgs, EntryRemoveArgs};
use crate::commands::print_json;
use crate::helpers::parse_id;
use crate::ui::{print, receipt};

pub fn handle_remove(ctx: &AppContext, args: &EntryRemoveArgs) -> anyhow::Result<()> {
    let collection_id = parse_id("collection", &args.collection)?;
    let entry_id = parse_id("entry", &args.entry)?;

    let storage = ctx.open_storage()?;
    IntegrityManager::new(&storage).remove_entry(&collection_id, &entry_id)?;

    let ui = ctx.ui_context();
    if ui.mode.is_json() {
        return print_json(&serde_json::json!({
            "status": "ok",
            "id": entry_id,
            "collection": collection_id,
        }));
    }
    if !ctx.quiet() {
        let id = entry_id.to_string();
        let collection = collection_id.to_string();
        print(
            &ui,
            &receipt(
                &ui,
                "Removed entry",
                &[("id", &id), ("collection", &collection)],
            ),
        );
    }
    Ok(())
}

pub fn handle_delete(ctx: &AppContext, args: &EntryIdArgs) -> anyhow::Result<()> {
    let entry_id = parse_id("entry", &args.id)?;

    let storage = ctx.open_storage()?;
    IntegrityManager::new(&storage).delete_entry(&entry_id)?;

    let ui = ctx.ui_context();
    if ui.mode.is_json() {
        return print_json(&serde_json::json!({ "status": "ok", "id": entry_id }));
    }
    if !ctx.quiet() {
        let id = entry_id.to_string();
        print(&ui, &receipt(&ui, "Deleted entry", &[("id", &id)]));
    }
    Ok(())
}
