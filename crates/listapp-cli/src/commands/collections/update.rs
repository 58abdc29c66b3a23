use listapp_core::{CollectionPatch, IntegrityManager};

use crate::app::AppContext;
use crate::cli::CollectionUpdateArgs;
use crate::commands::collections::collection_receipt;
use crate::commands::print_json;
use crate::errors::CliError;
use crate::helpers::parse_id;
use crate::ui::print;

pub fn handle_update(ctx: &AppContext, args: &CollectionUpdateArgs) -> anyhow::Result<()> {
    let id = parse_id("collection", &args.id)?;

    let mut patch = CollectionPatch::new();
    if let Some(name) = &args.name {
        patch = patch.name(name);
    }
    if let Some(description) = &args.description {
        patch = patch.description(description);
    }
    if patch.is_empty() {
        return Err(CliError::invalid_input("Nothing to update; pass --name or --description").into());
    }

    let storage = ctx.open_storage()?;
    let collection = IntegrityManager::new(&storage).update_collection(&id, &patch)?;

    let ui = ctx.ui_context();
    if ui.mode.is_json() {
        return print_json(&collection);
    }
    if !ctx.quiet() {
        print(&ui, &collection_receipt(&ui, "Updated collection", &collection));
    }
    Ok(())
}
