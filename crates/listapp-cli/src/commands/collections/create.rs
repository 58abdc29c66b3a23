use listapp_core::{IntegrityManager, NewCollection};

use crate::app::AppContext;
use crate::cli::CollectionCreateArgs;
use crate::commands::collections::collection_receipt;
use crate::commands::print_json;
use crate::ui::print;

pub fn handle_create(ctx: &AppContext, args: &CollectionCreateArgs) -> anyhow::Result<()> {
    let storage = ctx.open_storage()?;

    let mut new_collection = NewCollection::new(&args.name);
    if let Some(description) = &args.description {
        new_collection = new_collection.with_description(description);
    }
    let collection = IntegrityManager::new(&storage).create_collection(&new_collection)?;

    let ui = ctx.ui_context();
    if ui.mode.is_json() {
        return print_json(&collection);
    }
    if !ctx.quiet() {
        print(&ui, &collection_receipt(&ui, "Created collection", &collection));
    }
    Ok(())
}
