use listapp_core::{EntryPatch, IntegrityManager};

use crate::app::AppContext;
use crate::cli::{EntryIdArgs, EntryUpdateArgs};
use crate::commands::entries::entry_receipt;
use crate::commands::print_json;
use crate::errors::CliError;
use crate::helpers::parse_id;
use crate::ui::print;

pub fn handle_update(ctx: &AppContext, args: &EntryUpdateArgs) -> anyhow::Result<()> {
    let id = parse_id("entry", &args.id)?;

    let mut patch = EntryPatch::new();
    if let Some(name) = &args.name {
        patch = patch.name(name);
    }
    if let Some(description) = &args.description {
        patch = patch.description(description);
    }
    if let Some(completed) = args.completed {
        patch = patch.completed(completed);
    }
    if patch.is_empty() {
        return Err(CliError::invalid_input(
            "Nothing to update; pass --name, --description or --completed",
        )
        .into());
    }

    let storage = ctx.open_storage()?;
    let entry = IntegrityManager::new(&storage).update_entry(&id, &patch)?;

    let ui = ctx.ui_context();
    if ui.mode.is_json() {
        return print_json(&entry);
    }
    if !ctx.quiet() {
        print(&ui, &entry_receipt(&ui, "Updated entry", &entry));
    }
    Ok(())
}

pub fn handle_toggle(ctx: &AppContext, args: &EntryIdArgs) -> anyhow::Result<()> {
    let id = parse_id("entry", &args.id)?;
    let storage = ctx.open_storage()?;
    let entry = IntegrityManager::new(&storage).toggle_completion(&id)?;

    let ui = ctx.ui_context();
    if ui.mode.is_json() {
        return print_json(&entry);
    }
    if !ctx.quiet() {
        let title = if entry.completed {
            "Marked entry complete"
        } else {
            "Marked entry open"
        };
        print(&ui, &entry_receipt(&ui, title, &entry));
    }
    Ok(())
}
