use listapp_core::{IntegrityManager, QueryService};

use crate::app::AppContext;
use crate::cli::{CollectionIdArgs, CollectionUnpinArgs};
use crate::commands::collections::collection_receipt;
use crate::commands::print_json;
use crate::helpers::parse_id;
use crate::ui::{print, receipt};

pub fn handle_pin(ctx: &AppContext, args: &CollectionIdArgs) -> anyhow::Result<()> {
    let id = parse_id("collection", &args.id)?;
    let storage = ctx.open_storage()?;
    let collection = IntegrityManager::new(&storage).pin(&id)?;

    let ui = ctx.ui_context();
    if ui.mode.is_json() {
        return print_json(&collection);
    }
    if !ctx.quiet() {
        print(&ui, &collection_receipt(&ui, "Pinned collection", &collection));
    }
    Ok(())
}

pub fn handle_unpin(ctx: &AppContext, args: &CollectionUnpinArgs) -> anyhow::Result<()> {
    let id = parse_id("collection", &args.id)?;
    let storage = ctx.open_storage()?;

    if !args.rotate {
        let collection = IntegrityManager::new(&storage).unpin(&id)?;
        let ui = ctx.ui_context();
        if ui.mode.is_json() {
            return print_json(&collection);
        }
        if !ctx.quiet() {
            print(&ui, &collection_receipt(&ui, "Unpinned collection", &collection));
        }
        return Ok(());
    }

    let next = QueryService::new(&storage).rotate_pin(&id)?;
    let ui = ctx.ui_context();
    if ui.mode.is_json() {
        return print_json(&serde_json::json!({
            "status": "ok",
            "unpinned": id,
            "pinned": next,
        }));
    }
    if !ctx.quiet() {
        let unpinned = id.to_string();
        let pinned = next
            .as_ref()
            .map(|c| c.id.to_string())
            .unwrap_or_else(|| "none".to_string());
        print(
            &ui,
            &receipt(
                &ui,
                "Rotated pin",
                &[("unpinned", &unpinned), ("pinned", &pinned)],
            ),
        );
    }
    Ok(())
}
