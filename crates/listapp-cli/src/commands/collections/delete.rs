use std::io::IsTerminal;

use dialoguer::Confirm;

use listapp_core::{EntryOrder, IntegrityManager, QueryService};

use crate::app::AppContext;
use crate::cli::CollectionDeleteArgs;
use crate::commands::print_json;
use crate::errors::CliError;
use crate::helpers::parse_id;
use crate::ui::{badge, print, receipt, Badge, OutputMode};

pub fn handle_delete(ctx: &AppContext, args: &CollectionDeleteArgs) -> anyhow::Result<()> {
    let id = parse_id("collection", &args.id)?;
    let storage = ctx.open_storage()?;

    if !args.force {
        let view = QueryService::new(&storage).collection(&id, None, EntryOrder::Insertion)?;
        if !std::io::stdin().is_terminal() {
            return Err(CliError::invalid_input(
                "Refusing to delete without confirmation; pass --force",
            )
            .into());
        }

        let entry_count = view.collection.entry_ids.len();
        let confirm_msg = if entry_count > 0 {
            format!(
                "Delete collection '{}' and its {} entries?",
                view.collection.name, entry_count
            )
        } else {
            format!("Delete collection '{}'?", view.collection.name)
        };

        let confirmed = Confirm::new()
            .with_prompt(confirm_msg)
            .default(false)
            .interact()?;

        if !confirmed {
            if !ctx.quiet() {
                let ui = ctx.ui_context();
                match ui.mode {
                    OutputMode::Pretty => print(&ui, &badge(&ui, Badge::Info, "Cancelled")),
                    OutputMode::Plain | OutputMode::Json => println!("status=cancelled"),
                }
            }
            return Ok(());
        }
    }

    let deleted = IntegrityManager::new(&storage).delete_collection(&id)?;

    let ui = ctx.ui_context();
    if ui.mode.is_json() {
        return print_json(&serde_json::json!({
            "status": "ok",
            "id": id,
            "entries_deleted": deleted,
        }));
    }
    if !ctx.quiet() {
        let id = id.to_string();
        let deleted = deleted.to_string();
        print(
            &ui,
            &receipt(
                &ui,
                "Deleted collection",
                &[("id", &id), ("entries_deleted", &deleted)],
            ),
        );
    }
    Ok(())
}
