use listapp_core::QueryService;

use crate::app::AppContext;
use crate::cli::CollectionShowArgs;
use crate::commands::collections::collection_fields;
use crate::commands::{collection_title, entry_rows, print_json, ENTRY_COLUMNS};
use crate::helpers::parse_id;
use crate::ui::{blank_line, header, hint, print, simple_table, OutputMode};

pub fn handle_show(ctx: &AppContext, args: &CollectionShowArgs) -> anyhow::Result<()> {
    let id = parse_id("collection", &args.id)?;
    let storage = ctx.open_storage()?;
    let view = QueryService::new(&storage).collection(&id, args.completed, args.sort)?;

    let ui = ctx.ui_context();
    if ui.mode.is_json() {
        return print_json(&view);
    }
    if ctx.quiet() {
        return Ok(());
    }

    match ui.mode {
        OutputMode::Pretty => {
            let title = collection_title(&ui, &view.collection.name, view.collection.is_pinned);
            print(&ui, &header(&ui, "collection", Some(&title)));
            blank_line(&ui);
            for line in collection_fields(&ui, &view.collection) {
                print(&ui, &line);
            }
            blank_line(&ui);
            if view.entries.is_empty() {
                print(&ui, &hint(&ui, "No matching entries."));
            } else {
                print(
                    &ui,
                    &simple_table(&ui, &ENTRY_COLUMNS, &entry_rows(&ui, &view.entries)),
                );
            }
        }
        OutputMode::Plain | OutputMode::Json => {
            for line in collection_fields(&ui, &view.collection) {
                println!("{}", line);
            }
            for row in entry_rows(&ui, &view.entries) {
                println!("{}", row.join(" "));
            }
        }
    }

    Ok(())
}
