use listapp_core::QueryService;

use crate::app::AppContext;
use crate::cli::CollectionsListArgs;
use crate::commands::{collection_title, entry_rows, print_json, ENTRY_COLUMNS};
use crate::ui::{blank_line, header, hint, print, short_id, simple_table, OutputMode};

pub fn handle_list(ctx: &AppContext, args: &CollectionsListArgs) -> anyhow::Result<()> {
    let storage = ctx.open_storage()?;
    let views = QueryService::new(&storage).list_collections(args.completed)?;

    let ui = ctx.ui_context();
    if ui.mode.is_json() {
        return print_json(&views);
    }
    if ctx.quiet() {
        return Ok(());
    }

    let filter = args.completed.map(|c| {
        if c {
            "completed".to_string()
        } else {
            "open".to_string()
        }
    });

    match ui.mode {
        OutputMode::Pretty => {
            print(&ui, &header(&ui, "collections", filter.as_deref()));
            if views.is_empty() {
                blank_line(&ui);
                print(
                    &ui,
                    &hint(&ui, "No collections yet. Try: listapp collection create NAME"),
                );
                return Ok(());
            }

            for view in &views {
                blank_line(&ui);
                print(
                    &ui,
                    &format!(
                        "{}  ({} entries, {})",
                        collection_title(&ui, &view.collection.name, view.collection.is_pinned),
                        view.collection.entry_ids.len(),
                        short_id(&view.collection.id)
                    ),
                );
                if !view.entries.is_empty() {
                    print(
                        &ui,
                        &simple_table(&ui, &ENTRY_COLUMNS, &entry_rows(&ui, &view.entries)),
                    );
                }
            }
        }
        OutputMode::Plain | OutputMode::Json => {
            println!("count={}", views.len());
            for view in &views {
                println!(
                    "collection id={} pinned={} entries={} name={}",
                    view.collection.id,
                    view.collection.is_pinned,
                    view.collection.entry_ids.len(),
                    crate::ui::single_line(&view.collection.name)
                );
                for row in entry_rows(&ui, &view.entries) {
                    println!("{}", row.join(" "));
                }
            }
        }
    }

    Ok(())
}
