use listapp_core::QueryService;

use crate::app::AppContext;
use crate::cli::EntryRandomArgs;
use crate::commands::print_json;
use crate::helpers::parse_id;
use crate::ui::{badge, kv, print, single_line, Badge, OutputMode};

pub fn handle_random(ctx: &AppContext, args: &EntryRandomArgs) -> anyhow::Result<()> {
    let collection_id = parse_id("collection", &args.collection)?;
    let storage = ctx.open_storage()?;
    let entry = QueryService::new(&storage).random_entry(&collection_id)?;
    log::debug!("picked entry {} from {}", entry.id, collection_id);

    let ui = ctx.ui_context();
    if ui.mode.is_json() {
        return print_json(&entry);
    }

    match ui.mode {
        OutputMode::Pretty => {
            print(&ui, &badge(&ui, Badge::Info, &single_line(&entry.name)));
            if let Some(description) = &entry.description {
                print(&ui, &kv(&ui, "Description", &single_line(description)));
            }
            print(&ui, &kv(&ui, "ID", &entry.id.to_string()));
        }
        OutputMode::Plain | OutputMode::Json => {
            println!("id={}", entry.id);
            println!("completed={}", entry.completed);
            println!("name={}", single_line(&entry.name));
        }
    }
    Ok(())
}
