use std::path::PathBuf;

use listapp_core::SqliteStorage;

use crate::app::{resolve_config_path, AppContext};
use crate::cli::InitArgs;
use crate::commands::print_json;
use crate::config::{write_config, ListappConfig};
use crate::ui::{hint, print, receipt};

pub fn handle_init(ctx: &AppContext, args: &InitArgs) -> anyhow::Result<()> {
    let config_path = resolve_config_path()?;
    let db_path = match args.path.as_deref() {
        Some(path) => PathBuf::from(path),
        None => ctx.db_path()?,
    };

    if let Some(parent) = db_path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(|e| {
            anyhow::anyhow!(
                "Failed to create database directory {}: {}",
                parent.display(),
                e
            )
        })?;
    }

    let existed = db_path.exists();
    let storage = SqliteStorage::open(&db_path, &ctx.storage_options()?)?;
    let format_version = storage.format_version()?;

    let write_new_config = args.force || !config_path.exists();
    if write_new_config {
        write_config(&config_path, &ListappConfig::new(&db_path))?;
    }
    log::debug!(
        "init database={} existed={} config_written={}",
        db_path.display(),
        existed,
        write_new_config
    );

    let ui = ctx.ui_context();
    if ui.mode.is_json() {
        return print_json(&serde_json::json!({
            "status": "ok",
            "database": db_path.display().to_string(),
            "database_existed": existed,
            "config": config_path.display().to_string(),
            "config_written": write_new_config,
            "format_version": format_version,
        }));
    }

    if !ctx.quiet() {
        let db = db_path.display().to_string();
        let config = config_path.display().to_string();
        let written = write_new_config.to_string();
        print(
            &ui,
            &receipt(
                &ui,
                "Initialized list database",
                &[
                    ("database", &db),
                    ("config", &config),
                    ("config_written", &written),
                    ("format_version", &format_version),
                ],
            ),
        );
        if existed {
            print(&ui, &hint(&ui, "database already existed; nothing was reset"));
        }
    }
    Ok(())
}
