use listapp_core::IntegrityManager;

use crate::app::AppContext;
use crate::commands::print_json;
use crate::errors::CliError;
use crate::ui::{badge, header, kv, print, Badge, OutputMode};

pub fn handle_check(ctx: &AppContext) -> anyhow::Result<()> {
    let storage = ctx.open_storage()?;
    let report = IntegrityManager::new(&storage).check_integrity()?;
    let ui = ctx.ui_context();

    if ui.mode.is_json() {
        print_json(&report)?;
    } else if !ctx.quiet() || !report.is_clean() {
        match ui.mode {
            OutputMode::Pretty => {
                print(&ui, &header(&ui, "check", None));
                if report.is_clean() {
                    print(&ui, &badge(&ui, Badge::Ok, "No integrity problems found"));
                }
                for violation in &report.violations {
                    print(&ui, &badge(&ui, Badge::Err, &violation.to_string()));
                }
                print(&ui, &kv(&ui, "Collections", &report.collections.to_string()));
                print(&ui, &kv(&ui, "Entries", &report.entries.to_string()));
            }
            OutputMode::Plain | OutputMode::Json => {
                let status = if report.is_clean() { "ok" } else { "failed" };
                println!("status={}", status);
                println!("collections={}", report.collections);
                println!("entries={}", report.entries);
                println!("violations={}", report.violations.len());
                for violation in &report.violations {
                    println!("violation={}", violation);
                }
            }
        }
    }

    let found = report.violations.len();
    report.into_result().map_err(|err| {
        CliError::integrity_failed(format!(
            "Integrity check found {} violation(s): {}",
            found, err
        ))
    })?;
    Ok(())
}
