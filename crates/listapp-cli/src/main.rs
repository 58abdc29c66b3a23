//! Listapp CLI - personal lists, grouped into collections
//!
//! This is the command-line interface for Listapp. It provides a thin
//! front end over the core library's integrity and query services.

mod app;
mod cli;
mod commands;
mod config;
mod constants;
mod errors;
mod helpers;
mod ui;

use clap::{CommandFactory, Parser};

use app::{init_logging, AppContext};
use cli::{Cli, CollectionCommand, CollectionsCommand, Commands, EntryCommand};
use commands::{collections, entries};

fn main() {
    let cli = Cli::parse();
    let ctx = AppContext::new(&cli);

    // A broken config file is reported by the command that needs it.
    let config_level = ctx
        .config()
        .ok()
        .flatten()
        .map(|config| config.log.level.clone());
    init_logging(cli.verbose, config_level.as_deref());

    if let Err(err) = run(&ctx) {
        let ui = ctx.ui_context();
        eprintln!("{}", ui::error_message(&ui, &format!("{:#}", err)));
        std::process::exit(errors::exit_code(&err));
    }
}

fn run(ctx: &AppContext) -> anyhow::Result<()> {
    let Some(command) = &ctx.cli().command else {
        Cli::command().print_help()?;
        println!();
        return Ok(());
    };

    match command {
        Commands::Init(args) => commands::handle_init(ctx, args),
        Commands::Collections(CollectionsCommand::List(args)) => {
            collections::handle_list(ctx, args)
        }
        Commands::Collection(command) => match command {
            CollectionCommand::Create(args) => collections::handle_create(ctx, args),
            CollectionCommand::Show(args) => collections::handle_show(ctx, args),
            CollectionCommand::Update(args) => collections::handle_update(ctx, args),
            CollectionCommand::Delete(args) => collections::handle_delete(ctx, args),
            CollectionCommand::Pin(args) => collections::handle_pin(ctx, args),
            CollectionCommand::Unpin(args) => collections::handle_unpin(ctx, args),
        },
        Commands::Entry(command) => match command {
            EntryCommand::Add(args) => entries::handle_add(ctx, args),
            EntryCommand::Update(args) => entries::handle_update(ctx, args),
            EntryCommand::Remove(args) => entries::handle_remove(ctx, args),
            EntryCommand::Delete(args) => entries::handle_delete(ctx, args),
            EntryCommand::Toggle(args) => entries::handle_toggle(ctx, args),
            EntryCommand::Random(args) => entries::handle_random(ctx, args),
        },
        Commands::Check => commands::handle_check(ctx),
        Commands::Completions(args) => commands::handle_completions(args),
    }
}
