use clap::builder::BoolishValueParser;
use clap::{ArgAction, Args, Parser, Subcommand};
use clap_complete::Shell;

use listapp_core::{EntryOrder, VERSION};

use crate::helpers::parse_entry_order;

/// Listapp - personal lists, grouped into collections, one of them pinned
#[derive(Parser)]
#[command(name = "listapp")]
#[command(author, version = VERSION, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path to the list database
    #[arg(long, global = true, env = "LISTAPP_DB", value_name = "PATH")]
    pub db: Option<String>,

    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Output as JSON
    #[arg(long, global = true)]
    pub json: bool,

    /// Output format: plain, pretty or json
    #[arg(long, global = true, value_name = "FORMAT")]
    pub format: Option<String>,

    /// Disable colors
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Quiet mode (minimal output)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// More log output (-v debug, -vv trace)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,
}

/// Arguments for the `init` command
#[derive(Args)]
pub struct InitArgs {
    /// Where the database will be created
    #[arg(value_name = "PATH")]
    pub path: Option<String>,

    /// Overwrite an existing config file
    #[arg(long)]
    pub force: bool,
}

/// Arguments for `collections list`
#[derive(Args)]
pub struct CollectionsListArgs {
    /// Only show entries whose completion flag matches
    #[arg(long, value_name = "BOOL", action = ArgAction::Set, value_parser = BoolishValueParser::new())]
    pub completed: Option<bool>,
}

/// Arguments for `collection create`
#[derive(Args)]
pub struct CollectionCreateArgs {
    /// Collection name
    #[arg(value_name = "NAME")]
    pub name: String,

    /// Optional description
    #[arg(short, long)]
    pub description: Option<String>,
}

/// Arguments for `collection show`
#[derive(Args)]
pub struct CollectionShowArgs {
    /// Collection ID
    #[arg(value_name = "ID")]
    pub id: String,

    /// Only show entries whose completion flag matches
    #[arg(long, value_name = "BOOL", action = ArgAction::Set, value_parser = BoolishValueParser::new())]
    pub completed: Option<bool>,

    /// Entry order (insertion, newest, oldest)
    #[arg(long, value_name = "ORDER", default_value = "insertion", value_parser = parse_entry_order)]
    pub sort: EntryOrder,
}

/// Arguments for `collection update`
#[derive(Args)]
pub struct CollectionUpdateArgs {
    /// Collection ID
    #[arg(value_name = "ID")]
    pub id: String,

    /// New name
    #[arg(long)]
    pub name: Option<String>,

    /// New description
    #[arg(short, long)]
    pub description: Option<String>,
}

/// Arguments for `collection delete`
#[derive(Args)]
pub struct CollectionDeleteArgs {
    /// Collection ID
    #[arg(value_name = "ID")]
    pub id: String,

    /// Skip confirmation prompt
    #[arg(short, long)]
    pub force: bool,
}

/// Arguments for commands that take a single collection ID
#[derive(Args)]
pub struct CollectionIdArgs {
    /// Collection ID
    #[arg(value_name = "ID")]
    pub id: String,
}

/// Arguments for `collection unpin`
#[derive(Args)]
pub struct CollectionUnpinArgs {
    /// Collection ID
    #[arg(value_name = "ID")]
    pub id: String,

    /// Pin the most recently created other collection afterwards
    #[arg(long)]
    pub rotate: bool,
}

/// Arguments for `entry add`
#[derive(Args)]
pub struct EntryAddArgs {
    /// Collection ID
    #[arg(value_name = "COLLECTION")]
    pub collection: String,

    /// Entry name
    #[arg(value_name = "NAME")]
    pub name: String,

    /// Optional description
    #[arg(short, long)]
    pub description: Option<String>,
}

/// Arguments for `entry update`
#[derive(Args)]
pub struct EntryUpdateArgs {
    /// Entry ID
    #[arg(value_name = "ID")]
    pub id: String,

    /// New name
    #[arg(long)]
    pub name: Option<String>,

    /// New description
    #[arg(short, long)]
    pub description: Option<String>,

    /// Set the completion flag
    #[arg(long, value_name = "BOOL", action = ArgAction::Set, value_parser = BoolishValueParser::new())]
    pub completed: Option<bool>,
}

/// Arguments for `entry remove`
#[derive(Args)]
pub struct EntryRemoveArgs {
    /// Collection ID
    #[arg(value_name = "COLLECTION")]
    pub collection: String,

    /// Entry ID
    #[arg(value_name = "ENTRY")]
    pub entry: String,
}

/// Arguments for commands that take a single entry ID
#[derive(Args)]
pub struct EntryIdArgs {
    /// Entry ID
    #[arg(value_name = "ID")]
    pub id: String,
}

/// Arguments for `entry random`
#[derive(Args)]
pub struct EntryRandomArgs {
    /// Collection ID
    #[arg(value_name = "COLLECTION")]
    pub collection: String,
}

/// Arguments for the `completions` command
#[derive(Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    #[arg(value_name = "SHELL")]
    pub shell: Shell,
}

#[derive(Subcommand)]
pub enum CollectionsCommand {
    /// List every collection with its entries (pins a fallback if none is pinned)
    List(CollectionsListArgs),
}

#[derive(Subcommand)]
pub enum CollectionCommand {
    /// Create an empty collection
    Create(CollectionCreateArgs),

    /// Show one collection and its entries
    Show(CollectionShowArgs),

    /// Rename or re-describe a collection
    Update(CollectionUpdateArgs),

    /// Delete a collection and every entry in it
    Delete(CollectionDeleteArgs),

    /// Pin a collection (unpins the current one)
    Pin(CollectionIdArgs),

    /// Unpin a collection
    Unpin(CollectionUnpinArgs),
}

#[derive(Subcommand)]
pub enum EntryCommand {
    /// Add an entry to a collection
    Add(EntryAddArgs),

    /// Update an entry's name, description or completion
    Update(EntryUpdateArgs),

    /// Remove an entry from a collection and delete it
    Remove(EntryRemoveArgs),

    /// Delete an entry by ID
    Delete(EntryIdArgs),

    /// Flip an entry's completion flag
    Toggle(EntryIdArgs),

    /// Pick a random entry from a collection
    Random(EntryRandomArgs),
}

#[derive(Subcommand)]
pub enum Commands {
    /// Write a default config and create the database
    Init(InitArgs),

    /// Work with all collections
    #[command(subcommand)]
    Collections(CollectionsCommand),

    /// Work with a single collection
    #[command(subcommand)]
    Collection(CollectionCommand),

    /// Work with entries
    #[command(subcommand)]
    Entry(EntryCommand),

    /// Check collection/entry integrity
    Check,

    /// Generate shell completions
    Completions(CompletionsArgs),
}
