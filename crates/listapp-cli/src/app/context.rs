//! Application context for the Listapp CLI.
//!
//! Provides a unified context that combines CLI arguments with the
//! lazily-loaded config file.

use std::path::PathBuf;
use std::time::Duration;

use once_cell::unsync::OnceCell;

use listapp_core::{SqliteStorage, StorageOptions};

use crate::cli::Cli;
use crate::config::{read_config, ListappConfig};
use crate::errors::CliError;
use crate::ui::UiContext;

use super::resolver::{missing_db_message, resolve_config_path, resolve_db_path};

/// Application context that bundles CLI args with configuration.
///
/// This avoids repeatedly loading config and threading multiple parameters
/// through handler functions.
pub struct AppContext<'a> {
    cli: &'a Cli,
    config: OnceCell<Option<ListappConfig>>,
}

impl<'a> AppContext<'a> {
    /// Create a new application context from CLI arguments.
    pub fn new(cli: &'a Cli) -> Self {
        Self {
            cli,
            config: OnceCell::new(),
        }
    }

    /// Get the CLI arguments.
    pub fn cli(&self) -> &Cli {
        self.cli
    }

    /// Check if quiet mode is enabled.
    pub fn quiet(&self) -> bool {
        self.cli.quiet
    }

    /// The config file, if one exists. Loaded once.
    pub fn config(&self) -> anyhow::Result<Option<&ListappConfig>> {
        let config = self.config.get_or_try_init(|| {
            let path = resolve_config_path()?;
            if !path.exists() {
                return Ok::<_, anyhow::Error>(None);
            }
            read_config(&path).map(Some)
        })?;
        Ok(config.as_ref())
    }

    /// Database path after applying flag, env, and config precedence.
    pub fn db_path(&self) -> anyhow::Result<PathBuf> {
        resolve_db_path(self.cli, self.config()?)
    }

    /// Store options from the config file, or defaults.
    pub fn storage_options(&self) -> anyhow::Result<StorageOptions> {
        let options = StorageOptions::default();
        Ok(match self.config()? {
            Some(config) => {
                options.busy_timeout(Duration::from_millis(config.store.busy_timeout_ms))
            }
            None => options,
        })
    }

    /// Open the existing database.
    ///
    /// A missing file is reported as not found with a hint to run `init`,
    /// rather than silently creating an empty store.
    pub fn open_storage(&self) -> anyhow::Result<SqliteStorage> {
        let path = self.db_path()?;
        if !path.exists() {
            return Err(CliError::not_found(
                missing_db_message(&path),
                "Run:\n  listapp init\n\nOr specify a database:\n  LISTAPP_DB=/path/to/lists.db listapp init",
            )
            .into());
        }

        log::debug!("opening database {}", path.display());
        Ok(SqliteStorage::open(&path, &self.storage_options()?)?)
    }

    /// Create a UI context from the global output flags.
    pub fn ui_context(&self) -> UiContext {
        UiContext::from_env(self.cli.json, self.cli.format.as_deref(), self.cli.no_color)
    }
}
