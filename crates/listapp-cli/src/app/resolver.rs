//! Path resolution for config and database files.

use std::path::{Path, PathBuf};

use crate::cli::Cli;
use crate::config::{default_config_path, default_db_path, ListappConfig};

/// Resolve the config file path, checking LISTAPP_CONFIG env var first.
pub fn resolve_config_path() -> anyhow::Result<PathBuf> {
    if let Ok(value) = std::env::var("LISTAPP_CONFIG") {
        if !value.trim().is_empty() {
            return Ok(PathBuf::from(value));
        }
    }
    default_config_path()
}

/// Resolve the database path: `--db` / `LISTAPP_DB`, then config, then the
/// XDG data directory.
pub fn resolve_db_path(cli: &Cli, config: Option<&ListappConfig>) -> anyhow::Result<PathBuf> {
    if let Some(path) = cli.db.as_deref().filter(|p| !p.trim().is_empty()) {
        return Ok(PathBuf::from(path));
    }
    if let Some(config) = config {
        return Ok(PathBuf::from(&config.store.path));
    }
    default_db_path()
}

/// Error message when the database file is missing.
pub fn missing_db_message(path: &Path) -> String {
    format!("No list database found at {}", path.display())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[test]
    fn test_flag_beats_config() {
        let cli = Cli::try_parse_from(["listapp", "--db", "/flag.db", "check"]).unwrap();
        let config = ListappConfig::new(Path::new("/config.db"));
        assert_eq!(
            resolve_db_path(&cli, Some(&config)).unwrap(),
            PathBuf::from("/flag.db")
        );
    }

    #[test]
    fn test_config_used_without_flag() {
        let mut cli = Cli::try_parse_from(["listapp", "check"]).unwrap();
        cli.db = None;
        let config = ListappConfig::new(Path::new("/config.db"));
        assert_eq!(
            resolve_db_path(&cli, Some(&config)).unwrap(),
            PathBuf::from("/config.db")
        );
    }

    #[test]
    fn test_missing_db_message_names_path() {
        let message = missing_db_message(Path::new("/tmp/none.db"));
        assert!(message.contains("/tmp/none.db"));
    }
}
