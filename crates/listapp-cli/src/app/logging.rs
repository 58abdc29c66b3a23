//! Logger setup.
//!
//! Precedence: `-v` flags, then `RUST_LOG`, then `[log] level` from the
//! config file, then `warn`.

use std::str::FromStr;

use log::LevelFilter;

use crate::constants::DEFAULT_LOG_LEVEL;

/// Install the global `env_logger` writing to stderr.
pub fn init_logging(verbose: u8, config_level: Option<&str>) {
    let mut builder = env_logger::Builder::new();
    builder.filter_level(base_level(config_level));

    if let Ok(filters) = std::env::var("RUST_LOG") {
        builder.parse_filters(&filters);
    }
    if let Some(level) = verbose_level(verbose) {
        builder.filter_level(level);
    }

    builder.format_timestamp(None).format_target(true);
    // A second init (tests) keeps the first logger.
    let _ = builder.try_init();
}

fn base_level(config_level: Option<&str>) -> LevelFilter {
    config_level
        .and_then(|level| LevelFilter::from_str(level.trim()).ok())
        .or_else(|| LevelFilter::from_str(DEFAULT_LOG_LEVEL).ok())
        .unwrap_or(LevelFilter::Warn)
}

fn verbose_level(verbose: u8) -> Option<LevelFilter> {
    match verbose {
        0 => None,
        1 => Some(LevelFilter::Debug),
        _ => Some(LevelFilter::Trace),
    }
}
