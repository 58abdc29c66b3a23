//! Constants used throughout the CLI.

/// Exit codes for the CLI.
///
/// These follow common Unix conventions:
/// - 0: Success
/// - 1: General error (used by anyhow for unhandled errors)
/// - 2: Misuse of shell command (reserved by shells)
/// - 3+: Application-specific errors
pub mod exit_codes {
    /// Unhandled error.
    pub const GENERAL: i32 = 1;

    /// Resource not found (config, database, collection, entry).
    pub const NOT_FOUND: i32 = 3;

    /// Invalid user input or arguments.
    pub const INVALID_INPUT: i32 = 4;

    /// Integrity fault or failed integrity check.
    pub const INTEGRITY_FAILED: i32 = 6;
}

/// Default SQLite busy timeout, in milliseconds.
pub const DEFAULT_BUSY_TIMEOUT_MS: u64 = 5000;

/// Default log level when neither `-v` nor `RUST_LOG` is set.
pub const DEFAULT_LOG_LEVEL: &str = "warn";
