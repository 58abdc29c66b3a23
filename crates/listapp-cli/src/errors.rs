//! CLI error types for structured error handling.
//!
//! This module provides typed errors that map to specific exit codes,
//! and the mapping from core [`ListError`] classes to those codes.

use std::fmt;

use listapp_core::{ErrorClass, ListError};

use crate::constants::exit_codes;

/// CLI-specific errors with associated exit codes.
#[derive(Debug)]
pub enum CliError {
    /// Resource not found (config, database, etc.)
    NotFound { message: String, hint: String },

    /// Invalid user input
    InvalidInput(String),

    /// Integrity check found violations
    IntegrityFailed(String),
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CliError::NotFound { message, hint } => {
                write!(f, "{}\n{}", message, hint)
            }
            CliError::InvalidInput(message) => write!(f, "{}", message),
            CliError::IntegrityFailed(message) => write!(f, "{}", message),
        }
    }
}

impl std::error::Error for CliError {}

impl CliError {
    /// Create a NotFound error with message and hint.
    pub fn not_found(message: impl Into<String>, hint: impl Into<String>) -> Self {
        CliError::NotFound {
            message: message.into(),
            hint: hint.into(),
        }
    }

    /// Create an InvalidInput error.
    pub fn invalid_input(message: impl Into<String>) -> Self {
        CliError::InvalidInput(message.into())
    }

    /// Create an IntegrityFailed error.
    pub fn integrity_failed(message: impl Into<String>) -> Self {
        CliError::IntegrityFailed(message.into())
    }

    /// Get the exit code for this error.
    pub fn exit_code(&self) -> i32 {
        match self {
            CliError::NotFound { .. } => exit_codes::NOT_FOUND,
            CliError::InvalidInput(_) => exit_codes::INVALID_INPUT,
            CliError::IntegrityFailed(_) => exit_codes::INTEGRITY_FAILED,
        }
    }
}

/// Exit code for a core error.
pub fn list_error_exit_code(err: &ListError) -> i32 {
    if err.is_integrity_fault() {
        return exit_codes::INTEGRITY_FAILED;
    }
    match err.class() {
        ErrorClass::NotFound => exit_codes::NOT_FOUND,
        ErrorClass::BadRequest => exit_codes::INVALID_INPUT,
        ErrorClass::Failure => exit_codes::GENERAL,
    }
}

/// Exit code for any error that reached `main`.
pub fn exit_code(err: &anyhow::Error) -> i32 {
    if let Some(cli) = err.downcast_ref::<CliError>() {
        return cli.exit_code();
    }
    if let Some(list) = err.downcast_ref::<ListError>() {
        return list_error_exit_code(list);
    }
    exit_codes::GENERAL
}
