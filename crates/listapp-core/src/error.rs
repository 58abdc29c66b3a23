//! Error types for listapp core operations.
//!
//! This module defines the error hierarchy for all core operations.
//! Errors are descriptive at the core level; the calling layer maps them to
//! a response class via [`ListError::class`].

use rusqlite::ErrorCode;
use thiserror::Error;
use uuid::Uuid;

/// Result type alias for listapp operations.
pub type Result<T> = std::result::Result<T, ListError>;

/// Response class an error maps to at the calling layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorClass {
    /// A referenced record does not exist.
    NotFound,
    /// The request itself is malformed (missing or empty field).
    BadRequest,
    /// Anything else: storage faults, integrity faults, corrupt data.
    Failure,
}

/// Core error type for listapp operations.
#[derive(Debug, Error)]
pub enum ListError {
    /// Missing or empty required field
    #[error("Validation error: {0}")]
    Validation(String),

    /// Collection not found by ID
    #[error("Collection not found: {0}")]
    CollectionNotFound(Uuid),

    /// Entry not found by ID
    #[error("Entry not found: {0}")]
    EntryNotFound(Uuid),

    /// Entry exists but is owned by a different collection
    #[error("Entry {entry} does not belong to collection {collection}")]
    EntryNotInCollection { entry: Uuid, collection: Uuid },

    /// Collection exists but holds no entries
    #[error("No entries found in collection {0}")]
    NoEntries(Uuid),

    /// A multi-record operation found the stores out of sync
    #[error("Integrity fault during {operation}: {detail}")]
    IntegrityFault {
        operation: &'static str,
        detail: String,
    },

    /// Underlying store unreachable or locked; safe for the caller to retry
    #[error("Storage unavailable: {0}")]
    StorageUnavailable(String),

    /// Stored data could not be decoded
    #[error("Storage error: {0}")]
    Storage(String),

    /// SQLite-specific storage error
    #[error("SQLite error: {source}")]
    Sqlite { source: rusqlite::Error },
}

impl ListError {
    /// Build an integrity fault and record it as a defect-class event.
    pub fn integrity_fault(operation: &'static str, detail: impl Into<String>) -> Self {
        let detail = detail.into();
        log::error!(
            target: "listapp::integrity",
            "integrity fault in {}: {}",
            operation,
            detail
        );
        ListError::IntegrityFault { operation, detail }
    }

    /// Map this error to its response class.
    pub fn class(&self) -> ErrorClass {
        match self {
            ListError::Validation(_) => ErrorClass::BadRequest,
            ListError::CollectionNotFound(_)
            | ListError::EntryNotFound(_)
            | ListError::EntryNotInCollection { .. }
            | ListError::NoEntries(_) => ErrorClass::NotFound,
            _ => ErrorClass::Failure,
        }
    }

    /// Whether the caller may retry the same request unchanged.
    ///
    /// Only transient storage failures qualify. Nothing in this crate retries
    /// on its own.
    pub fn is_retryable(&self) -> bool {
        matches!(self, ListError::StorageUnavailable(_))
    }

    pub fn is_integrity_fault(&self) -> bool {
        matches!(self, ListError::IntegrityFault { .. })
    }
}

impl From<rusqlite::Error> for ListError {
    fn from(err: rusqlite::Error) -> Self {
        match err.sqlite_error_code() {
            Some(
                ErrorCode::DatabaseBusy
                | ErrorCode::DatabaseLocked
                | ErrorCode::CannotOpen
                | ErrorCode::SystemIoFailure
                | ErrorCode::DiskFull,
            ) => ListError::StorageUnavailable(err.to_string()),
            _ => ListError::Sqlite { source: err },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_classes() {
        let id = Uuid::new_v4();
        assert_eq!(
            ListError::Validation("name".to_string()).class(),
            ErrorClass::BadRequest
        );
        assert_eq!(ListError::CollectionNotFound(id).class(), ErrorClass::NotFound);
        assert_eq!(ListError::NoEntries(id).class(), ErrorClass::NotFound);
        assert_eq!(
            ListError::EntryNotInCollection {
                entry: id,
                collection: Uuid::new_v4()
            }
            .class(),
            ErrorClass::NotFound
        );
        assert_eq!(
            ListError::StorageUnavailable("locked".to_string()).class(),
            ErrorClass::Failure
        );
    }

    #[test]
    fn test_storage_errors_are_failures() {
        let sqlite: ListError = rusqlite::Error::QueryReturnedNoRows.into();
        for err in [
            ListError::Storage("bad uuid".to_string()),
            sqlite,
            ListError::integrity_fault("pin", "two pinned"),
        ] {
            assert_eq!(err.class(), ErrorClass::Failure);
        }
    }

    #[test]
    fn test_only_storage_unavailable_is_retryable() {
        assert!(ListError::StorageUnavailable("busy".to_string()).is_retryable());
        assert!(!ListError::integrity_fault("pin", "two pinned").is_retryable());
        assert!(!ListError::EntryNotFound(Uuid::new_v4()).is_retryable());
    }

    #[test]
    fn test_busy_maps_to_storage_unavailable() {
        let err = rusqlite::Error::SqliteFailure(
            rusqlite::ffi::Error::new(rusqlite::ffi::SQLITE_BUSY),
            None,
        );
        let mapped: ListError = err.into();
        assert!(matches!(mapped, ListError::StorageUnavailable(_)));
    }

    #[test]
    fn test_constraint_violation_stays_sqlite() {
        let err = rusqlite::Error::SqliteFailure(
            rusqlite::ffi::Error::new(rusqlite::ffi::SQLITE_CONSTRAINT),
            None,
        );
        let mapped: ListError = err.into();
        assert!(matches!(mapped, ListError::Sqlite { .. }));
    }
}
