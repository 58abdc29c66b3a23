//! # Listapp Core
//!
//! Core library for Listapp - personal lists of entries grouped into
//! collections, with one collection pinned for quick access.
//!
//! This crate owns the data model, the two stores, and the rules that keep
//! them consistent, independent of the CLI interface.
//!
//! ## Architecture
//!
//! - **storage**: Entry Store and Collection Store traits, SQLite backend
//! - **integrity**: every multi-record write (cascade delete, membership
//!   sync, single pin)
//! - **query**: filtered listing, pin fallback, random selection
//! - **error**: error type and its not-found / bad-request / failure classes

pub mod error;
pub mod integrity;
pub mod query;
pub mod storage;

pub use error::{ErrorClass, ListError, Result};
pub use integrity::{IntegrityManager, IntegrityReport, Violation};
pub use query::QueryService;
pub use storage::{
    Collection, CollectionPatch, CollectionView, Entry, EntryOrder, EntryPatch, NewCollection,
    NewEntry, SqliteStorage, Storage, StorageOptions,
};

/// Core version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
