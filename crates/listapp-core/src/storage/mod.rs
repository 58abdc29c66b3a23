//! Storage abstraction for listapp.
//!
//! This module defines the Entry Store and Collection Store traits, the
//! transactional [`Storage`] seam that hands both stores to the integrity
//! layer, and the core record types.
//!
//! ## Architecture
//!
//! The stores are independent: neither reads or writes the other's records.
//! A backend implements both over one transaction, so a multi-record
//! operation either lands completely or not at all.
//!
//! - `sqlite`: SQLite backend (file-backed or in-memory)

pub mod sqlite;
pub mod traits;
pub mod types;

// Re-export public types
pub use sqlite::{SqliteStorage, StorageOptions};
pub use traits::{CollectionStore, EntryStore, Storage, StoreSession};
pub use types::{
    Collection, CollectionPatch, CollectionView, Entry, EntryOrder, EntryPatch, NewCollection,
    NewEntry,
};
