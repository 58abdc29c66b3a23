//! Store trait definitions.
//!
//! The Entry Store and Collection Store are independent record stores: each
//! owns one record type and never touches the other. Cross-record work is
//! done by the integrity layer, which gets both stores over a single
//! transaction through [`Storage::write`].

use uuid::Uuid;

use super::types::{Collection, CollectionPatch, Entry, EntryPatch, NewCollection, NewEntry};
use crate::error::Result;

/// Entry record store.
pub trait EntryStore {
    /// Insert a new entry owned by `collection_id`.
    ///
    /// Does not check that the collection exists and does not touch its
    /// membership list.
    fn insert_entry(&self, collection_id: &Uuid, entry: &NewEntry) -> Result<Entry>;

    /// Get an entry by ID.
    ///
    /// Returns `Ok(None)` if not found.
    fn get_entry(&self, id: &Uuid) -> Result<Option<Entry>>;

    /// Apply a partial update.
    ///
    /// # Errors
    ///
    /// Returns `ListError::EntryNotFound` if the entry does not exist.
    fn update_entry(&self, id: &Uuid, patch: &EntryPatch) -> Result<Entry>;

    /// Delete an entry record.
    ///
    /// # Errors
    ///
    /// Returns `ListError::EntryNotFound` if the entry does not exist.
    fn delete_entry(&self, id: &Uuid) -> Result<()>;

    /// List entries owned by a collection, oldest first.
    fn list_entries_by_collection(&self, collection_id: &Uuid) -> Result<Vec<Entry>>;

    /// Delete every entry owned by a collection, returning how many went.
    fn delete_entries_by_collection(&self, collection_id: &Uuid) -> Result<usize>;

    /// List every entry in the store.
    fn list_all_entries(&self) -> Result<Vec<Entry>>;
}

/// Collection record store, including each collection's membership list and
/// pin flag.
///
/// Every write to a collection record refreshes its `last_updated` and
/// `updated_at` timestamps.
pub trait CollectionStore {
    /// Insert a new, unpinned, empty collection.
    fn insert_collection(&self, collection: &NewCollection) -> Result<Collection>;

    /// Get a collection by ID.
    ///
    /// Returns `Ok(None)` if not found.
    fn get_collection(&self, id: &Uuid) -> Result<Option<Collection>>;

    /// List all collections in creation order.
    fn list_collections(&self) -> Result<Vec<Collection>>;

    /// Apply a partial update to name and description.
    ///
    /// # Errors
    ///
    /// Returns `ListError::CollectionNotFound` if the collection does not exist.
    fn update_collection(&self, id: &Uuid, patch: &CollectionPatch) -> Result<Collection>;

    /// Set or clear the pin flag on one collection.
    ///
    /// # Errors
    ///
    /// Returns `ListError::CollectionNotFound` if the collection does not exist.
    fn set_pinned(&self, id: &Uuid, pinned: bool) -> Result<Collection>;

    /// Clear the pin flag on every pinned collection other than `keep`.
    ///
    /// Returns the number of collections that were unpinned. Already-unpinned
    /// collections are left alone.
    fn unpin_all_except(&self, keep: &Uuid) -> Result<usize>;

    /// IDs of all currently pinned collections.
    fn pinned_ids(&self) -> Result<Vec<Uuid>>;

    /// Append an entry ID to the end of the membership list.
    ///
    /// # Errors
    ///
    /// Returns `ListError::CollectionNotFound` if the collection does not exist.
    fn append_member(&self, id: &Uuid, entry_id: &Uuid) -> Result<Collection>;

    /// Remove an entry ID from the membership list.
    ///
    /// Returns `false` if the ID was not a member.
    fn remove_member(&self, id: &Uuid, entry_id: &Uuid) -> Result<bool>;

    /// Delete a collection record and its membership list.
    ///
    /// # Errors
    ///
    /// Returns `ListError::CollectionNotFound` if the collection does not exist.
    fn delete_collection(&self, id: &Uuid) -> Result<()>;
}

/// Both stores viewed through one transaction.
pub trait StoreSession: EntryStore + CollectionStore {}

impl<T: EntryStore + CollectionStore> StoreSession for T {}

/// Transactional access to the stores.
///
/// All implementations must ensure:
/// - A `write` closure's effects are applied all together or not at all
/// - Concurrent `write` calls are serialized
/// - A `read` closure sees one consistent snapshot
pub trait Storage: Send + Sync {
    /// Run `f` against a read-only session.
    fn read<T, F>(&self, f: F) -> Result<T>
    where
        F: FnOnce(&dyn StoreSession) -> Result<T>;

    /// Run `f` inside a write transaction, committing only if it returns `Ok`.
    fn write<T, F>(&self, f: F) -> Result<T>
    where
        F: FnOnce(&dyn StoreSession) -> Result<T>;
}
