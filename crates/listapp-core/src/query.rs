//! Query Service: read-side operations over both stores.
//!
//! Reads never repair anything. Membership IDs that do not resolve to an
//! entry owned by the collection are skipped and logged at `warn`; use
//! [`IntegrityManager::check_integrity`] to report them.
//!
//! The one read-triggered write is [`QueryService::ensure_pinned`], which
//! [`QueryService::list_collections`] calls before reading.

use std::collections::HashMap;

use rand::Rng;
use uuid::Uuid;

use crate::error::{ListError, Result};
use crate::integrity::IntegrityManager;
use crate::storage::traits::Storage;
use crate::storage::types::{Collection, CollectionView, Entry, EntryOrder};

pub struct QueryService<'s, S: Storage> {
    storage: &'s S,
    integrity: IntegrityManager<'s, S>,
}

impl<'s, S: Storage> QueryService<'s, S> {
    pub fn new(storage: &'s S) -> Self {
        Self {
            storage,
            integrity: IntegrityManager::new(storage),
        }
    }

    /// All collections in creation order, each with its entries in
    /// membership order.
    ///
    /// `completed` filters the returned entries only; `entry_ids` on each
    /// collection still reflects storage.
    pub fn list_collections(&self, completed: Option<bool>) -> Result<Vec<CollectionView>> {
        self.ensure_pinned()?;

        self.storage.read(|s| {
            let collections = s.list_collections()?;
            let entries: HashMap<Uuid, Entry> = s
                .list_all_entries()?
                .into_iter()
                .map(|entry| (entry.id, entry))
                .collect();

            Ok(collections
                .into_iter()
                .map(|collection| {
                    let entries = resolve_members(&collection, &entries, completed);
                    CollectionView {
                        collection,
                        entries,
                    }
                })
                .collect())
        })
    }

    /// One collection with its entries, filtered and sorted.
    pub fn collection(
        &self,
        id: &Uuid,
        completed: Option<bool>,
        order: EntryOrder,
    ) -> Result<CollectionView> {
        self.storage.read(|s| {
            let collection = s
                .get_collection(id)?
                .ok_or(ListError::CollectionNotFound(*id))?;
            let owned: HashMap<Uuid, Entry> = s
                .list_entries_by_collection(id)?
                .into_iter()
                .map(|entry| (entry.id, entry))
                .collect();

            let mut entries = resolve_members(&collection, &owned, completed);
            order.sort(&mut entries);
            Ok(CollectionView {
                collection,
                entries,
            })
        })
    }

    /// Make sure some collection is pinned when any collection exists.
    ///
    /// The fallback is the collection with the latest `last_updated`, then
    /// the latest `created_at`, then the highest ID, chosen inside the same
    /// write that pins it. Returns the pinned collection, or `None` when
    /// there are no collections.
    pub fn ensure_pinned(&self) -> Result<Option<Collection>> {
        let collections = self.storage.read(|s| s.list_collections())?;
        if collections.is_empty() {
            return Ok(None);
        }
        if let Some(pinned) = collections.into_iter().find(|c| c.is_pinned) {
            return Ok(Some(pinned));
        }

        self.integrity.pin_chosen_if_unpinned(|collections| {
            collections
                .iter()
                .max_by_key(|c| (c.last_updated, c.created_at, c.id))
                .map(|c| c.id)
        })
    }

    /// A uniformly random entry from the collection.
    pub fn random_entry(&self, collection_id: &Uuid) -> Result<Entry> {
        self.random_entry_with(collection_id, &mut rand::thread_rng())
    }

    /// Like [`random_entry`](Self::random_entry), drawing from `rng`.
    ///
    /// # Errors
    ///
    /// `CollectionNotFound` if the collection is absent, `NoEntries` if it
    /// has no entries.
    pub fn random_entry_with<R: Rng + ?Sized>(
        &self,
        collection_id: &Uuid,
        rng: &mut R,
    ) -> Result<Entry> {
        let mut view = self.collection(collection_id, None, EntryOrder::Insertion)?;
        if view.entries.is_empty() {
            return Err(ListError::NoEntries(*collection_id));
        }

        let index = rng.gen_range(0..view.entries.len());
        Ok(view.entries.swap_remove(index))
    }

    /// Unpin a collection and hand the pin to the most recently created
    /// other collection, if there is one.
    ///
    /// Both steps land together or not at all.
    pub fn rotate_pin(&self, collection_id: &Uuid) -> Result<Option<Collection>> {
        self.integrity.hand_off_pin(collection_id, |others| {
            others
                .iter()
                .max_by_key(|c| (c.created_at, c.id))
                .map(|c| c.id)
        })
    }
}

/// Resolve `collection.entry_ids` against `entries`, keeping membership order.
fn resolve_members(
    collection: &Collection,
    entries: &HashMap<Uuid, Entry>,
    completed: Option<bool>,
) -> Vec<Entry> {
    let mut resolved = Vec::with_capacity(collection.entry_ids.len());
    for entry_id in &collection.entry_ids {
        match entries.get(entry_id) {
            Some(entry) if entry.collection_id == collection.id => {
                if completed.map_or(true, |want| entry.completed == want) {
                    resolved.push(entry.clone());
                }
            }
            Some(entry) => log::warn!(
                "collection {} lists entry {} owned by {}; skipping",
                collection.id,
                entry_id,
                entry.collection_id
            ),
            None => log::warn!(
                "collection {} lists missing entry {}; skipping",
                collection.id,
                entry_id
            ),
        }
    }
    resolved
}
