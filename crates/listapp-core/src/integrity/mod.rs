//! Integrity Manager: the only component allowed to make multi-record
//! transitions.
//!
//! Each operation runs inside a single write transaction obtained from
//! [`Storage::write`]. If any step fails, including a post-condition check,
//! the transaction is dropped and nothing is applied. Post-condition failures
//! are reported as [`ListError::IntegrityFault`] and leave the stores exactly
//! as they were before the call.
//!
//! Invariants maintained here:
//! - every entry's owning collection exists and lists the entry exactly once
//! - at most one collection is pinned
//! - deleting a collection deletes every entry it owns

mod check;

#[cfg(test)]
mod tests;

use uuid::Uuid;

use crate::error::{ListError, Result};
use crate::storage::traits::{Storage, StoreSession};
use crate::storage::types::{
    Collection, CollectionPatch, Entry, EntryPatch, NewCollection, NewEntry,
};

pub use check::{IntegrityReport, Violation};

/// Coordinates the Entry Store and Collection Store.
pub struct IntegrityManager<'s, S: Storage> {
    storage: &'s S,
}

impl<'s, S: Storage> IntegrityManager<'s, S> {
    pub fn new(storage: &'s S) -> Self {
        Self { storage }
    }

    /// Create an empty, unpinned collection.
    pub fn create_collection(&self, collection: &NewCollection) -> Result<Collection> {
        collection.validate()?;

        let created = self.storage.write(|s| s.insert_collection(collection))?;
        log::debug!("created collection {} ({})", created.id, created.name);
        Ok(created)
    }

    /// Rename or re-describe a collection.
    pub fn update_collection(&self, id: &Uuid, patch: &CollectionPatch) -> Result<Collection> {
        patch.validate()?;

        let updated = self.storage.write(|s| s.update_collection(id, patch))?;
        log::debug!("updated collection {}", id);
        Ok(updated)
    }

    /// Create an entry and append it to its collection's membership list.
    ///
    /// Both writes share one transaction: if the append fails the entry is
    /// never committed, so no orphan can be left behind.
    pub fn add_entry_to_collection(&self, collection_id: &Uuid, entry: &NewEntry) -> Result<Entry> {
        entry.validate()?;

        let created = self.storage.write(|s| {
            if s.get_collection(collection_id)?.is_none() {
                return Err(ListError::CollectionNotFound(*collection_id));
            }

            let created = s.insert_entry(collection_id, entry)?;
            let collection = s.append_member(collection_id, &created.id)?;

            if collection.entry_ids.last() != Some(&created.id) {
                return Err(ListError::integrity_fault(
                    "add_entry_to_collection",
                    format!(
                        "entry {} was not appended to collection {}",
                        created.id, collection_id
                    ),
                ));
            }
            Ok(created)
        })?;

        log::debug!("added entry {} to collection {}", created.id, collection_id);
        Ok(created)
    }

    /// Update an entry's name, description or completion flag.
    pub fn update_entry(&self, entry_id: &Uuid, patch: &EntryPatch) -> Result<Entry> {
        patch.validate()?;

        let updated = self.storage.write(|s| s.update_entry(entry_id, patch))?;
        log::debug!("updated entry {}", entry_id);
        Ok(updated)
    }

    /// Remove an entry from the given collection and delete it.
    ///
    /// # Errors
    ///
    /// - `CollectionNotFound` / `EntryNotFound` if either record is absent
    /// - `EntryNotInCollection` if the entry belongs to another collection
    /// - `IntegrityFault` if the entry is owned by the collection but missing
    ///   from its membership list
    pub fn remove_entry(&self, collection_id: &Uuid, entry_id: &Uuid) -> Result<()> {
        self.storage.write(|s| {
            if s.get_collection(collection_id)?.is_none() {
                return Err(ListError::CollectionNotFound(*collection_id));
            }

            let entry = s
                .get_entry(entry_id)?
                .ok_or(ListError::EntryNotFound(*entry_id))?;
            if entry.collection_id != *collection_id {
                return Err(ListError::EntryNotInCollection {
                    entry: *entry_id,
                    collection: *collection_id,
                });
            }

            detach_and_delete(s, "remove_entry", &entry)
        })?;

        log::debug!("removed entry {} from collection {}", entry_id, collection_id);
        Ok(())
    }

    /// Delete an entry given only its ID, detaching it from its owner first.
    ///
    /// An orphan (owner no longer exists) has nothing to detach from and is
    /// deleted outright; this is the only way to clear one.
    pub fn delete_entry(&self, entry_id: &Uuid) -> Result<()> {
        let owner = self.storage.write(|s| {
            let entry = s
                .get_entry(entry_id)?
                .ok_or(ListError::EntryNotFound(*entry_id))?;

            if s.get_collection(&entry.collection_id)?.is_some() {
                detach_and_delete(s, "delete_entry", &entry)?;
            } else {
                log::warn!(
                    "entry {} is owned by missing collection {}; deleting orphan",
                    entry.id,
                    entry.collection_id
                );
                s.delete_entry(&entry.id)?;
            }
            Ok(entry.collection_id)
        })?;

        log::debug!("deleted entry {} from collection {}", entry_id, owner);
        Ok(())
    }

    /// Delete a collection and every entry it owns.
    ///
    /// Returns the number of entries deleted.
    pub fn delete_collection(&self, collection_id: &Uuid) -> Result<usize> {
        let deleted = self.storage.write(|s| {
            if s.get_collection(collection_id)?.is_none() {
                return Err(ListError::CollectionNotFound(*collection_id));
            }

            let deleted = s.delete_entries_by_collection(collection_id)?;
            s.delete_collection(collection_id)?;

            let survivors = s.list_entries_by_collection(collection_id)?.len();
            let record_remains = s.get_collection(collection_id)?.is_some();
            if survivors > 0 || record_remains {
                return Err(ListError::integrity_fault(
                    "delete_collection",
                    format!(
                        "collection {}: {} entries survived cascade, record present: {}",
                        collection_id, survivors, record_remains
                    ),
                ));
            }
            Ok(deleted)
        })?;

        log::debug!(
            "deleted collection {} with {} entries",
            collection_id,
            deleted
        );
        Ok(deleted)
    }

    /// Pin a collection, unpinning whichever collection held the pin.
    pub fn pin(&self, collection_id: &Uuid) -> Result<Collection> {
        let pinned = self.storage.write(|s| pin_in(s, collection_id))?;
        log::debug!("pinned collection {}", collection_id);
        Ok(pinned)
    }

    /// Clear a collection's pin flag. Never pins a replacement.
    pub fn unpin(&self, collection_id: &Uuid) -> Result<Collection> {
        let unpinned = self
            .storage
            .write(|s| s.set_pinned(collection_id, false))?;
        log::debug!("unpinned collection {}", collection_id);
        Ok(unpinned)
    }

    /// Pin `candidate_id` only if no collection is pinned yet.
    ///
    /// The check and the pin share one transaction, so concurrent callers
    /// cannot both decide the pin is free. Returns whichever collection holds
    /// the pin afterwards.
    pub fn pin_if_unpinned(&self, candidate_id: &Uuid) -> Result<Collection> {
        self.storage.write(|s| {
            if let Some(existing) = current_pin(s, "pin_if_unpinned")? {
                return Ok(existing);
            }
            let collection = pin_in(s, candidate_id)?;
            log::debug!("pinned fallback collection {}", candidate_id);
            Ok(collection)
        })
    }

    /// Like [`pin_if_unpinned`](Self::pin_if_unpinned), but the candidate is
    /// chosen by `choose` from the collections as seen inside the write
    /// transaction.
    ///
    /// Returns `None` when nothing is pinned and `choose` picks nothing.
    pub fn pin_chosen_if_unpinned<F>(&self, choose: F) -> Result<Option<Collection>>
    where
        F: FnOnce(&[Collection]) -> Option<Uuid>,
    {
        self.storage.write(|s| {
            if let Some(existing) = current_pin(s, "pin_chosen_if_unpinned")? {
                return Ok(Some(existing));
            }
            let collections = s.list_collections()?;
            let Some(candidate_id) = choose(collections.as_slice()) else {
                return Ok(None);
            };
            let collection = pin_in(s, &candidate_id)?;
            log::debug!("pinned fallback collection {}", candidate_id);
            Ok(Some(collection))
        })
    }

    /// Unpin `collection_id` and pin whichever other collection `choose`
    /// picks, in one transaction.
    ///
    /// If the pin step fails, the unpin is rolled back with it.
    pub fn hand_off_pin<F>(&self, collection_id: &Uuid, choose: F) -> Result<Option<Collection>>
    where
        F: FnOnce(&[Collection]) -> Option<Uuid>,
    {
        let next = self.storage.write(|s| {
            s.set_pinned(collection_id, false)?;

            let others: Vec<Collection> = s
                .list_collections()?
                .into_iter()
                .filter(|c| c.id != *collection_id)
                .collect();
            match choose(others.as_slice()) {
                Some(next_id) => pin_in(s, &next_id).map(Some),
                None => Ok(None),
            }
        })?;

        match &next {
            Some(next) => log::debug!("moved pin from {} to {}", collection_id, next.id),
            None => log::debug!("unpinned collection {}; nothing to hand off to", collection_id),
        }
        Ok(next)
    }

    /// Flip an entry's completion flag.
    pub fn toggle_completion(&self, entry_id: &Uuid) -> Result<Entry> {
        let toggled = self.storage.write(|s| {
            let entry = s
                .get_entry(entry_id)?
                .ok_or(ListError::EntryNotFound(*entry_id))?;
            s.update_entry(entry_id, &EntryPatch::new().completed(!entry.completed))
        })?;

        log::debug!("entry {} completed={}", entry_id, toggled.completed);
        Ok(toggled)
    }

    /// Scan both stores for invariant violations without repairing anything.
    pub fn check_integrity(&self) -> Result<IntegrityReport> {
        let report = self.storage.read(|s| {
            let collections = s.list_collections()?;
            let entries = s.list_all_entries()?;
            Ok(IntegrityReport::build(&collections, &entries))
        })?;

        for violation in &report.violations {
            log::error!(target: "listapp::integrity", "{}", violation);
        }
        Ok(report)
    }
}

/// Membership first, then the record, so no reader sees a dangling ID.
fn detach_and_delete(s: &dyn StoreSession, operation: &'static str, entry: &Entry) -> Result<()> {
    if !s.remove_member(&entry.collection_id, &entry.id)? {
        return Err(ListError::integrity_fault(
            operation,
            format!(
                "entry {} is owned by collection {} but missing from its membership list",
                entry.id, entry.collection_id
            ),
        ));
    }
    s.delete_entry(&entry.id)
}

/// The pinned collection, if any. More than one pin is a fault.
fn current_pin(s: &dyn StoreSession, operation: &'static str) -> Result<Option<Collection>> {
    match s.pinned_ids()?.as_slice() {
        [] => Ok(None),
        [existing] => s
            .get_collection(existing)?
            .ok_or(ListError::CollectionNotFound(*existing))
            .map(Some),
        many => Err(ListError::integrity_fault(
            operation,
            format!("{} collections are pinned", many.len()),
        )),
    }
}

/// Unpin every other collection, then pin this one.
fn pin_in(s: &dyn StoreSession, collection_id: &Uuid) -> Result<Collection> {
    if s.get_collection(collection_id)?.is_none() {
        return Err(ListError::CollectionNotFound(*collection_id));
    }

    s.unpin_all_except(collection_id)?;
    let pinned = s.set_pinned(collection_id, true)?;

    let pinned_ids = s.pinned_ids()?;
    if pinned_ids != [*collection_id] {
        return Err(ListError::integrity_fault(
            "pin",
            format!(
                "expected only {} pinned, found {:?}",
                collection_id, pinned_ids
            ),
        ));
    }
    Ok(pinned)
}
