use uuid::Uuid;

use super::*;
use crate::query::QueryService;
use crate::storage::sqlite::tests::execute_raw;
use crate::storage::traits::{CollectionStore, EntryStore};
use crate::storage::SqliteStorage;

fn storage() -> SqliteStorage {
    SqliteStorage::open_in_memory().unwrap()
}

fn snapshot(storage: &SqliteStorage) -> (Vec<Collection>, Vec<Entry>) {
    storage
        .read(|s| Ok((s.list_collections()?, s.list_all_entries()?)))
        .unwrap()
}

fn collection(storage: &SqliteStorage, id: &Uuid) -> Collection {
    storage.read(|s| s.get_collection(id)).unwrap().unwrap()
}

/// Store step that silently does nothing, or fails outright.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Fault {
    SkipAppend,
    SkipUnpin,
    SkipCollectionDelete,
    FailPin,
}

/// Storage wrapper whose write sessions drop one step on the floor.
struct FaultyStorage {
    inner: SqliteStorage,
    fault: Fault,
}

impl Storage for FaultyStorage {
    fn read<T, F>(&self, f: F) -> Result<T>
    where
        F: FnOnce(&dyn StoreSession) -> Result<T>,
    {
        self.inner.read(f)
    }

    fn write<T, F>(&self, f: F) -> Result<T>
    where
        F: FnOnce(&dyn StoreSession) -> Result<T>,
    {
        let fault = self.fault;
        self.inner.write(|s| f(&FaultySession { inner: s, fault }))
    }
}

struct FaultySession<'a> {
    inner: &'a dyn StoreSession,
    fault: Fault,
}

impl EntryStore for FaultySession<'_> {
    fn insert_entry(&self, collection_id: &Uuid, entry: &NewEntry) -> Result<Entry> {
        self.inner.insert_entry(collection_id, entry)
    }

    fn get_entry(&self, id: &Uuid) -> Result<Option<Entry>> {
        self.inner.get_entry(id)
    }

    fn update_entry(&self, id: &Uuid, patch: &EntryPatch) -> Result<Entry> {
        self.inner.update_entry(id, patch)
    }

    fn delete_entry(&self, id: &Uuid) -> Result<()> {
        self.inner.delete_entry(id)
    }

    fn list_entries_by_collection(&self, collection_id: &Uuid) -> Result<Vec<Entry>> {
        self.inner.list_entries_by_collection(collection_id)
    }

    fn delete_entries_by_collection(&self, collection_id: &Uuid) -> Result<usize> {
        self.inner.delete_entries_by_collection(collection_id)
    }

    fn list_all_entries(&self) -> Result<Vec<Entry>> {
        self.inner.list_all_entries()
    }
}

impl CollectionStore for FaultySession<'_> {
    fn insert_collection(&self, collection: &NewCollection) -> Result<Collection> {
        self.inner.insert_collection(collection)
    }

    fn get_collection(&self, id: &Uuid) -> Result<Option<Collection>> {
        self.inner.get_collection(id)
    }

    fn list_collections(&self) -> Result<Vec<Collection>> {
        self.inner.list_collections()
    }

    fn update_collection(&self, id: &Uuid, patch: &CollectionPatch) -> Result<Collection> {
        self.inner.update_collection(id, patch)
    }

    fn set_pinned(&self, id: &Uuid, pinned: bool) -> Result<Collection> {
        if pinned && self.fault == Fault::FailPin {
            return Err(ListError::Storage("pin write failed".to_string()));
        }
        self.inner.set_pinned(id, pinned)
    }

    fn unpin_all_except(&self, keep: &Uuid) -> Result<usize> {
        if self.fault == Fault::SkipUnpin {
            return Ok(0);
        }
        self.inner.unpin_all_except(keep)
    }

    fn pinned_ids(&self) -> Result<Vec<Uuid>> {
        self.inner.pinned_ids()
    }

    fn append_member(&self, id: &Uuid, entry_id: &Uuid) -> Result<Collection> {
        if self.fault == Fault::SkipAppend {
            return self
                .inner
                .get_collection(id)?
                .ok_or(ListError::CollectionNotFound(*id));
        }
        self.inner.append_member(id, entry_id)
    }

    fn remove_member(&self, id: &Uuid, entry_id: &Uuid) -> Result<bool> {
        self.inner.remove_member(id, entry_id)
    }

    fn delete_collection(&self, id: &Uuid) -> Result<()> {
        if self.fault == Fault::SkipCollectionDelete {
            return Ok(());
        }
        self.inner.delete_collection(id)
    }
}

#[test]
fn test_books_and_movies_pin_scenario() {
    let storage = storage();
    let manager = IntegrityManager::new(&storage);

    let books = manager
        .create_collection(&NewCollection::new("Books"))
        .unwrap();
    assert!(books.entry_ids.is_empty());
    assert!(!books.is_pinned);

    let dune = manager
        .add_entry_to_collection(&books.id, &NewEntry::new("Dune"))
        .unwrap();
    assert_eq!(dune.collection_id, books.id);
    assert_eq!(collection(&storage, &books.id).entry_ids, vec![dune.id]);

    let pinned = manager.pin(&books.id).unwrap();
    assert!(pinned.is_pinned);

    let movies = manager
        .create_collection(&NewCollection::new("Movies"))
        .unwrap();
    let movies = manager.pin(&movies.id).unwrap();
    assert!(movies.is_pinned);
    assert!(!collection(&storage, &books.id).is_pinned);
}

#[test]
fn test_add_then_remove_restores_membership() {
    let storage = storage();
    let manager = IntegrityManager::new(&storage);
    let books = manager
        .create_collection(&NewCollection::new("Books"))
        .unwrap();
    let first = manager
        .add_entry_to_collection(&books.id, &NewEntry::new("Dune"))
        .unwrap();
    let before = collection(&storage, &books.id).entry_ids;

    let extra = manager
        .add_entry_to_collection(&books.id, &NewEntry::new("Emma").with_description("Austen"))
        .unwrap();
    assert_eq!(
        collection(&storage, &books.id).entry_ids,
        vec![first.id, extra.id]
    );

    manager.remove_entry(&books.id, &extra.id).unwrap();
    assert_eq!(collection(&storage, &books.id).entry_ids, before);
    assert!(storage.read(|s| s.get_entry(&extra.id)).unwrap().is_none());
}

#[test]
fn test_add_to_missing_collection_creates_nothing() {
    let storage = storage();
    let manager = IntegrityManager::new(&storage);
    let missing = Uuid::new_v4();

    let result = manager.add_entry_to_collection(&missing, &NewEntry::new("Dune"));
    assert!(matches!(result, Err(ListError::CollectionNotFound(id)) if id == missing));
    assert!(snapshot(&storage).1.is_empty());
}

#[test]
fn test_empty_names_are_validation_errors() {
    let storage = storage();
    let manager = IntegrityManager::new(&storage);
    assert!(matches!(
        manager.create_collection(&NewCollection::new("  ")),
        Err(ListError::Validation(_))
    ));

    let books = manager
        .create_collection(&NewCollection::new("Books"))
        .unwrap();
    assert!(matches!(
        manager.add_entry_to_collection(&books.id, &NewEntry::new("")),
        Err(ListError::Validation(_))
    ));
    assert!(matches!(
        manager.update_collection(&books.id, &CollectionPatch::new().name("")),
        Err(ListError::Validation(_))
    ));
    assert!(collection(&storage, &books.id).entry_ids.is_empty());
}

#[test]
fn test_remove_entry_from_wrong_collection_mutates_nothing() {
    let storage = storage();
    let manager = IntegrityManager::new(&storage);
    let books = manager
        .create_collection(&NewCollection::new("Books"))
        .unwrap();
    let movies = manager
        .create_collection(&NewCollection::new("Movies"))
        .unwrap();
    let dune = manager
        .add_entry_to_collection(&books.id, &NewEntry::new("Dune"))
        .unwrap();
    let before = snapshot(&storage);

    let result = manager.remove_entry(&movies.id, &dune.id);
    let err = result.unwrap_err();
    assert_eq!(err.class(), crate::error::ErrorClass::NotFound);
    assert!(matches!(err, ListError::EntryNotInCollection { .. }));
    assert_eq!(snapshot(&storage), before);
}

#[test]
fn test_remove_entry_missing_records() {
    let storage = storage();
    let manager = IntegrityManager::new(&storage);
    let books = manager
        .create_collection(&NewCollection::new("Books"))
        .unwrap();

    assert!(matches!(
        manager.remove_entry(&books.id, &Uuid::new_v4()),
        Err(ListError::EntryNotFound(_))
    ));
    assert!(matches!(
        manager.remove_entry(&Uuid::new_v4(), &Uuid::new_v4()),
        Err(ListError::CollectionNotFound(_))
    ));
}

#[test]
fn test_remove_entry_with_drifted_membership_is_fault() {
    let storage = storage();
    let manager = IntegrityManager::new(&storage);
    let books = manager
        .create_collection(&NewCollection::new("Books"))
        .unwrap();
    let dune = manager
        .add_entry_to_collection(&books.id, &NewEntry::new("Dune"))
        .unwrap();
    execute_raw(
        &storage,
        &format!(
            "DELETE FROM collection_entries WHERE entry_id = '{}'",
            dune.id
        ),
    );

    let err = manager.remove_entry(&books.id, &dune.id).unwrap_err();
    assert!(err.is_integrity_fault());
    assert!(storage.read(|s| s.get_entry(&dune.id)).unwrap().is_some());
}

#[test]
fn test_delete_entry_by_id_detaches_from_owner() {
    let storage = storage();
    let manager = IntegrityManager::new(&storage);
    let books = manager
        .create_collection(&NewCollection::new("Books"))
        .unwrap();
    let dune = manager
        .add_entry_to_collection(&books.id, &NewEntry::new("Dune"))
        .unwrap();
    let emma = manager
        .add_entry_to_collection(&books.id, &NewEntry::new("Emma"))
        .unwrap();

    manager.delete_entry(&dune.id).unwrap();
    assert_eq!(collection(&storage, &books.id).entry_ids, vec![emma.id]);
    assert!(matches!(
        manager.delete_entry(&dune.id),
        Err(ListError::EntryNotFound(_))
    ));
}

#[test]
fn test_delete_orphan_entry_removes_it() {
    let storage = storage();
    let manager = IntegrityManager::new(&storage);
    let books = manager
        .create_collection(&NewCollection::new("Books"))
        .unwrap();
    let dune = manager
        .add_entry_to_collection(&books.id, &NewEntry::new("Dune"))
        .unwrap();
    let orphan = storage
        .write(|s| s.insert_entry(&Uuid::new_v4(), &NewEntry::new("Lost")))
        .unwrap();
    assert!(!manager.check_integrity().unwrap().is_clean());

    manager.delete_entry(&orphan.id).unwrap();

    assert!(storage.read(|s| s.get_entry(&orphan.id)).unwrap().is_none());
    assert_eq!(collection(&storage, &books.id).entry_ids, vec![dune.id]);
    assert!(manager.check_integrity().unwrap().is_clean());
    assert!(matches!(
        manager.delete_entry(&orphan.id),
        Err(ListError::EntryNotFound(_))
    ));
}

#[test]
fn test_delete_collection_cascades() {
    let storage = storage();
    let manager = IntegrityManager::new(&storage);
    let books = manager
        .create_collection(&NewCollection::new("Books"))
        .unwrap();
    let movies = manager
        .create_collection(&NewCollection::new("Movies"))
        .unwrap();
    for name in ["Dune", "Emma", "Ulysses"] {
        manager
            .add_entry_to_collection(&books.id, &NewEntry::new(name))
            .unwrap();
    }
    let alien = manager
        .add_entry_to_collection(&movies.id, &NewEntry::new("Alien"))
        .unwrap();

    assert_eq!(manager.delete_collection(&books.id).unwrap(), 3);

    let (collections, entries) = snapshot(&storage);
    assert_eq!(collections.len(), 1);
    assert_eq!(entries, vec![alien]);
    assert!(storage
        .read(|s| s.list_entries_by_collection(&books.id))
        .unwrap()
        .is_empty());
    assert!(matches!(
        manager.delete_collection(&books.id),
        Err(ListError::CollectionNotFound(_))
    ));
}

#[test]
fn test_partial_collection_delete_is_fault_and_rolls_back() {
    let faulty = FaultyStorage {
        inner: storage(),
        fault: Fault::SkipCollectionDelete,
    };
    let manager = IntegrityManager::new(&faulty);
    let books = manager
        .create_collection(&NewCollection::new("Books"))
        .unwrap();
    let dune = manager
        .add_entry_to_collection(&books.id, &NewEntry::new("Dune"))
        .unwrap();

    let err = manager.delete_collection(&books.id).unwrap_err();
    assert!(err.is_integrity_fault());

    let (collections, entries) = snapshot(&faulty.inner);
    assert_eq!(collections.len(), 1);
    assert_eq!(collections[0].entry_ids, vec![dune.id]);
    assert_eq!(entries, vec![dune]);
}

#[test]
fn test_lost_append_is_fault_and_leaves_no_orphan() {
    let faulty = FaultyStorage {
        inner: storage(),
        fault: Fault::SkipAppend,
    };
    let manager = IntegrityManager::new(&faulty);
    let books = manager
        .create_collection(&NewCollection::new("Books"))
        .unwrap();

    let err = manager
        .add_entry_to_collection(&books.id, &NewEntry::new("Dune"))
        .unwrap_err();
    assert!(err.is_integrity_fault());
    assert!(snapshot(&faulty.inner).1.is_empty());
}

#[test]
fn test_pin_with_lost_unpin_is_fault() {
    let faulty = FaultyStorage {
        inner: storage(),
        fault: Fault::SkipUnpin,
    };
    // Without the unique index the second pin would otherwise land.
    execute_raw(&faulty.inner, "DROP INDEX collections_single_pin;");
    let manager = IntegrityManager::new(&faulty);
    let books = manager
        .create_collection(&NewCollection::new("Books"))
        .unwrap();
    let movies = manager
        .create_collection(&NewCollection::new("Movies"))
        .unwrap();
    manager.pin(&books.id).unwrap();

    let err = manager.pin(&movies.id).unwrap_err();
    assert!(err.is_integrity_fault());
    assert_eq!(
        faulty.inner.read(|s| s.pinned_ids()).unwrap(),
        vec![books.id]
    );
}

#[test]
fn test_unpin_does_not_pin_replacement() {
    let storage = storage();
    let manager = IntegrityManager::new(&storage);
    let books = manager
        .create_collection(&NewCollection::new("Books"))
        .unwrap();
    manager
        .create_collection(&NewCollection::new("Movies"))
        .unwrap();
    manager.pin(&books.id).unwrap();

    let unpinned = manager.unpin(&books.id).unwrap();
    assert!(!unpinned.is_pinned);
    assert!(storage.read(|s| s.pinned_ids()).unwrap().is_empty());

    // Unpinning again is a no-op on the flag.
    assert!(!manager.unpin(&books.id).unwrap().is_pinned);
}

#[test]
fn test_pin_and_unpin_missing_collection() {
    let storage = storage();
    let manager = IntegrityManager::new(&storage);
    assert!(matches!(
        manager.pin(&Uuid::new_v4()),
        Err(ListError::CollectionNotFound(_))
    ));
    assert!(matches!(
        manager.unpin(&Uuid::new_v4()),
        Err(ListError::CollectionNotFound(_))
    ));
}

#[test]
fn test_pin_is_idempotent() {
    let storage = storage();
    let manager = IntegrityManager::new(&storage);
    let books = manager
        .create_collection(&NewCollection::new("Books"))
        .unwrap();
    manager.pin(&books.id).unwrap();
    manager.pin(&books.id).unwrap();
    assert_eq!(storage.read(|s| s.pinned_ids()).unwrap(), vec![books.id]);
}

#[test]
fn test_pin_if_unpinned_respects_existing_pin() {
    let storage = storage();
    let manager = IntegrityManager::new(&storage);
    let books = manager
        .create_collection(&NewCollection::new("Books"))
        .unwrap();
    let movies = manager
        .create_collection(&NewCollection::new("Movies"))
        .unwrap();

    let first = manager.pin_if_unpinned(&books.id).unwrap();
    assert_eq!(first.id, books.id);
    assert!(first.is_pinned);

    let second = manager.pin_if_unpinned(&movies.id).unwrap();
    assert_eq!(second.id, books.id);
    assert!(!collection(&storage, &movies.id).is_pinned);
}

#[test]
fn test_toggle_completion_flips_only_flag() {
    let storage = storage();
    let manager = IntegrityManager::new(&storage);
    let books = manager
        .create_collection(&NewCollection::new("Books"))
        .unwrap();
    let dune = manager
        .add_entry_to_collection(&books.id, &NewEntry::new("Dune"))
        .unwrap();
    let books_before = collection(&storage, &books.id);

    assert!(manager.toggle_completion(&dune.id).unwrap().completed);
    let toggled = manager.toggle_completion(&dune.id).unwrap();
    assert!(!toggled.completed);
    assert_eq!(toggled.name, "Dune");

    // Entry mutations leave the collection record alone.
    assert_eq!(collection(&storage, &books.id), books_before);
    assert!(matches!(
        manager.toggle_completion(&Uuid::new_v4()),
        Err(ListError::EntryNotFound(_))
    ));
}

#[test]
fn test_update_collection_refreshes_last_updated() {
    let storage = storage();
    let manager = IntegrityManager::new(&storage);
    let books = manager
        .create_collection(&NewCollection::new("Books"))
        .unwrap();

    let renamed = manager
        .update_collection(
            &books.id,
            &CollectionPatch::new().name("Novels").description("fiction"),
        )
        .unwrap();
    assert_eq!(renamed.name, "Novels");
    assert_eq!(renamed.description.as_deref(), Some("fiction"));
    assert!(renamed.last_updated > books.last_updated);
    assert_eq!(renamed.created_at, books.created_at);
}

#[test]
fn test_update_entry_keeps_owner() {
    let storage = storage();
    let manager = IntegrityManager::new(&storage);
    let books = manager
        .create_collection(&NewCollection::new("Books"))
        .unwrap();
    let dune = manager
        .add_entry_to_collection(&books.id, &NewEntry::new("Dune"))
        .unwrap();

    let updated = manager
        .update_entry(&dune.id, &EntryPatch::new().name("Dune Messiah").completed(true))
        .unwrap();
    assert_eq!(updated.name, "Dune Messiah");
    assert!(updated.completed);
    assert_eq!(updated.collection_id, books.id);
}

#[test]
fn test_check_integrity_reports_raw_corruption() {
    let storage = storage();
    let manager = IntegrityManager::new(&storage);
    let books = manager
        .create_collection(&NewCollection::new("Books"))
        .unwrap();
    let dune = manager
        .add_entry_to_collection(&books.id, &NewEntry::new("Dune"))
        .unwrap();
    assert!(manager.check_integrity().unwrap().is_clean());

    execute_raw(
        &storage,
        &format!(
            "DELETE FROM collection_entries WHERE collection_id = '{id}';
             DELETE FROM collections WHERE id = '{id}';",
            id = books.id
        ),
    );

    let report = manager.check_integrity().unwrap();
    assert!(report.violations.contains(&Violation::OrphanEntry {
        entry: dune.id,
        collection: books.id,
    }));
    assert!(report.into_result().unwrap_err().is_integrity_fault());
}

#[test]
fn test_failed_rotation_keeps_original_pin() {
    let storage = storage();
    let manager = IntegrityManager::new(&storage);
    let books = manager
        .create_collection(&NewCollection::new("Books"))
        .unwrap();
    let movies = manager
        .create_collection(&NewCollection::new("Movies"))
        .unwrap();
    manager.pin(&books.id).unwrap();
    let before = snapshot(&storage);

    let faulty = FaultyStorage {
        inner: storage,
        fault: Fault::FailPin,
    };
    let err = QueryService::new(&faulty).rotate_pin(&books.id).unwrap_err();
    assert!(matches!(err, ListError::Storage(_)));

    assert_eq!(snapshot(&faulty.inner), before);
    assert_eq!(
        faulty.inner.read(|s| s.pinned_ids()).unwrap(),
        vec![books.id]
    );
    assert!(!collection(&faulty.inner, &movies.id).is_pinned);
}

#[test]
fn test_hand_off_pin_chooses_among_others() {
    let storage = storage();
    let manager = IntegrityManager::new(&storage);
    let books = manager
        .create_collection(&NewCollection::new("Books"))
        .unwrap();
    let movies = manager
        .create_collection(&NewCollection::new("Movies"))
        .unwrap();
    manager.pin(&books.id).unwrap();

    let next = manager
        .hand_off_pin(&books.id, |others| {
            assert_eq!(others.len(), 1);
            others.first().map(|c| c.id)
        })
        .unwrap()
        .unwrap();
    assert_eq!(next.id, movies.id);
    assert!(!collection(&storage, &books.id).is_pinned);

    assert!(manager
        .hand_off_pin(&movies.id, |_| None)
        .unwrap()
        .is_none());
    assert!(storage.read(|s| s.pinned_ids()).unwrap().is_empty());
    assert!(matches!(
        manager.hand_off_pin(&Uuid::new_v4(), |_| None),
        Err(ListError::CollectionNotFound(_))
    ));
}

#[test]
fn test_pin_chosen_if_unpinned() {
    let storage = storage();
    let manager = IntegrityManager::new(&storage);
    assert!(manager
        .pin_chosen_if_unpinned(|all| all.first().map(|c| c.id))
        .unwrap()
        .is_none());

    let books = manager
        .create_collection(&NewCollection::new("Books"))
        .unwrap();
    let movies = manager
        .create_collection(&NewCollection::new("Movies"))
        .unwrap();
    let pinned = manager
        .pin_chosen_if_unpinned(|all| all.last().map(|c| c.id))
        .unwrap()
        .unwrap();
    assert_eq!(pinned.id, movies.id);

    let kept = manager
        .pin_chosen_if_unpinned(|_| Some(books.id))
        .unwrap()
        .unwrap();
    assert_eq!(kept.id, movies.id);
}
