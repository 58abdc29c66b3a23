use std::path::Path;
use std::sync::Arc;
use std::thread;

use listapp_core::{
    Collection, IntegrityManager, ListError, NewCollection, NewEntry, QueryService, SqliteStorage,
    Storage, StorageOptions,
};
use tempfile::TempDir;

fn open(path: &Path) -> SqliteStorage {
    SqliteStorage::open(path, &StorageOptions::default()).expect("open should succeed")
}

fn seed(storage: &SqliteStorage, count: usize) -> Vec<Collection> {
    let integrity = IntegrityManager::new(storage);
    (0..count)
        .map(|i| {
            integrity
                .create_collection(&NewCollection::new(format!("List {}", i)))
                .expect("create should succeed")
        })
        .collect()
}

#[test]
fn test_concurrent_pins_leave_one_pinned() {
    let dir = TempDir::new().expect("temp dir should be created");
    let path = dir.path().join("listapp.db");
    let collections = seed(&open(&path), 6);

    // One handle per thread, all on the same file.
    let storages: Vec<_> = collections.iter().map(|_| open(&path)).collect();
    let handles: Vec<_> = storages
        .into_iter()
        .zip(collections.iter().map(|c| c.id))
        .map(|(storage, id)| {
            thread::spawn(move || {
                let integrity = IntegrityManager::new(&storage);
                for round in 0..20 {
                    if round % 5 == 4 {
                        integrity.unpin(&id).expect("unpin should succeed");
                    } else {
                        integrity.pin(&id).expect("pin should succeed");
                    }
                    let pinned = storage
                        .read(|s| s.pinned_ids())
                        .expect("read should succeed");
                    assert!(pinned.len() <= 1, "pinned: {:?}", pinned);
                }
            })
        })
        .collect();

    for handle in handles {
        handle.join().expect("thread should not panic");
    }

    let storage = open(&path);
    assert!(storage.read(|s| s.pinned_ids()).expect("read should succeed").len() <= 1);
    assert!(IntegrityManager::new(&storage)
        .check_integrity()
        .expect("check should succeed")
        .is_clean());
}

#[test]
fn test_concurrent_fallback_pins_agree() {
    let dir = TempDir::new().expect("temp dir should be created");
    let path = dir.path().join("listapp.db");
    seed(&open(&path), 4);

    let storages: Vec<_> = (0..4).map(|_| open(&path)).collect();
    let handles: Vec<_> = storages
        .into_iter()
        .map(|storage| {
            thread::spawn(move || {
                QueryService::new(&storage)
                    .ensure_pinned()
                    .expect("ensure_pinned should succeed")
                    .expect("a collection should be pinned")
                    .id
            })
        })
        .collect();

    let winners: Vec<_> = handles
        .into_iter()
        .map(|h| h.join().expect("thread should not panic"))
        .collect();
    assert!(winners.windows(2).all(|w| w[0] == w[1]), "{:?}", winners);
}

#[test]
fn test_delete_racing_adds_leaves_no_orphans() {
    let storage = Arc::new(SqliteStorage::open_in_memory().expect("open should succeed"));
    let books = seed(&storage, 1).remove(0).id;

    let adders: Vec<_> = (0..4)
        .map(|t| {
            let storage = Arc::clone(&storage);
            thread::spawn(move || {
                let integrity = IntegrityManager::new(storage.as_ref());
                for i in 0..25 {
                    match integrity
                        .add_entry_to_collection(&books, &NewEntry::new(format!("{}-{}", t, i)))
                    {
                        Ok(_) => {}
                        Err(ListError::CollectionNotFound(_)) => break,
                        Err(err) => panic!("unexpected error: {}", err),
                    }
                }
            })
        })
        .collect();

    let deleter = {
        let storage = Arc::clone(&storage);
        thread::spawn(move || {
            thread::yield_now();
            IntegrityManager::new(storage.as_ref())
                .delete_collection(&books)
                .expect("delete should succeed")
        })
    };

    for handle in adders {
        handle.join().expect("thread should not panic");
    }
    deleter.join().expect("thread should not panic");

    let report = IntegrityManager::new(storage.as_ref())
        .check_integrity()
        .expect("check should succeed");
    assert!(report.is_clean(), "{:?}", report.violations);
    assert_eq!(report.collections, 0);
    assert_eq!(report.entries, 0);
}
