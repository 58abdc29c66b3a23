//! SQLite storage backend.
//!
//! One connection per storage handle, guarded by a mutex. Every write runs in
//! a `BEGIN IMMEDIATE` transaction so the write lock is taken before any row
//! is read; across processes sharing one database file, SQLite's own lock
//! serializes writers and `busy_timeout` bounds the wait.

mod row;
mod session;

use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard};
use std::time::Duration;

use chrono::{DateTime, SubsecRound, Utc};
use rusqlite::{Connection, OptionalExtension, TransactionBehavior};

use crate::error::{ListError, Result};
use crate::storage::traits::{Storage, StoreSession};

use row::{format_timestamp, parse_timestamp};
use session::SqliteSession;

/// On-disk format written to the `meta` table.
pub const FORMAT_VERSION: &str = "1";

const SCHEMA: &str = r#"
    CREATE TABLE IF NOT EXISTS meta (
        key TEXT PRIMARY KEY,
        value TEXT NOT NULL
    );

    CREATE TABLE IF NOT EXISTS collections (
        id TEXT PRIMARY KEY,
        name TEXT NOT NULL,
        description TEXT,
        is_pinned INTEGER NOT NULL DEFAULT 0,
        last_updated TEXT NOT NULL,
        created_at TEXT NOT NULL,
        updated_at TEXT NOT NULL
    );

    -- At most one pinned collection
    CREATE UNIQUE INDEX IF NOT EXISTS collections_single_pin
    ON collections (is_pinned)
    WHERE is_pinned = 1;

    -- Ownership is maintained by the integrity layer, not by a foreign key
    CREATE TABLE IF NOT EXISTS entries (
        id TEXT PRIMARY KEY,
        collection_id TEXT NOT NULL,
        name TEXT NOT NULL,
        description TEXT,
        completed INTEGER NOT NULL DEFAULT 0,
        created_at TEXT NOT NULL,
        updated_at TEXT NOT NULL
    );

    CREATE INDEX IF NOT EXISTS entries_by_collection ON entries (collection_id);

    -- Ordered membership list of each collection
    CREATE TABLE IF NOT EXISTS collection_entries (
        collection_id TEXT NOT NULL,
        entry_id TEXT NOT NULL,
        position INTEGER NOT NULL,

        PRIMARY KEY (collection_id, entry_id),
        UNIQUE (entry_id),
        FOREIGN KEY (collection_id) REFERENCES collections(id)
    );
"#;

/// Connection options for a file-backed store.
#[derive(Debug, Clone)]
pub struct StorageOptions {
    /// How long a writer waits on another process's lock before giving up
    pub busy_timeout: Duration,
}

impl Default for StorageOptions {
    fn default() -> Self {
        Self {
            busy_timeout: Duration::from_millis(5000),
        }
    }
}

impl StorageOptions {
    pub fn busy_timeout(mut self, timeout: Duration) -> Self {
        self.busy_timeout = timeout;
        self
    }
}

/// SQLite-backed entry and collection stores.
pub struct SqliteStorage {
    path: Option<PathBuf>,
    conn: Mutex<Connection>,
}

impl SqliteStorage {
    /// Open (creating if needed) a database file.
    pub fn open(path: &Path, options: &StorageOptions) -> Result<Self> {
        let conn = Connection::open(path)?;
        conn.busy_timeout(options.busy_timeout)?;
        conn.pragma_update_and_check(None, "journal_mode", "WAL", |row| {
            row.get::<_, String>(0)
        })?;
        Self::init(conn, Some(path.to_path_buf()))
    }

    /// Open a private in-memory database.
    pub fn open_in_memory() -> Result<Self> {
        Self::init(Connection::open_in_memory()?, None)
    }

    /// Path of the backing file, or `None` for an in-memory store.
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Format version recorded when the database was created.
    pub fn format_version(&self) -> Result<String> {
        let conn = self.lock_conn()?;
        Ok(conn.query_row(
            "SELECT value FROM meta WHERE key = 'format_version'",
            [],
            |row| row.get(0),
        )?)
    }

    fn init(mut conn: Connection, path: Option<PathBuf>) -> Result<Self> {
        conn.execute_batch("PRAGMA foreign_keys = ON;")?;

        let tx = conn.transaction_with_behavior(TransactionBehavior::Immediate)?;
        tx.execute_batch(SCHEMA)?;

        let created_at = format_timestamp(&Utc::now());
        tx.execute(
            "INSERT OR IGNORE INTO meta (key, value) VALUES ('format_version', ?)",
            [FORMAT_VERSION],
        )?;
        tx.execute(
            "INSERT OR IGNORE INTO meta (key, value) VALUES ('created_at', ?)",
            [&created_at],
        )?;
        tx.execute(
            "INSERT OR IGNORE INTO meta (key, value) VALUES ('last_modified', ?)",
            [&created_at],
        )?;
        tx.commit()?;

        log::debug!(
            "opened store at {}",
            path.as_ref()
                .map(|p| p.display().to_string())
                .unwrap_or_else(|| ":memory:".to_string())
        );

        Ok(Self {
            path,
            conn: Mutex::new(conn),
        })
    }

    /// Lock the database connection, returning an error if the mutex is poisoned.
    fn lock_conn(&self) -> Result<MutexGuard<'_, Connection>> {
        self.conn
            .lock()
            .map_err(|_| ListError::StorageUnavailable("SQLite connection poisoned".to_string()))
    }

    /// Timestamp for the current write transaction.
    ///
    /// Strictly after the previous write's timestamp, even when the wall
    /// clock has not advanced or has stepped backwards.
    fn next_stamp(conn: &Connection) -> Result<DateTime<Utc>> {
        let now = Utc::now().trunc_subsecs(6);
        let last: Option<String> = conn
            .query_row(
                "SELECT value FROM meta WHERE key = 'last_modified'",
                [],
                |row| row.get(0),
            )
            .optional()?;

        match last {
            Some(value) => {
                let last = parse_timestamp(&value, "last_modified")?;
                if now > last {
                    Ok(now)
                } else {
                    Ok(last + chrono::Duration::microseconds(1))
                }
            }
            None => Ok(now),
        }
    }
}

impl Storage for SqliteStorage {
    fn read<T, F>(&self, f: F) -> Result<T>
    where
        F: FnOnce(&dyn StoreSession) -> Result<T>,
    {
        let mut conn = self.lock_conn()?;
        let tx = conn.transaction_with_behavior(TransactionBehavior::Deferred)?;

        let output = f(&SqliteSession::read_only(&tx))?;

        tx.commit()?;
        Ok(output)
    }

    fn write<T, F>(&self, f: F) -> Result<T>
    where
        F: FnOnce(&dyn StoreSession) -> Result<T>,
    {
        let mut conn = self.lock_conn()?;
        let tx = conn.transaction_with_behavior(TransactionBehavior::Immediate)?;

        let stamp = Self::next_stamp(&tx)?;
        // Dropping `tx` on the error path rolls back every write made by `f`.
        let output = f(&SqliteSession::writable(&tx, stamp))?;

        tx.execute(
            "UPDATE meta SET value = ? WHERE key = 'last_modified'",
            [format_timestamp(&stamp)],
        )?;

        tx.commit()?;
        Ok(output)
    }
}
