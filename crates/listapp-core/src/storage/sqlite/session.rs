//! Entry and collection stores over one SQLite transaction.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use rusqlite::{Connection, OptionalExtension};
use uuid::Uuid;

use super::row::{
    format_timestamp, parse_uuid, CollectionRow, EntryRow, COLLECTION_COLUMNS, ENTRY_COLUMNS,
};
use crate::error::{ListError, Result};
use crate::storage::traits::{CollectionStore, EntryStore};
use crate::storage::types::{
    Collection, CollectionPatch, Entry, EntryPatch, NewCollection, NewEntry,
};

/// Stores bound to an open transaction.
///
/// Write sessions carry the transaction's timestamp; every record written in
/// the transaction is stamped with it. Read sessions reject writes.
pub(super) struct SqliteSession<'c> {
    conn: &'c Connection,
    stamp: Option<DateTime<Utc>>,
}

impl<'c> SqliteSession<'c> {
    pub fn read_only(conn: &'c Connection) -> Self {
        Self { conn, stamp: None }
    }

    pub fn writable(conn: &'c Connection, stamp: DateTime<Utc>) -> Self {
        Self {
            conn,
            stamp: Some(stamp),
        }
    }

    fn stamp(&self) -> Result<String> {
        self.stamp
            .as_ref()
            .map(format_timestamp)
            .ok_or_else(|| ListError::Storage("Write attempted in a read session".to_string()))
    }

    fn member_ids(&self, collection_id: &str) -> Result<Vec<Uuid>> {
        let mut stmt = self.conn.prepare(
            "SELECT entry_id FROM collection_entries WHERE collection_id = ? ORDER BY position",
        )?;
        let rows = stmt.query_map([collection_id], |row| row.get::<_, String>(0))?;

        let mut ids = Vec::new();
        for row in rows {
            ids.push(parse_uuid(&row?, "member entry")?);
        }
        Ok(ids)
    }

    fn touch_collection(&self, id: &Uuid) -> Result<usize> {
        let stamp = self.stamp()?;
        Ok(self.conn.execute(
            "UPDATE collections SET last_updated = ?1, updated_at = ?1 WHERE id = ?2",
            (&stamp, id.to_string()),
        )?)
    }

    fn require_collection(&self, id: &Uuid) -> Result<Collection> {
        self.get_collection(id)?
            .ok_or(ListError::CollectionNotFound(*id))
    }

    fn require_entry(&self, id: &Uuid) -> Result<Entry> {
        self.get_entry(id)?.ok_or(ListError::EntryNotFound(*id))
    }

    fn query_entries(&self, sql: &str, params: impl rusqlite::Params) -> Result<Vec<Entry>> {
        let mut stmt = self.conn.prepare(sql)?;
        let rows = stmt.query_map(params, EntryRow::from_row)?;

        let mut entries = Vec::new();
        for row in rows {
            entries.push(Entry::try_from(row?)?);
        }
        Ok(entries)
    }
}

impl EntryStore for SqliteSession<'_> {
    fn insert_entry(&self, collection_id: &Uuid, entry: &NewEntry) -> Result<Entry> {
        let stamp = self.stamp()?;
        let id = Uuid::new_v4();

        self.conn.execute(
            r#"
            INSERT INTO entries (id, collection_id, name, description, completed, created_at, updated_at)
            VALUES (?1, ?2, ?3, ?4, 0, ?5, ?5)
            "#,
            (
                id.to_string(),
                collection_id.to_string(),
                &entry.name,
                &entry.description,
                &stamp,
            ),
        )?;

        self.require_entry(&id)
    }

    fn get_entry(&self, id: &Uuid) -> Result<Option<Entry>> {
        let row = self
            .conn
            .query_row(
                &format!("SELECT {} FROM entries WHERE id = ?", ENTRY_COLUMNS),
                [id.to_string()],
                EntryRow::from_row,
            )
            .optional()?;

        row.map(Entry::try_from).transpose()
    }

    fn update_entry(&self, id: &Uuid, patch: &EntryPatch) -> Result<Entry> {
        let stamp = self.stamp()?;

        let updated = self.conn.execute(
            r#"
            UPDATE entries
            SET name = COALESCE(?1, name),
                description = COALESCE(?2, description),
                completed = COALESCE(?3, completed),
                updated_at = ?4
            WHERE id = ?5
            "#,
            (
                &patch.name,
                &patch.description,
                patch.completed,
                &stamp,
                id.to_string(),
            ),
        )?;

        if updated == 0 {
            return Err(ListError::EntryNotFound(*id));
        }

        self.require_entry(id)
    }

    fn delete_entry(&self, id: &Uuid) -> Result<()> {
        self.stamp()?;

        let deleted = self
            .conn
            .execute("DELETE FROM entries WHERE id = ?", [id.to_string()])?;

        if deleted == 0 {
            return Err(ListError::EntryNotFound(*id));
        }
        Ok(())
    }

    fn list_entries_by_collection(&self, collection_id: &Uuid) -> Result<Vec<Entry>> {
        self.query_entries(
            &format!(
                "SELECT {} FROM entries WHERE collection_id = ? ORDER BY created_at, id",
                ENTRY_COLUMNS
            ),
            [collection_id.to_string()],
        )
    }

    fn delete_entries_by_collection(&self, collection_id: &Uuid) -> Result<usize> {
        self.stamp()?;

        Ok(self.conn.execute(
            "DELETE FROM entries WHERE collection_id = ?",
            [collection_id.to_string()],
        )?)
    }

    fn list_all_entries(&self) -> Result<Vec<Entry>> {
        self.query_entries(
            &format!(
                "SELECT {} FROM entries ORDER BY created_at, id",
                ENTRY_COLUMNS
            ),
            [],
        )
    }
}

impl CollectionStore for SqliteSession<'_> {
    fn insert_collection(&self, collection: &NewCollection) -> Result<Collection> {
        let stamp = self.stamp()?;
        let id = Uuid::new_v4();

        self.conn.execute(
            r#"
            INSERT INTO collections (id, name, description, is_pinned, last_updated, created_at, updated_at)
            VALUES (?1, ?2, ?3, 0, ?4, ?4, ?4)
            "#,
            (
                id.to_string(),
                &collection.name,
                &collection.description,
                &stamp,
            ),
        )?;

        self.require_collection(&id)
    }

    fn get_collection(&self, id: &Uuid) -> Result<Option<Collection>> {
        let row = self
            .conn
            .query_row(
                &format!("SELECT {} FROM collections WHERE id = ?", COLLECTION_COLUMNS),
                [id.to_string()],
                CollectionRow::from_row,
            )
            .optional()?;

        match row {
            Some(row) => {
                let entry_ids = self.member_ids(&row.id)?;
                Ok(Some(row.into_collection(entry_ids)?))
            }
            None => Ok(None),
        }
    }

    fn list_collections(&self) -> Result<Vec<Collection>> {
        // Membership for every collection, in one pass.
        let mut members: HashMap<String, Vec<Uuid>> = HashMap::new();
        {
            let mut stmt = self.conn.prepare(
                "SELECT collection_id, entry_id FROM collection_entries ORDER BY collection_id, position",
            )?;
            let rows = stmt.query_map([], |row| {
                Ok((row.get::<_, String>(0)?, row.get::<_, String>(1)?))
            })?;
            for row in rows {
                let (collection_id, entry_id) = row?;
                members
                    .entry(collection_id)
                    .or_default()
                    .push(parse_uuid(&entry_id, "member entry")?);
            }
        }

        let mut stmt = self.conn.prepare(&format!(
            "SELECT {} FROM collections ORDER BY created_at, id",
            COLLECTION_COLUMNS
        ))?;
        let rows = stmt.query_map([], CollectionRow::from_row)?;

        let mut collections = Vec::new();
        for row in rows {
            let row = row?;
            let entry_ids = members.remove(&row.id).unwrap_or_default();
            collections.push(row.into_collection(entry_ids)?);
        }
        Ok(collections)
    }

    fn update_collection(&self, id: &Uuid, patch: &CollectionPatch) -> Result<Collection> {
        let stamp = self.stamp()?;

        let updated = self.conn.execute(
            r#"
            UPDATE collections
            SET name = COALESCE(?1, name),
                description = COALESCE(?2, description),
                last_updated = ?3,
                updated_at = ?3
            WHERE id = ?4
            "#,
            (&patch.name, &patch.description, &stamp, id.to_string()),
        )?;

        if updated == 0 {
            return Err(ListError::CollectionNotFound(*id));
        }

        self.require_collection(id)
    }

    fn set_pinned(&self, id: &Uuid, pinned: bool) -> Result<Collection> {
        let stamp = self.stamp()?;

        let updated = self.conn.execute(
            "UPDATE collections SET is_pinned = ?1, last_updated = ?2, updated_at = ?2 WHERE id = ?3",
            (pinned, &stamp, id.to_string()),
        )?;

        if updated == 0 {
            return Err(ListError::CollectionNotFound(*id));
        }

        self.require_collection(id)
    }

    fn unpin_all_except(&self, keep: &Uuid) -> Result<usize> {
        let stamp = self.stamp()?;

        Ok(self.conn.execute(
            r#"
            UPDATE collections
            SET is_pinned = 0, last_updated = ?1, updated_at = ?1
            WHERE is_pinned = 1 AND id != ?2
            "#,
            (&stamp, keep.to_string()),
        )?)
    }

    fn pinned_ids(&self) -> Result<Vec<Uuid>> {
        let mut stmt = self
            .conn
            .prepare("SELECT id FROM collections WHERE is_pinned = 1 ORDER BY created_at, id")?;
        let rows = stmt.query_map([], |row| row.get::<_, String>(0))?;

        let mut ids = Vec::new();
        for row in rows {
            ids.push(parse_uuid(&row?, "pinned collection")?);
        }
        Ok(ids)
    }

    fn append_member(&self, id: &Uuid, entry_id: &Uuid) -> Result<Collection> {
        if self.touch_collection(id)? == 0 {
            return Err(ListError::CollectionNotFound(*id));
        }

        self.conn.execute(
            r#"
            INSERT INTO collection_entries (collection_id, entry_id, position)
            VALUES (
                ?1,
                ?2,
                (SELECT COALESCE(MAX(position), 0) + 1 FROM collection_entries WHERE collection_id = ?1)
            )
            "#,
            (id.to_string(), entry_id.to_string()),
        )?;

        self.require_collection(id)
    }

    fn remove_member(&self, id: &Uuid, entry_id: &Uuid) -> Result<bool> {
        self.stamp()?;

        let removed = self.conn.execute(
            "DELETE FROM collection_entries WHERE collection_id = ? AND entry_id = ?",
            (id.to_string(), entry_id.to_string()),
        )?;

        if removed == 0 {
            return Ok(false);
        }

        self.touch_collection(id)?;
        Ok(true)
    }

    fn delete_collection(&self, id: &Uuid) -> Result<()> {
        self.stamp()?;

        self.conn.execute(
            "DELETE FROM collection_entries WHERE collection_id = ?",
            [id.to_string()],
        )?;

        let deleted = self
            .conn
            .execute("DELETE FROM collections WHERE id = ?", [id.to_string()])?;

        if deleted == 0 {
            return Err(ListError::CollectionNotFound(*id));
        }
        Ok(())
    }
}
