//! Row types for database queries.

use chrono::{DateTime, SecondsFormat, Utc};
use uuid::Uuid;

use crate::error::{ListError, Result};
use crate::storage::types::{Collection, Entry};

pub(super) const ENTRY_COLUMNS: &str =
    "id, collection_id, name, description, completed, created_at, updated_at";

pub(super) const COLLECTION_COLUMNS: &str =
    "id, name, description, is_pinned, last_updated, created_at, updated_at";

/// Raw row data from the entries table, before parsing into domain types.
#[derive(Debug)]
pub(super) struct EntryRow {
    pub id: String,
    pub collection_id: String,
    pub name: String,
    pub description: Option<String>,
    pub completed: bool,
    pub created_at: String,
    pub updated_at: String,
}

impl EntryRow {
    /// Read a row selected with [`ENTRY_COLUMNS`].
    pub fn from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get(0)?,
            collection_id: row.get(1)?,
            name: row.get(2)?,
            description: row.get(3)?,
            completed: row.get(4)?,
            created_at: row.get(5)?,
            updated_at: row.get(6)?,
        })
    }
}

impl TryFrom<EntryRow> for Entry {
    type Error = ListError;

    fn try_from(row: EntryRow) -> Result<Self> {
        Ok(Entry {
            id: parse_uuid(&row.id, "entry id")?,
            collection_id: parse_uuid(&row.collection_id, "entry collection_id")?,
            name: row.name,
            description: row.description,
            completed: row.completed,
            created_at: parse_timestamp(&row.created_at, "entry created_at")?,
            updated_at: parse_timestamp(&row.updated_at, "entry updated_at")?,
        })
    }
}

/// Raw row data from the collections table. Membership is loaded separately.
#[derive(Debug)]
pub(super) struct CollectionRow {
    pub id: String,
    pub name: String,
    pub description: Option<String>,
    pub is_pinned: bool,
    pub last_updated: String,
    pub created_at: String,
    pub updated_at: String,
}

impl CollectionRow {
    /// Read a row selected with [`COLLECTION_COLUMNS`].
    pub fn from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get(0)?,
            name: row.get(1)?,
            description: row.get(2)?,
            is_pinned: row.get(3)?,
            last_updated: row.get(4)?,
            created_at: row.get(5)?,
            updated_at: row.get(6)?,
        })
    }

    pub fn into_collection(self, entry_ids: Vec<Uuid>) -> Result<Collection> {
        Ok(Collection {
            id: parse_uuid(&self.id, "collection id")?,
            name: self.name,
            description: self.description,
            is_pinned: self.is_pinned,
            entry_ids,
            last_updated: parse_timestamp(&self.last_updated, "collection last_updated")?,
            created_at: parse_timestamp(&self.created_at, "collection created_at")?,
            updated_at: parse_timestamp(&self.updated_at, "collection updated_at")?,
        })
    }
}

pub(super) fn parse_uuid(value: &str, field: &str) -> Result<Uuid> {
    Uuid::parse_str(value)
        .map_err(|e| ListError::Storage(format!("Invalid {} UUID: {}", field, e)))
}

pub(super) fn parse_timestamp(value: &str, field: &str) -> Result<DateTime<Utc>> {
    Ok(DateTime::parse_from_rfc3339(value)
        .map_err(|e| ListError::Storage(format!("Invalid {} timestamp: {}", field, e)))?
        .with_timezone(&Utc))
}

/// Fixed-width RFC 3339 so stored timestamps sort lexically in time order.
pub(super) fn format_timestamp(value: &DateTime<Utc>) -> String {
    value.to_rfc3339_opts(SecondsFormat::Micros, true)
}
