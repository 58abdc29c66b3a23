//! Core data types for storage layer.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{ListError, Result};

/// A single list item, owned by exactly one collection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Entry {
    /// Unique identifier for this entry
    pub id: Uuid,

    /// Owning collection; fixed at creation
    pub collection_id: Uuid,

    pub name: String,

    pub description: Option<String>,

    pub completed: bool,

    /// When this entry was created
    pub created_at: DateTime<Utc>,

    /// Last write to this entry record
    pub updated_at: DateTime<Utc>,
}

/// A named, user-defined group of entries.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Collection {
    /// Unique identifier for this collection
    pub id: Uuid,

    pub name: String,

    pub description: Option<String>,

    /// At most one collection is pinned at a time
    pub is_pinned: bool,

    /// Member entry IDs in insertion order, no duplicates
    pub entry_ids: Vec<Uuid>,

    /// Refreshed on every write to the collection record itself
    pub last_updated: DateTime<Utc>,

    pub created_at: DateTime<Utc>,

    pub updated_at: DateTime<Utc>,
}

/// A collection together with (a view of) its entries.
///
/// `entries` may be filtered for presentation; `collection.entry_ids` always
/// reflects storage.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CollectionView {
    #[serde(flatten)]
    pub collection: Collection,

    pub entries: Vec<Entry>,
}

/// Builder for creating new collections.
#[derive(Debug, Clone)]
pub struct NewCollection {
    pub name: String,
    pub description: Option<String>,
}

impl NewCollection {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: None,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn validate(&self) -> Result<()> {
        validate_name("Collection", &self.name)
    }
}

/// Builder for creating new entries.
///
/// The owning collection is supplied separately by the operation that
/// creates the entry.
#[derive(Debug, Clone)]
pub struct NewEntry {
    pub name: String,
    pub description: Option<String>,
}

impl NewEntry {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: None,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn validate(&self) -> Result<()> {
        validate_name("Entry", &self.name)
    }
}

/// Partial update for a collection record. `None` leaves a field unchanged.
#[derive(Debug, Clone, Default)]
pub struct CollectionPatch {
    pub name: Option<String>,
    pub description: Option<String>,
}

impl CollectionPatch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.description.is_none()
    }

    pub fn validate(&self) -> Result<()> {
        match self.name {
            Some(ref name) => validate_name("Collection", name),
            None => Ok(()),
        }
    }
}

/// Partial update for an entry record. `None` leaves a field unchanged.
///
/// An entry's owning collection is not patchable.
#[derive(Debug, Clone, Default)]
pub struct EntryPatch {
    pub name: Option<String>,
    pub description: Option<String>,
    pub completed: Option<bool>,
}

impl EntryPatch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn completed(mut self, completed: bool) -> Self {
        self.completed = Some(completed);
        self
    }

    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.description.is_none() && self.completed.is_none()
    }

    pub fn validate(&self) -> Result<()> {
        match self.name {
            Some(ref name) => validate_name("Entry", name),
            None => Ok(()),
        }
    }
}

/// Order in which a collection's entries are presented.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EntryOrder {
    /// Membership order (the order entries were added)
    #[default]
    Insertion,
    /// Most recently created first
    Newest,
    /// Oldest first, by creation time
    Oldest,
}

impl EntryOrder {
    pub fn sort(self, entries: &mut [Entry]) {
        match self {
            EntryOrder::Insertion => {}
            EntryOrder::Newest => entries.sort_by(|a, b| b.created_at.cmp(&a.created_at)),
            EntryOrder::Oldest => entries.sort_by(|a, b| a.created_at.cmp(&b.created_at)),
        }
    }
}

impl std::str::FromStr for EntryOrder {
    type Err = ListError;

    fn from_str(value: &str) -> Result<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "insertion" => Ok(EntryOrder::Insertion),
            "newest" => Ok(EntryOrder::Newest),
            "oldest" => Ok(EntryOrder::Oldest),
            other => Err(ListError::Validation(format!(
                "Unknown entry order '{}' (expected insertion, newest or oldest)",
                other
            ))),
        }
    }
}

fn validate_name(kind: &str, name: &str) -> Result<()> {
    if name.trim().is_empty() {
        return Err(ListError::Validation(format!("{} name is required", kind)));
    }
    Ok(())
}
