//! Integrity report: a full scan of both stores against the cross-record
//! invariants.

use std::collections::{HashMap, HashSet};
use std::fmt;

use serde::Serialize;
use uuid::Uuid;

use crate::error::{ListError, Result};
use crate::storage::types::{Collection, Entry};

/// One detected violation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Violation {
    /// Entry points at a collection that does not exist
    OrphanEntry { entry: Uuid, collection: Uuid },

    /// Entry's owner exists but does not list it
    MissingMember { entry: Uuid, collection: Uuid },

    /// Membership list names an entry that does not exist
    DanglingMember { collection: Uuid, entry: Uuid },

    /// Membership list names an entry owned by another collection
    ForeignMember {
        collection: Uuid,
        entry: Uuid,
        owner: Uuid,
    },

    /// Membership list names the same entry more than once
    DuplicateMember { collection: Uuid, entry: Uuid },

    /// More than one collection is pinned
    MultiplePinned { collections: Vec<Uuid> },
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Violation::OrphanEntry { entry, collection } => {
                write!(f, "entry {} belongs to missing collection {}", entry, collection)
            }
            Violation::MissingMember { entry, collection } => write!(
                f,
                "entry {} is not listed by its collection {}",
                entry, collection
            ),
            Violation::DanglingMember { collection, entry } => write!(
                f,
                "collection {} lists missing entry {}",
                collection, entry
            ),
            Violation::ForeignMember {
                collection,
                entry,
                owner,
            } => write!(
                f,
                "collection {} lists entry {} owned by collection {}",
                collection, entry, owner
            ),
            Violation::DuplicateMember { collection, entry } => write!(
                f,
                "collection {} lists entry {} more than once",
                collection, entry
            ),
            Violation::MultiplePinned { collections } => {
                write!(f, "{} collections are pinned: ", collections.len())?;
                let ids: Vec<String> = collections.iter().map(Uuid::to_string).collect();
                write!(f, "{}", ids.join(", "))
            }
        }
    }
}

/// Result of a full integrity scan.
#[derive(Debug, Clone, Default, Serialize)]
pub struct IntegrityReport {
    pub collections: usize,
    pub entries: usize,
    pub violations: Vec<Violation>,
}

impl IntegrityReport {
    pub(super) fn build(collections: &[Collection], entries: &[Entry]) -> Self {
        let mut violations = Vec::new();

        let entries_by_id: HashMap<Uuid, &Entry> = entries.iter().map(|e| (e.id, e)).collect();
        let collection_ids: HashSet<Uuid> = collections.iter().map(|c| c.id).collect();
        let mut listed: HashSet<(Uuid, Uuid)> = HashSet::new();

        for collection in collections {
            let mut seen = HashSet::new();
            for entry_id in &collection.entry_ids {
                if !seen.insert(*entry_id) {
                    violations.push(Violation::DuplicateMember {
                        collection: collection.id,
                        entry: *entry_id,
                    });
                    continue;
                }
                listed.insert((collection.id, *entry_id));

                match entries_by_id.get(entry_id) {
                    None => violations.push(Violation::DanglingMember {
                        collection: collection.id,
                        entry: *entry_id,
                    }),
                    Some(entry) if entry.collection_id != collection.id => {
                        violations.push(Violation::ForeignMember {
                            collection: collection.id,
                            entry: *entry_id,
                            owner: entry.collection_id,
                        })
                    }
                    Some(_) => {}
                }
            }
        }

        for entry in entries {
            if !collection_ids.contains(&entry.collection_id) {
                violations.push(Violation::OrphanEntry {
                    entry: entry.id,
                    collection: entry.collection_id,
                });
            } else if !listed.contains(&(entry.collection_id, entry.id)) {
                violations.push(Violation::MissingMember {
                    entry: entry.id,
                    collection: entry.collection_id,
                });
            }
        }

        let pinned: Vec<Uuid> = collections
            .iter()
            .filter(|c| c.is_pinned)
            .map(|c| c.id)
            .collect();
        if pinned.len() > 1 {
            violations.push(Violation::MultiplePinned {
                collections: pinned,
            });
        }

        Self {
            collections: collections.len(),
            entries: entries.len(),
            violations,
        }
    }

    pub fn is_clean(&self) -> bool {
        self.violations.is_empty()
    }

    /// Turn a dirty report into an `IntegrityFault`.
    pub fn into_result(self) -> Result<Self> {
        if self.is_clean() {
            return Ok(self);
        }
        let detail = self
            .violations
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join("; ");
        Err(ListError::IntegrityFault {
            operation: "check_integrity",
            detail,
        })
    }
}
