//! Serializable form of an [`EntityTypeManager`].
//!
//! Persistence goes through the public query and mutation API only: a
//! snapshot lists every type in ID order, and restoring replays the
//! registrations so that every type gets its original ID back.

use common_error::{StrixError, StrixResult};
use serde::{Deserialize, Serialize};

use super::id::EntityTypeId;
use super::manager::EntityTypeManager;
use super::set::EntityTypeSet;

/// One registered type in a snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind")]
pub enum SnapshotEntry {
    /// An atomic type and its name.
    Atomic { name: String },
    /// A compound type and its atomic members.
    Compound { members: EntityTypeSet },
}

/// Serializable list of registered entity types, indexed by ID.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntityTypeManagerSnapshot {
    /// Entry `i` describes entity type `i`.
    pub entity_types: Vec<SnapshotEntry>,
}

impl EntityTypeManager {
    /// Capture every registered type in ID order.
    pub fn to_snapshot(&self) -> StrixResult<EntityTypeManagerSnapshot> {
        let mut entity_types = Vec::with_capacity(self.num_entity_types());
        for pos in 0..self.num_entity_types() {
            let id = EntityTypeId::try_from(pos)
                .map_err(|_| StrixError::internal(format!("entity type index {pos} overflows ID")))?;
            let entry = match self.get_atomic_type_name(id) {
                Some(name) => SnapshotEntry::Atomic {
                    name: name.to_string(),
                },
                None => SnapshotEntry::Compound {
                    members: self.get_atomic_subtypes(id),
                },
            };
            entity_types.push(entry);
        }
        Ok(EntityTypeManagerSnapshot { entity_types })
    }

    /// Rebuild a registry from a snapshot.
    ///
    /// Fails if the snapshot would assign a type a different ID than the one
    /// it was captured with, or if it repeats a name or member set.
    pub fn from_snapshot(snapshot: &EntityTypeManagerSnapshot) -> StrixResult<Self> {
        let mut manager = Self::new();
        for (pos, entry) in snapshot.entity_types.iter().enumerate() {
            let id = match entry {
                SnapshotEntry::Atomic { name } => manager.add_atomic_entity_type(name.as_str())?,
                SnapshotEntry::Compound { members } => {
                    for member in members {
                        if !manager.is_atomic_entity_type(member) {
                            return Err(StrixError::invalid_argument(format!(
                                "compound entity type {pos} refers to {member}, which is not an earlier atomic type"
                            )));
                        }
                    }
                    if manager.get_non_atomic_entity_type(members).is_ok() || members.len() < 2 {
                        return Err(StrixError::invalid_argument(format!(
                            "compound entity type {pos} duplicates members {members}"
                        )));
                    }
                    manager.add_non_atomic_entity_type(members)?
                }
            };
            if usize::from(id) != pos {
                return Err(StrixError::internal(format!(
                    "snapshot entry {pos} was restored as entity type {id}"
                )));
            }
        }
        Ok(manager)
    }

    /// Serialize the registry as JSON.
    pub fn to_json(&self) -> StrixResult<String> {
        Ok(serde_json::to_string(&self.to_snapshot()?)?)
    }

    /// Rebuild a registry from JSON produced by [`to_json`](Self::to_json).
    pub fn from_json(json: &str) -> StrixResult<Self> {
        let snapshot: EntityTypeManagerSnapshot = serde_json::from_str(json)?;
        Self::from_snapshot(&snapshot)
    }
}
