//! Entity-type registry.
//!
//! Every node or edge of a property graph carries one small integer, its
//! entity type. An entity type is either *atomic* (backed by a single
//! indicator property and identified by a name) or *compound* (a set of two
//! or more atomic types that co-occur on the same element). Both kinds share
//! one ID space; the kind of an ID is inferred from whether it has a name.
//!
//! - [`EntityTypeSet`] is the bitset used for member sets and the inverted index
//! - [`EntityTypeManager`] owns the name and member-set maps
//! - [`EntityTypeManagerSnapshot`] is the persistence contract

mod diff;
mod id;
mod manager;
mod set;
mod snapshot;

pub use id::{
    ENTITY_TYPE_ID_BITS, EntityTypeId, EntityTypeKind, INVALID_ENTITY_TYPE, MAX_ENTITY_TYPES,
    UNKNOWN_ENTITY_TYPE,
};
pub use manager::EntityTypeManager;
pub use set::{EntityTypeSet, EntityTypeSetIter};
pub use snapshot::{EntityTypeManagerSnapshot, SnapshotEntry};
