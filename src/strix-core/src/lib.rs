//! Core data model for the Strix entity-type registry.
//!
//! This crate provides:
//! - `EntityTypeId` and its reserved sentinels
//! - `EntityTypeSet`, the fixed-capacity bitset over the ID space
//! - `EntityTypeManager`, the registry mapping atomic type names and
//!   compound type member sets to IDs

pub mod entity_type;

mod proptest_utils;

// Re-export commonly used types
pub use entity_type::{
    ENTITY_TYPE_ID_BITS, EntityTypeId, EntityTypeKind, EntityTypeManager,
    EntityTypeManagerSnapshot, EntityTypeSet, INVALID_ENTITY_TYPE, MAX_ENTITY_TYPES, SnapshotEntry,
    UNKNOWN_ENTITY_TYPE,
};
