//! Entity type identifiers.

use serde::{Deserialize, Serialize};

/// Identifier of an atomic or compound entity type.
///
/// Stored inline with every graph element, so it is kept to a single byte.
pub type EntityTypeId = u8;

/// Width of an [`EntityTypeId`] in bits.
pub const ENTITY_TYPE_ID_BITS: usize = EntityTypeId::BITS as usize;

/// Marks "not a real type"; also the upper bound of the ID space.
pub const INVALID_ENTITY_TYPE: EntityTypeId = EntityTypeId::MAX;

/// Assigned to elements that carry no type at all.
pub const UNKNOWN_ENTITY_TYPE: EntityTypeId = INVALID_ENTITY_TYPE - 1;

/// Maximum number of registered types (atomic plus compound).
///
/// Valid IDs are `0..MAX_ENTITY_TYPES`; the two sentinels sit above them.
pub const MAX_ENTITY_TYPES: usize = UNKNOWN_ENTITY_TYPE as usize;

/// Kind of a registered entity type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EntityTypeKind {
    /// Backed by a single indicator property; has a name.
    Atomic,
    /// A combination of two or more atomic types; has no name of its own.
    Compound,
}

impl std::fmt::Display for EntityTypeKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Atomic => write!(f, "Atomic"),
            Self::Compound => write!(f, "Compound"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sentinels_at_top_of_range() {
        assert_eq!(INVALID_ENTITY_TYPE, 255);
        assert_eq!(UNKNOWN_ENTITY_TYPE, 254);
        assert_eq!(MAX_ENTITY_TYPES, 254);
        assert_eq!(ENTITY_TYPE_ID_BITS, 8);
    }

    #[test]
    fn test_kind_display() {
        assert_eq!(EntityTypeKind::Atomic.to_string(), "Atomic");
        assert_eq!(EntityTypeKind::Compound.to_string(), "Compound");
    }
}
