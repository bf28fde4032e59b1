//! Fixed-capacity bitset over the entity type ID space.

use std::fmt;
use std::ops::{BitAnd, BitOr};

use serde::{Deserialize, Serialize};

use super::id::{ENTITY_TYPE_ID_BITS, EntityTypeId};

const WORD_BITS: usize = u64::BITS as usize;
const NUM_WORDS: usize = (1 << ENTITY_TYPE_ID_BITS) / WORD_BITS;

/// A set of entity type IDs.
///
/// Capacity equals the whole ID space, so any [`EntityTypeId`] can be stored.
/// The set is `Copy` and ordered, which lets it be stored by value in vectors
/// and used as a key in ordered maps.
#[derive(Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "Vec<EntityTypeId>", into = "Vec<EntityTypeId>")]
pub struct EntityTypeSet {
    words: [u64; NUM_WORDS],
}

impl EntityTypeSet {
    /// Number of IDs the set can hold.
    pub const CAPACITY: usize = NUM_WORDS * WORD_BITS;

    /// Create an empty set.
    pub const fn new() -> Self {
        Self {
            words: [0; NUM_WORDS],
        }
    }

    /// Create a set holding a single ID.
    pub fn singleton(id: EntityTypeId) -> Self {
        let mut set = Self::new();
        set.insert(id);
        set
    }

    const fn position(id: EntityTypeId) -> (usize, u64) {
        let bit = id as usize;
        (bit / WORD_BITS, 1 << (bit % WORD_BITS))
    }

    /// Add an ID. Returns `true` if it was not already present.
    pub fn insert(&mut self, id: EntityTypeId) -> bool {
        let (word, mask) = Self::position(id);
        let absent = self.words[word] & mask == 0;
        self.words[word] |= mask;
        absent
    }

    /// Remove an ID. Returns `true` if it was present.
    pub fn remove(&mut self, id: EntityTypeId) -> bool {
        let (word, mask) = Self::position(id);
        let present = self.words[word] & mask != 0;
        self.words[word] &= !mask;
        present
    }

    /// Check whether an ID is in the set.
    pub const fn contains(&self, id: EntityTypeId) -> bool {
        let (word, mask) = Self::position(id);
        self.words[word] & mask != 0
    }

    /// Number of IDs in the set.
    pub fn len(&self) -> usize {
        self.words.iter().map(|w| w.count_ones() as usize).sum()
    }

    /// Check if the set is empty.
    pub fn is_empty(&self) -> bool {
        self.words.iter().all(|&w| w == 0)
    }

    /// Check whether every ID of `self` is also in `other`.
    pub fn is_subset(&self, other: &Self) -> bool {
        self.words
            .iter()
            .zip(other.words.iter())
            .all(|(a, b)| a & !b == 0)
    }

    /// Check whether every ID of `other` is also in `self`.
    pub fn is_superset(&self, other: &Self) -> bool {
        other.is_subset(self)
    }

    /// IDs present in either set.
    #[must_use]
    pub fn union(&self, other: &Self) -> Self {
        let mut words = self.words;
        for (w, o) in words.iter_mut().zip(other.words.iter()) {
            *w |= o;
        }
        Self { words }
    }

    /// IDs present in both sets.
    #[must_use]
    pub fn intersection(&self, other: &Self) -> Self {
        let mut words = self.words;
        for (w, o) in words.iter_mut().zip(other.words.iter()) {
            *w &= o;
        }
        Self { words }
    }

    /// Iterate over the IDs in ascending order.
    pub const fn iter(&self) -> EntityTypeSetIter {
        EntityTypeSetIter {
            words: self.words,
            word: 0,
        }
    }
}

/// Ascending iterator over the IDs of an [`EntityTypeSet`].
#[derive(Debug, Clone)]
pub struct EntityTypeSetIter {
    words: [u64; NUM_WORDS],
    word: usize,
}

impl Iterator for EntityTypeSetIter {
    type Item = EntityTypeId;

    fn next(&mut self) -> Option<Self::Item> {
        while self.word < NUM_WORDS {
            let bits = self.words[self.word];
            if bits == 0 {
                self.word += 1;
                continue;
            }
            let offset = bits.trailing_zeros() as usize;
            // clear lowest set bit
            self.words[self.word] = bits & (bits - 1);
            #[allow(clippy::cast_possible_truncation)]
            return Some((self.word * WORD_BITS + offset) as EntityTypeId);
        }
        None
    }
}

impl IntoIterator for EntityTypeSet {
    type Item = EntityTypeId;
    type IntoIter = EntityTypeSetIter;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl IntoIterator for &EntityTypeSet {
    type Item = EntityTypeId;
    type IntoIter = EntityTypeSetIter;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl FromIterator<EntityTypeId> for EntityTypeSet {
    fn from_iter<I: IntoIterator<Item = EntityTypeId>>(iter: I) -> Self {
        let mut set = Self::new();
        for id in iter {
            set.insert(id);
        }
        set
    }
}

impl Extend<EntityTypeId> for EntityTypeSet {
    fn extend<I: IntoIterator<Item = EntityTypeId>>(&mut self, iter: I) {
        for id in iter {
            self.insert(id);
        }
    }
}

impl From<Vec<EntityTypeId>> for EntityTypeSet {
    fn from(ids: Vec<EntityTypeId>) -> Self {
        ids.into_iter().collect()
    }
}

impl From<EntityTypeSet> for Vec<EntityTypeId> {
    fn from(set: EntityTypeSet) -> Self {
        set.iter().collect()
    }
}

impl BitOr for EntityTypeSet {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self::Output {
        self.union(&rhs)
    }
}

impl BitAnd for EntityTypeSet {
    type Output = Self;

    fn bitand(self, rhs: Self) -> Self::Output {
        self.intersection(&rhs)
    }
}

impl fmt::Display for EntityTypeSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{")?;
        for (i, id) in self.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{id}")?;
        }
        write!(f, "}}")
    }
}

impl fmt::Debug for EntityTypeSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "EntityTypeSet{self}")
    }
}
