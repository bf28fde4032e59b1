//! The entity type manager.

use std::collections::{BTreeSet, HashMap};
use std::fmt;

use common_error::{StrixError, StrixResult, ensure, invalid_arg_err, not_found_err};
use log::trace;

use super::id::{EntityTypeId, EntityTypeKind, MAX_ENTITY_TYPES, UNKNOWN_ENTITY_TYPE};
use super::set::EntityTypeSet;

/// Registry of the entity types of one property graph.
///
/// The manager keeps four maps mutually consistent:
///
/// - atomic type name to ID, and its exact inverse
/// - ID to member set, for every registered type; an atomic type's member set
///   is the singleton holding its own ID
/// - ID to containing set (the inverted index); for an atomic type this is the
///   set of every type it is a member of, itself included, and it is empty for
///   compound types
///
/// IDs are allocated sequentially. Construction is single-threaded; once
/// populated the manager is only read, and all query methods take `&self`.
///
/// # Example
///
/// ```rust
/// use strix_core::EntityTypeManager;
///
/// let mut manager = EntityTypeManager::new();
/// let person = manager.add_atomic_entity_type("Person").unwrap();
/// let student = manager.add_atomic_entity_type("Student").unwrap();
///
/// let both = manager
///     .get_or_add_non_atomic_entity_type(&[person, student].into_iter().collect())
///     .unwrap();
///
/// assert!(manager.is_subtype_of(person, both));
/// assert_eq!(manager.num_entity_types(), 3);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EntityTypeManager {
    atomic_name_to_id: HashMap<String, EntityTypeId>,
    atomic_id_to_name: HashMap<EntityTypeId, String>,
    id_to_members: Vec<EntityTypeSet>,
    atomic_id_to_containing: Vec<EntityTypeSet>,
}

impl EntityTypeManager {
    /// Create an empty manager.
    pub fn new() -> Self {
        Self::default()
    }

    // ========================================================================
    // Queries
    // ========================================================================

    /// Number of atomic entity types.
    pub fn num_atomic_types(&self) -> usize {
        self.atomic_id_to_name.len()
    }

    /// Number of entity types, atomic and compound, excluding the sentinels.
    pub fn num_entity_types(&self) -> usize {
        self.id_to_members.len()
    }

    /// Check if `name` is a registered atomic type.
    pub fn has_atomic_type(&self, name: &str) -> bool {
        self.atomic_name_to_id.contains_key(name)
    }

    /// Check if `id` names a registered type.
    pub fn has_entity_type(&self, id: EntityTypeId) -> bool {
        usize::from(id) < self.id_to_members.len()
    }

    /// Check if `id` names an atomic type.
    pub fn is_atomic_entity_type(&self, id: EntityTypeId) -> bool {
        self.atomic_id_to_name.contains_key(&id)
    }

    /// Kind of a registered type, `None` for unregistered IDs and sentinels.
    pub fn entity_type_kind(&self, id: EntityTypeId) -> Option<EntityTypeKind> {
        if self.is_atomic_entity_type(id) {
            Some(EntityTypeKind::Atomic)
        } else if self.has_entity_type(id) {
            Some(EntityTypeKind::Compound)
        } else {
            None
        }
    }

    /// ID of the atomic type called `name`.
    pub fn get_entity_type_id(&self, name: &str) -> StrixResult<EntityTypeId> {
        match self.atomic_name_to_id.get(name) {
            Some(&id) => Ok(id),
            None => not_found_err!("atomic entity type '{name}' is not registered"),
        }
    }

    /// Name of the atomic type `id`, `None` if `id` is not atomic.
    pub fn get_atomic_type_name(&self, id: EntityTypeId) -> Option<&str> {
        self.atomic_id_to_name.get(&id).map(String::as_str)
    }

    /// Atomic members of `id`.
    ///
    /// A singleton for atomic types; empty for sentinels and unregistered IDs.
    pub fn get_atomic_subtypes(&self, id: EntityTypeId) -> EntityTypeSet {
        self.id_to_members
            .get(usize::from(id))
            .copied()
            .unwrap_or_default()
    }

    /// Every type that has the atomic type `atomic_id` as a member, itself included.
    ///
    /// Empty for compound types and unregistered IDs.
    pub fn get_supertypes(&self, atomic_id: EntityTypeId) -> EntityTypeSet {
        self.atomic_id_to_containing
            .get(usize::from(atomic_id))
            .copied()
            .unwrap_or_default()
    }

    /// IDs of all atomic types.
    pub fn atomic_entity_type_ids(&self) -> EntityTypeSet {
        self.atomic_id_to_name.keys().copied().collect()
    }

    /// Names of all atomic types, ordered by ID.
    pub fn atomic_type_names(&self) -> Vec<&str> {
        self.atomic_entity_type_ids()
            .iter()
            .filter_map(|id| self.get_atomic_type_name(id))
            .collect()
    }

    /// Resolve `id` to the names of its atomic members.
    pub fn entity_type_to_type_name_set(&self, id: EntityTypeId) -> StrixResult<BTreeSet<String>> {
        if id == UNKNOWN_ENTITY_TYPE {
            invalid_arg_err!("cannot resolve the unknown entity type to type names");
        }
        if !self.has_entity_type(id) {
            invalid_arg_err!(
                "entity type {id} is out of range ({} types registered)",
                self.num_entity_types()
            );
        }

        self.get_atomic_subtypes(id)
            .iter()
            .map(|member| {
                self.get_atomic_type_name(member)
                    .map(str::to_string)
                    .ok_or_else(|| {
                        StrixError::internal(format!(
                            "member {member} of entity type {id} is not an atomic type"
                        ))
                    })
            })
            .collect()
    }

    /// True iff every atomic member of `sub` is a member of `sup`.
    ///
    /// Unregistered IDs are subtypes of nothing.
    pub fn is_subtype_of(&self, sub: EntityTypeId, sup: EntityTypeId) -> bool {
        if !self.has_entity_type(sub) || !self.has_entity_type(sup) {
            return false;
        }
        let sub_members = &self.id_to_members[usize::from(sub)];
        let sup_members = &self.id_to_members[usize::from(sup)];
        sub_members.is_subset(sup_members)
    }

    /// ID of the compound type whose member set is exactly `members`.
    pub fn get_non_atomic_entity_type(&self, members: &EntityTypeSet) -> StrixResult<EntityTypeId> {
        match self.find_by_members(members) {
            Some(id) if !self.is_atomic_entity_type(id) => Ok(id),
            _ => not_found_err!("no compound entity type with members {members}"),
        }
    }

    // Linear scan over every registered type.
    fn find_by_members(&self, members: &EntityTypeSet) -> Option<EntityTypeId> {
        self.id_to_members
            .iter()
            .position(|m| m == members)
            .and_then(|pos| EntityTypeId::try_from(pos).ok())
    }

    // ========================================================================
    // Mutation
    // ========================================================================

    fn next_entity_type_id(&self) -> StrixResult<EntityTypeId> {
        let count = self.num_entity_types();
        ensure!(
            count < MAX_ENTITY_TYPES,
            NotImplemented: "cannot register another entity type: {count} types registered, limit is {MAX_ENTITY_TYPES}"
        );
        EntityTypeId::try_from(count)
            .map_err(|_| StrixError::internal(format!("entity type count {count} overflows ID")))
    }

    /// Register a new atomic type called `name`.
    pub fn add_atomic_entity_type(&mut self, name: impl Into<String>) -> StrixResult<EntityTypeId> {
        let name = name.into();
        if self.has_atomic_type(&name) {
            return Err(StrixError::already_exists(format!(
                "atomic entity type '{name}' is already registered"
            )));
        }
        let id = self.next_entity_type_id()?;

        self.atomic_name_to_id.insert(name.clone(), id);
        self.atomic_id_to_name.insert(id, name);
        self.id_to_members.push(EntityTypeSet::singleton(id));
        self.atomic_id_to_containing.push(EntityTypeSet::singleton(id));

        trace!("registered atomic entity type {id}");
        Ok(id)
    }

    /// Register a new compound type with exactly the atomic members `members`.
    ///
    /// Every member must be a registered atomic type. The caller guarantees no
    /// type with the same member set exists; this is only checked in debug
    /// builds. Prefer
    /// [`get_or_add_non_atomic_entity_type`](Self::get_or_add_non_atomic_entity_type).
    pub fn add_non_atomic_entity_type(&mut self, members: &EntityTypeSet) -> StrixResult<EntityTypeId> {
        if members.is_empty() {
            invalid_arg_err!("a compound entity type needs at least one member");
        }
        if let Some(member) = members.iter().find(|&m| !self.is_atomic_entity_type(m)) {
            invalid_arg_err!("member {member} of {members} is not an atomic entity type");
        }
        debug_assert!(
            self.find_by_members(members).is_none(),
            "entity type with members {members} is already registered"
        );

        let id = self.next_entity_type_id()?;
        self.id_to_members.push(*members);
        self.atomic_id_to_containing.push(EntityTypeSet::new());
        for member in members {
            if let Some(containing) = self.atomic_id_to_containing.get_mut(usize::from(member)) {
                containing.insert(id);
            }
        }

        trace!("registered compound entity type {id} with members {members}");
        Ok(id)
    }

    /// Return the type whose member set is `members`, registering a compound
    /// type if none exists.
    ///
    /// A singleton member set resolves to the matching atomic type.
    pub fn get_or_add_non_atomic_entity_type(
        &mut self,
        members: &EntityTypeSet,
    ) -> StrixResult<EntityTypeId> {
        match self.find_by_members(members) {
            Some(id) => Ok(id),
            None => self.add_non_atomic_entity_type(members),
        }
    }

    /// Return the ID of atomic type `name`, registering it if needed.
    pub fn get_or_add_entity_type_id(&mut self, name: &str) -> StrixResult<EntityTypeId> {
        match self.atomic_name_to_id.get(name) {
            Some(&id) => Ok(id),
            None => self.add_atomic_entity_type(name),
        }
    }

    /// Resolve each name to an atomic ID, registering unknown names.
    pub fn get_or_add_entity_type_ids<I, S>(&mut self, names: I) -> StrixResult<EntityTypeSet>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut ids = EntityTypeSet::new();
        for name in names {
            ids.insert(self.get_or_add_entity_type_id(name.as_ref())?);
        }
        Ok(ids)
    }

    /// Return the type made of the atomic types `names`, registering the
    /// atomic types and the compound type as needed.
    pub fn get_or_add_non_atomic_entity_type_from_names<I, S>(
        &mut self,
        names: I,
    ) -> StrixResult<EntityTypeId>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let members = self.get_or_add_entity_type_ids(names)?;
        self.get_or_add_non_atomic_entity_type(&members)
    }

    // ========================================================================
    // Verification
    // ========================================================================

    /// Check every registry invariant.
    ///
    /// Linear in the number of registered types for most checks and quadratic
    /// for duplicate detection.
    pub fn verify_invariants(&self) -> StrixResult<()> {
        let count = self.num_entity_types();
        ensure!(
            count <= MAX_ENTITY_TYPES,
            InternalError: "{count} entity types registered, limit is {MAX_ENTITY_TYPES}"
        );
        ensure!(
            self.atomic_id_to_containing.len() == count,
            InternalError: "inverted index has {} rows for {count} entity types",
            self.atomic_id_to_containing.len()
        );
        ensure!(
            self.atomic_name_to_id.len() == self.atomic_id_to_name.len(),
            InternalError: "name map has {} entries, ID map has {}",
            self.atomic_name_to_id.len(),
            self.atomic_id_to_name.len()
        );

        for (name, &id) in &self.atomic_name_to_id {
            ensure!(
                self.get_atomic_type_name(id) == Some(name.as_str()),
                InternalError: "atomic name '{name}' maps to {id}, which does not map back"
            );
            ensure!(
                self.get_atomic_subtypes(id) == EntityTypeSet::singleton(id),
                InternalError: "atomic entity type {id} has members {}",
                self.get_atomic_subtypes(id)
            );
        }

        for (pos, members) in self.id_to_members.iter().enumerate() {
            let id = EntityTypeId::try_from(pos)
                .map_err(|_| StrixError::internal(format!("entity type index {pos} overflows ID")))?;
            ensure!(
                !members.is_empty(),
                InternalError: "entity type {id} has no members"
            );
            for member in members {
                ensure!(
                    self.is_atomic_entity_type(member),
                    InternalError: "member {member} of entity type {id} is not atomic"
                );
                ensure!(
                    self.get_supertypes(member).contains(id),
                    InternalError: "inverted index of {member} is missing entity type {id}"
                );
            }
            if let Some(dup) = self.id_to_members[..pos].iter().position(|m| m == members) {
                return Err(StrixError::internal(format!(
                    "entity types {dup} and {id} share members {members}"
                )));
            }
        }

        for (pos, containing) in self.atomic_id_to_containing.iter().enumerate() {
            for container in containing {
                ensure!(
                    self.id_to_members
                        .get(usize::from(container))
                        .is_some_and(|m| m.iter().any(|a| usize::from(a) == pos)),
                    InternalError: "inverted index of {pos} lists {container}, which does not contain it"
                );
            }
        }

        Ok(())
    }

    pub(super) fn member_sets(&self) -> &[EntityTypeSet] {
        &self.id_to_members
    }

    pub(super) fn containing_sets(&self) -> &[EntityTypeSet] {
        &self.atomic_id_to_containing
    }

    /// Atomic name of `id`, or its member names for compound types.
    pub(super) fn describe(&self, id: EntityTypeId) -> String {
        match self.get_atomic_type_name(id) {
            Some(name) => name.to_string(),
            None => {
                let names: Vec<_> = self
                    .get_atomic_subtypes(id)
                    .iter()
                    .map(|m| self.get_atomic_type_name(m).unwrap_or("?"))
                    .collect();
                format!("{{{}}}", names.join(", "))
            }
        }
    }
}

impl fmt::Display for EntityTypeManager {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "EntityTypeManager: {} atomic, {} total",
            self.num_atomic_types(),
            self.num_entity_types()
        )?;
        for pos in 0..self.id_to_members.len() {
            let Ok(id) = EntityTypeId::try_from(pos) else {
                break;
            };
            let kind = self
                .entity_type_kind(id)
                .unwrap_or(EntityTypeKind::Compound);
            writeln!(f, "  {id}: {kind} {}", self.describe(id))?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn set(ids: &[EntityTypeId]) -> EntityTypeSet {
        ids.iter().copied().collect()
    }

    fn person_student() -> (EntityTypeManager, EntityTypeId, EntityTypeId, EntityTypeId) {
        let mut manager = EntityTypeManager::new();
        let person = manager.add_atomic_entity_type("Person").unwrap();
        let student = manager.add_atomic_entity_type("Student").unwrap();
        let both = manager
            .add_non_atomic_entity_type(&set(&[person, student]))
            .unwrap();
        (manager, person, student, both)
    }

    #[test]
    fn test_empty_manager() {
        let manager = EntityTypeManager::new();
        assert_eq!(manager.num_atomic_types(), 0);
        assert_eq!(manager.num_entity_types(), 0);
        assert!(!manager.has_entity_type(0));
        assert!(manager.verify_invariants().is_ok());
    }

    #[test]
    fn test_add_atomic_assigns_sequential_ids() {
        let mut manager = EntityTypeManager::new();
        assert_eq!(manager.add_atomic_entity_type("Person").unwrap(), 0);
        assert_eq!(manager.add_atomic_entity_type("Student").unwrap(), 1);

        assert!(manager.has_atomic_type("Person"));
        assert_eq!(manager.get_entity_type_id("Student").unwrap(), 1);
        assert_eq!(manager.get_atomic_type_name(0), Some("Person"));
        assert_eq!(manager.get_atomic_subtypes(1), EntityTypeSet::singleton(1));
        assert_eq!(manager.get_supertypes(1), EntityTypeSet::singleton(1));
        assert_eq!(manager.entity_type_kind(0), Some(EntityTypeKind::Atomic));
    }

    #[test]
    fn test_add_atomic_duplicate_fails() {
        let mut manager = EntityTypeManager::new();
        manager.add_atomic_entity_type("Person").unwrap();

        let err = manager.add_atomic_entity_type("Person").unwrap_err();
        assert!(matches!(err, StrixError::AlreadyExists(_)));
        assert_eq!(manager.num_entity_types(), 1);
    }

    #[test]
    fn test_get_entity_type_id_not_found() {
        let manager = EntityTypeManager::new();
        let err = manager.get_entity_type_id("Ghost").unwrap_err();
        assert!(matches!(err, StrixError::NotFound(_)));
        assert!(err.to_string().contains("Ghost"));
    }

    #[test]
    fn test_compound_updates_inverted_index() {
        let (manager, person, student, both) = person_student();

        assert_eq!(both, 2);
        assert_eq!(manager.entity_type_kind(both), Some(EntityTypeKind::Compound));
        assert_eq!(manager.get_atomic_type_name(both), None);
        assert_eq!(manager.get_atomic_subtypes(both), set(&[person, student]));
        assert_eq!(manager.get_supertypes(person), set(&[person, both]));
        assert_eq!(manager.get_supertypes(student), set(&[student, both]));
        assert!(manager.get_supertypes(both).is_empty());
        assert_eq!(manager.num_atomic_types(), 2);
        assert_eq!(manager.num_entity_types(), 3);
        assert!(manager.verify_invariants().is_ok());
    }

    #[test]
    fn test_add_non_atomic_rejects_empty_set() {
        let mut manager = EntityTypeManager::new();
        let err = manager
            .add_non_atomic_entity_type(&EntityTypeSet::new())
            .unwrap_err();
        assert!(matches!(err, StrixError::InvalidArgument(_)));
    }

    #[test]
    fn test_add_non_atomic_rejects_non_atomic_members() {
        let (mut manager, person, _, both) = person_student();

        let err = manager
            .get_or_add_non_atomic_entity_type(&set(&[person, both]))
            .unwrap_err();
        assert!(matches!(err, StrixError::InvalidArgument(_)));
        assert!(err.to_string().contains(&both.to_string()));

        let err = manager
            .add_non_atomic_entity_type(&set(&[person, 17]))
            .unwrap_err();
        assert!(matches!(err, StrixError::InvalidArgument(_)));

        assert_eq!(manager.num_entity_types(), 3);
        assert!(manager.get_supertypes(both).is_empty());
        assert!(manager.verify_invariants().is_ok());
    }

    #[test]
    fn test_get_or_add_non_atomic_is_idempotent() {
        let (mut manager, person, student, both) = person_student();

        let again = manager
            .get_or_add_non_atomic_entity_type(&set(&[person, student]))
            .unwrap();
        assert_eq!(again, both);
        assert_eq!(manager.num_entity_types(), 3);

        // A singleton member set resolves to the atomic type itself.
        let single = manager
            .get_or_add_non_atomic_entity_type(&set(&[student]))
            .unwrap();
        assert_eq!(single, student);
        assert_eq!(manager.num_entity_types(), 3);
    }

    #[test]
    fn test_get_non_atomic() {
        let (manager, person, student, both) = person_student();

        assert_eq!(
            manager
                .get_non_atomic_entity_type(&set(&[person, student]))
                .unwrap(),
            both
        );
        let err = manager
            .get_non_atomic_entity_type(&set(&[person]))
            .unwrap_err();
        assert!(matches!(err, StrixError::NotFound(_)));
    }

    #[test]
    fn test_get_or_add_entity_type_id() {
        let mut manager = EntityTypeManager::new();
        let a = manager.get_or_add_entity_type_id("Person").unwrap();
        let b = manager.get_or_add_entity_type_id("Person").unwrap();
        assert_eq!(a, b);
        assert_eq!(manager.num_atomic_types(), 1);
    }

    #[test]
    fn test_compound_from_names() {
        let mut manager = EntityTypeManager::new();
        let id = manager
            .get_or_add_non_atomic_entity_type_from_names(["Person", "Student"])
            .unwrap();
        assert_eq!(id, 2);
        assert_eq!(
            manager.entity_type_to_type_name_set(id).unwrap(),
            BTreeSet::from(["Person".to_string(), "Student".to_string()])
        );

        let same = manager
            .get_or_add_non_atomic_entity_type_from_names(["Student", "Person"])
            .unwrap();
        assert_eq!(same, id);
    }

    #[test]
    fn test_type_name_set_errors() {
        let (manager, ..) = person_student();

        let err = manager
            .entity_type_to_type_name_set(UNKNOWN_ENTITY_TYPE)
            .unwrap_err();
        assert!(matches!(err, StrixError::InvalidArgument(_)));

        let err = manager.entity_type_to_type_name_set(3).unwrap_err();
        assert!(matches!(err, StrixError::InvalidArgument(_)));
    }

    #[test]
    fn test_is_subtype_of() {
        let mut manager = EntityTypeManager::new();
        let ids = manager
            .get_or_add_entity_type_ids(["A", "B", "C"])
            .unwrap();
        let ab = manager
            .add_non_atomic_entity_type(&set(&[0, 1]))
            .unwrap();
        let abc = manager.add_non_atomic_entity_type(&ids).unwrap();

        assert!(manager.is_subtype_of(0, ab));
        assert!(manager.is_subtype_of(ab, abc));
        assert!(manager.is_subtype_of(ab, ab));
        assert!(!manager.is_subtype_of(abc, ab));
        assert!(!manager.is_subtype_of(2, ab));
        assert!(!manager.is_subtype_of(UNKNOWN_ENTITY_TYPE, abc));
    }

    #[test]
    fn test_capacity_exhaustion() {
        let mut manager = EntityTypeManager::new();
        for i in 0..MAX_ENTITY_TYPES {
            manager.add_atomic_entity_type(format!("T{i}")).unwrap();
        }
        assert_eq!(manager.num_entity_types(), MAX_ENTITY_TYPES);

        let err = manager.add_atomic_entity_type("Overflow").unwrap_err();
        assert!(matches!(err, StrixError::NotImplemented(_)));
        assert!(err.to_string().contains(&MAX_ENTITY_TYPES.to_string()));

        let err = manager
            .add_non_atomic_entity_type(&set(&[0, 1]))
            .unwrap_err();
        assert!(matches!(err, StrixError::NotImplemented(_)));
        assert!(manager.verify_invariants().is_ok());
    }

    #[test]
    fn test_atomic_type_names_in_id_order() {
        let mut manager = EntityTypeManager::new();
        manager.add_atomic_entity_type("Zebra").unwrap();
        manager.add_atomic_entity_type("Apple").unwrap();
        manager
            .add_non_atomic_entity_type(&set(&[0, 1]))
            .unwrap();
        manager.add_atomic_entity_type("Mango").unwrap();

        assert_eq!(manager.atomic_type_names(), vec!["Zebra", "Apple", "Mango"]);
        assert_eq!(manager.atomic_entity_type_ids(), set(&[0, 1, 3]));
    }

    #[test]
    fn test_display_lists_types() {
        let (manager, ..) = person_student();
        let text = manager.to_string();
        assert!(text.contains("2 atomic, 3 total"));
        assert!(text.contains("0: Atomic Person"));
        assert!(text.contains("2: Compound {Person, Student}"));
    }

    #[test]
    fn test_equality() {
        let (a, ..) = person_student();
        let (b, ..) = person_student();
        assert_eq!(a, b);

        let mut c = b.clone();
        c.add_atomic_entity_type("Teacher").unwrap();
        assert_ne!(a, c);
    }
}
