//! Human-readable differences between two registries.

use std::fmt::Write;

use super::id::EntityTypeId;
use super::manager::EntityTypeManager;
use super::set::EntityTypeSet;

impl EntityTypeManager {
    /// Describe every difference between `self` and `other`.
    ///
    /// Returns an empty string when the registries are equal. Used to check
    /// that independently built registries agree.
    pub fn report_diff(&self, other: &Self) -> String {
        let mut out = String::new();

        if self.num_atomic_types() != other.num_atomic_types() {
            let _ = writeln!(
                out,
                "atomic type count differs: {} vs {}",
                self.num_atomic_types(),
                other.num_atomic_types()
            );
        }
        if self.num_entity_types() != other.num_entity_types() {
            let _ = writeln!(
                out,
                "entity type count differs: {} vs {}",
                self.num_entity_types(),
                other.num_entity_types()
            );
        }

        for id in self.atomic_entity_type_ids().iter() {
            let Some(name) = self.get_atomic_type_name(id) else {
                continue;
            };
            match other.get_entity_type_id(name) {
                Ok(other_id) if other_id != id => {
                    let _ = writeln!(out, "atomic type '{name}' has ID {id} vs {other_id}");
                }
                Ok(_) => {}
                Err(_) => {
                    let _ = writeln!(out, "atomic type '{name}' only on the left");
                }
            }
        }
        for name in other.atomic_type_names() {
            if !self.has_atomic_type(name) {
                let _ = writeln!(out, "atomic type '{name}' only on the right");
            }
        }

        diff_rows(&mut out, "members", self.member_sets(), other.member_sets(), |id| {
            self.describe(id)
        });
        diff_rows(
            &mut out,
            "supertypes",
            self.containing_sets(),
            other.containing_sets(),
            |id| self.describe(id),
        );

        out
    }
}

fn diff_rows(
    out: &mut String,
    what: &str,
    left: &[EntityTypeSet],
    right: &[EntityTypeSet],
    describe: impl Fn(EntityTypeId) -> String,
) {
    let len = left.len().max(right.len());
    for pos in 0..len {
        let Ok(id) = EntityTypeId::try_from(pos) else {
            break;
        };
        match (left.get(pos), right.get(pos)) {
            (Some(l), Some(r)) if l != r => {
                let _ = writeln!(out, "{what} of entity type {id} differ: {l} vs {r}");
            }
            (Some(l), None) => {
                let _ = writeln!(
                    out,
                    "entity type {id} ({}) only on the left, {what} {l}",
                    describe(id)
                );
            }
            (None, Some(r)) => {
                let _ = writeln!(out, "entity type {id} only on the right, {what} {r}");
            }
            _ => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_equal_registries_have_no_diff() {
        let mut a = EntityTypeManager::new();
        a.get_or_add_non_atomic_entity_type_from_names(["Person", "Student"])
            .unwrap();
        let b = a.clone();

        assert!(a.report_diff(&b).is_empty());
        assert_eq!(a, b);
    }

    #[test]
    fn test_diff_reports_names_and_ids() {
        let mut a = EntityTypeManager::new();
        a.add_atomic_entity_type("Person").unwrap();
        a.add_atomic_entity_type("Student").unwrap();

        let mut b = EntityTypeManager::new();
        b.add_atomic_entity_type("Student").unwrap();
        b.add_atomic_entity_type("Person").unwrap();
        b.add_atomic_entity_type("Teacher").unwrap();

        let diff = a.report_diff(&b);
        assert!(diff.contains("atomic type count differs: 2 vs 3"));
        assert!(diff.contains("atomic type 'Person' has ID 0 vs 1"));
        assert!(diff.contains("atomic type 'Teacher' only on the right"));
        assert!(diff.contains("entity type 2 only on the right"));
    }

    #[test]
    fn test_diff_reports_member_sets() {
        let mut a = EntityTypeManager::new();
        a.get_or_add_entity_type_ids(["A", "B", "C"]).unwrap();
        a.add_non_atomic_entity_type(&[0, 1].into_iter().collect())
            .unwrap();

        let mut b = EntityTypeManager::new();
        b.get_or_add_entity_type_ids(["A", "B", "C"]).unwrap();
        b.add_non_atomic_entity_type(&[1, 2].into_iter().collect())
            .unwrap();

        let diff = a.report_diff(&b);
        assert!(diff.contains("members of entity type 3 differ: {0, 1} vs {1, 2}"));
        assert!(diff.contains("supertypes of entity type 0 differ"));
        assert_ne!(a, b);
    }
}
