//! Entity-type discovery over a property table.
//!
//! Every indicator column becomes an atomic entity type, and every distinct
//! combination of two or more indicator columns that are set on the same row
//! becomes a compound entity type.

use std::collections::{BTreeMap, BTreeSet};

use log::debug;

use common_config::RegistryConfig;
use common_error::{StrixError, StrixResult, ensure};
use strix_core::{EntityTypeId, EntityTypeManager, EntityTypeSet, MAX_ENTITY_TYPES};

use crate::indicator::{IndicatorColumn, is_indicator_type};
use crate::table::PropertyTable;

/// Set of column indices, ordered so that discovery is deterministic.
pub type ColumnSet = BTreeSet<usize>;

/// Map from the indicator columns set on a row to that row's entity type.
///
/// Produced by [`build_entity_type_manager`] for the topology builder: once
/// the set of active indicator columns of a row is known, its entity type is
/// a single lookup.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TypeProperties {
    by_columns: BTreeMap<ColumnSet, EntityTypeId>,
}

impl TypeProperties {
    /// Create an empty mapping.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the entity type of a column set.
    pub fn insert(&mut self, columns: ColumnSet, id: EntityTypeId) {
        self.by_columns.insert(columns, id);
    }

    /// Entity type of a column set.
    pub fn get(&self, columns: &ColumnSet) -> Option<EntityTypeId> {
        self.by_columns.get(columns).copied()
    }

    /// Number of recorded column sets.
    pub fn len(&self) -> usize {
        self.by_columns.len()
    }

    /// Check if empty.
    pub fn is_empty(&self) -> bool {
        self.by_columns.is_empty()
    }

    /// Iterate over the column sets in order.
    pub fn iter(&self) -> impl Iterator<Item = (&ColumnSet, EntityTypeId)> {
        self.by_columns.iter().map(|(cols, &id)| (cols, id))
    }
}

/// Indicator columns of `table`, in schema order, with their data.
///
/// Fails with `NotImplemented` if any column of the table is split across
/// more than one chunk.
pub(crate) fn indicator_columns<'a>(
    table: &'a PropertyTable,
    config: &RegistryConfig,
) -> StrixResult<Vec<(usize, Option<IndicatorColumn<'a>>)>> {
    let mut indicators = Vec::new();
    for (index, field) in table.schema().fields().iter().enumerate() {
        let array = table.column(index)?;
        if !is_indicator_type(field.data_type(), config.indicator_types) {
            continue;
        }
        let view = array.map(IndicatorColumn::try_new).transpose()?;
        indicators.push((index, view));
    }
    Ok(indicators)
}

/// Visit the indicator columns set on each row, in column order.
pub(crate) fn for_each_row_columns(
    indicators: &[(usize, Option<IndicatorColumn<'_>>)],
    num_rows: usize,
    mut visit: impl FnMut(&[usize]) -> StrixResult<()>,
) -> StrixResult<()> {
    let mut active = Vec::with_capacity(indicators.len());
    for row in 0..num_rows {
        active.clear();
        for (index, view) in indicators {
            if view.as_ref().is_some_and(|v| v.is_set(row)) {
                active.push(*index);
            }
        }
        visit(&active)?;
    }
    Ok(())
}

/// Build an entity type registry from the indicator columns of `table`.
///
/// Atomic types are registered in schema order, then one compound type per
/// distinct multi-column combination in lexicographic order of column
/// indices, so identical tables always produce identical registries.
///
/// Fails with `NotImplemented` before registering anything if the table
/// needs more entity types than the ID space holds.
pub fn build_entity_type_manager(
    table: &PropertyTable,
    config: &RegistryConfig,
) -> StrixResult<(EntityTypeManager, TypeProperties)> {
    let indicators = indicator_columns(table, config)?;

    let mut combinations: BTreeSet<ColumnSet> = BTreeSet::new();
    for_each_row_columns(&indicators, table.num_rows(), |active| {
        if active.len() >= 2 {
            combinations.insert(active.iter().copied().collect());
        }
        Ok(())
    })?;

    let needed = indicators.len() + combinations.len();
    ensure!(
        needed <= MAX_ENTITY_TYPES,
        NotImplemented: "property table needs {needed} entity types ({} indicator columns, {} combinations), limit is {MAX_ENTITY_TYPES}",
        indicators.len(),
        combinations.len()
    );

    let mut manager = EntityTypeManager::new();
    let mut type_properties = TypeProperties::new();
    let mut column_to_atomic = BTreeMap::new();

    for (index, _) in &indicators {
        let id = manager.add_atomic_entity_type(table.column_name(*index)?)?;
        column_to_atomic.insert(*index, id);
        type_properties.insert(ColumnSet::from([*index]), id);
    }

    for columns in combinations {
        let members = columns
            .iter()
            .map(|index| {
                column_to_atomic.get(index).copied().ok_or_else(|| {
                    StrixError::internal(format!("column {index} has no atomic entity type"))
                })
            })
            .collect::<StrixResult<EntityTypeSet>>()?;
        let id = manager.add_non_atomic_entity_type(&members)?;
        type_properties.insert(columns, id);
    }

    let count = manager.num_entity_types();
    ensure!(
        count <= MAX_ENTITY_TYPES,
        NotImplemented: "number of entity types {count} exceeds the limit {MAX_ENTITY_TYPES}"
    );

    if config.verify_invariants {
        manager.verify_invariants()?;
    }

    debug!(
        "discovered {} atomic and {} compound entity types over {} rows",
        manager.num_atomic_types(),
        count - manager.num_atomic_types(),
        table.num_rows()
    );

    Ok((manager, type_properties))
}
