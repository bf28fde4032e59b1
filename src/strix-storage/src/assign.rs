//! Per-row entity type assignment.

use arrow::array::{UInt8Array, UInt8Builder};

use common_config::RegistryConfig;
use common_error::{StrixError, StrixResult};
use strix_core::UNKNOWN_ENTITY_TYPE;

use crate::discovery::{ColumnSet, TypeProperties, for_each_row_columns, indicator_columns};
use crate::table::PropertyTable;

/// Stamp every row of `table` with its entity type.
///
/// Rows without any indicator set get [`UNKNOWN_ENTITY_TYPE`]. A row whose
/// column combination is missing from `type_properties` fails with
/// `NotFound`, which means the mapping was built from a different table.
pub fn assign_entity_type_ids(
    table: &PropertyTable,
    type_properties: &TypeProperties,
    config: &RegistryConfig,
) -> StrixResult<UInt8Array> {
    let indicators = indicator_columns(table, config)?;
    let mut builder = UInt8Builder::with_capacity(table.num_rows());

    let mut row = 0;
    for_each_row_columns(&indicators, table.num_rows(), |active| {
        if active.is_empty() {
            builder.append_value(UNKNOWN_ENTITY_TYPE);
        } else {
            let columns: ColumnSet = active.iter().copied().collect();
            let id = type_properties.get(&columns).ok_or_else(|| {
                StrixError::not_found(format!(
                    "row {row} sets indicator columns {columns:?}, which have no entity type"
                ))
            })?;
            builder.append_value(id);
        }
        row += 1;
        Ok(())
    })?;

    Ok(builder.finish())
}
