//! Property tables and entity-type discovery for Strix.
//!
//! This crate sits between the columnar property data of a graph and the
//! entity-type registry:
//!
//! - [`PropertyTable`]: an Arrow schema plus its `RecordBatch` chunks
//! - [`build_entity_type_manager`]: discovers atomic and compound entity types
//!   from the indicator columns of a table
//! - [`assign_entity_type_ids`]: stamps every row with its entity type
//!
//! # Usage
//!
//! ```rust,ignore
//! use common_config::RegistryConfig;
//! use strix_storage::{PropertyTable, assign_entity_type_ids, build_entity_type_manager};
//!
//! let table = PropertyTable::from_batch(batch);
//! let config = RegistryConfig::default();
//!
//! let (manager, type_properties) = build_entity_type_manager(&table, &config)?;
//! let row_types = assign_entity_type_ids(&table, &type_properties, &config)?;
//! ```

mod assign;
mod discovery;
mod indicator;
mod table;

#[cfg(any(test, feature = "test-utils"))]
mod test_utils;

pub use assign::assign_entity_type_ids;
pub use discovery::{ColumnSet, TypeProperties, build_entity_type_manager};
pub use indicator::{IndicatorColumn, is_indicator_type};
pub use table::PropertyTable;

#[cfg(any(test, feature = "test-utils"))]
pub use test_utils::PropertyTableBuilder;
