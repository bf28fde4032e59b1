//! Strix - entity-type registry for property graphs
//!
//! Strix turns the per-row indicator columns of a property table into compact
//! entity type IDs that can be stored inline with every node or edge, and
//! answers name, member-set and subtype queries over those IDs.

#![forbid(unsafe_code)]
#![allow(clippy::module_name_repetitions)]

// Re-export member crates
pub use common_config as config;
pub use common_error as error;
pub use strix_core as core;
pub use strix_storage as storage;

/// Strix version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
