//! Error types and result aliases for Strix.
//!
//! Every registry operation returns a [`StrixResult`]; none of them panic
//! for expected conditions.

mod error;

pub use error::{StrixError, StrixResult};
