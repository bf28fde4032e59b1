//! Configuration management for Strix.
//!
//! Provides the knobs that shape how an entity-type registry is built from a
//! property table.

use serde::{Deserialize, Serialize};

/// Global Strix configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StrixConfig {
    /// Entity-type registry configuration.
    #[serde(default)]
    pub registry: RegistryConfig,
}

/// Physical column types treated as entity-type indicator columns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum IndicatorTypes {
    /// Only `UInt8` columns are indicators.
    #[default]
    UInt8,
    /// Both `Boolean` and `UInt8` columns are indicators.
    BoolOrUInt8,
}

impl IndicatorTypes {
    /// Whether boolean columns count as indicators.
    pub const fn accepts_bool(self) -> bool {
        matches!(self, Self::BoolOrUInt8)
    }
}

/// Entity-type registry configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegistryConfig {
    /// Which column types are classified as type indicators.
    #[serde(default)]
    pub indicator_types: IndicatorTypes,
    /// Run the full registry invariant check after discovery.
    #[serde(default = "default_verify_invariants")]
    pub verify_invariants: bool,
}

const fn default_verify_invariants() -> bool {
    cfg!(debug_assertions)
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self {
            indicator_types: IndicatorTypes::default(),
            verify_invariants: default_verify_invariants(),
        }
    }
}

impl RegistryConfig {
    /// Set the indicator column types.
    #[must_use]
    pub const fn with_indicator_types(mut self, indicator_types: IndicatorTypes) -> Self {
        self.indicator_types = indicator_types;
        self
    }

    /// Enable or disable post-discovery invariant verification.
    #[must_use]
    pub const fn with_verify_invariants(mut self, enable: bool) -> Self {
        self.verify_invariants = enable;
        self
    }
}
