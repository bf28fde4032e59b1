//! Property-based tests for the entity type registry.
