//! Cache Module
//!
//! Scalar storage and retrieval under generated keys.

mod scalar;

#[cfg(test)]
mod property_tests;

// Re-export public types
pub use scalar::{ScalarCache, StoreValue};

// == Public Constants ==
/// Name under which the instrumented `store` operation is counted and logged
pub const STORE_OPERATION: &str = "Cache.store";
