//! Domain types consumed by the catalog derivation pipeline.

pub mod item;
pub mod query;
pub mod types;
