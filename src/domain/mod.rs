//! Domain layer types and invariants.

pub mod blocks;
pub mod types;
