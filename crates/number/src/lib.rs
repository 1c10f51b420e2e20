//! Base-unit integer helpers shared by the zap crates.
//!
//! Token amounts are carried as `U256` base units everywhere internally; the
//! functions here are the only place where they become decimals.

pub mod conversions;
pub mod serialization;

pub use conversions::{from_decimal, to_decimal};
