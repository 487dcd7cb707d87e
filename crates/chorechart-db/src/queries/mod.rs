//! Database query implementations.

pub mod chores;
pub mod claims;
