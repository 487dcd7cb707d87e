//! Chorechart Core Library
//!
//! Domain models and business rules: the chore catalog, the claim ledger and
//! the weekly tally.

pub mod chore;
pub mod claim;
pub mod config;
pub mod error;
pub mod input;
pub mod tally;

pub use config::Config;
pub use error::{CoreError, CoreResult};
