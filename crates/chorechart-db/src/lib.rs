//! Chorechart Database Layer
//!
//! SQLite persistence for the chore catalog and the claim ledger.

pub mod migrations;
pub mod pool;
pub mod queries;
pub mod timestamp;

use std::path::Path;

pub use pool::{DbError, DbPool, DbResult};

/// Open (or create) the database file and bring its schema up to date.
pub fn init_pool(path: impl AsRef<Path>) -> DbResult<DbPool> {
    let path = path.as_ref();
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .map_err(|e| DbError::Migration(format!("cannot create {}: {}", parent.display(), e)))?;
    }

    let pool = DbPool::open(path)?;
    migrations::run_migrations(&pool)?;
    tracing::debug!(path = %path.display(), "Database ready");
    Ok(pool)
}

/// In-memory database with the schema applied. Used by tests across the workspace.
pub fn init_memory_pool() -> DbResult<DbPool> {
    let pool = DbPool::in_memory()?;
    migrations::run_migrations(&pool)?;
    Ok(pool)
}
