//! Claim ledger.

pub mod model;

pub use model::{Claim, ClaimUpdate, NewClaim};

use std::ops::Bound;

use crate::error::{CoreError, CoreResult};
use crate::tally::WindowBoundary;
use chorechart_db::queries::claims::{self as queries, ClaimUpdateRow, NewClaimRow};
use chorechart_db::{DbError, DbPool};
use chrono::{DateTime, Utc};
use tracing::info;

fn not_found(id: i64) -> impl FnOnce(DbError) -> CoreError {
    move |e| match e {
        DbError::NotFound(_) => CoreError::ClaimNotFound(id),
        e => CoreError::Database(e),
    }
}

/// Record a claim. The chore's current value is copied onto the claim.
pub fn create_claim(pool: &DbPool, claim: &NewClaim) -> CoreResult<Claim> {
    claim.validate()?;

    let now = Utc::now();
    let id = queries::insert_claim_snapshot(
        pool,
        &NewClaimRow {
            chore_id: claim.chore_id,
            created_by: &claim.created_by,
            completed_by: claim.completed_by.trim(),
            completed_at: claim.completed_at.unwrap_or(now),
            note: claim.note.as_deref(),
            created_at: now,
        },
    )
    .map_err(|e| match e {
        DbError::NotFound(_) => CoreError::ChoreNotFound(claim.chore_id),
        e => CoreError::Database(e),
    })?;

    let created = get_claim(pool, id)?;
    info!(
        claim_id = id,
        chore_id = created.chore_id,
        completed_by = %created.completed_by,
        value = created.value,
        "Claim recorded"
    );
    Ok(created)
}

/// Get a claim by ID.
pub fn get_claim(pool: &DbPool, id: i64) -> CoreResult<Claim> {
    let row = queries::get_claim(pool, id).map_err(not_found(id))?;
    Ok(Claim::from_row(row))
}

/// Overwrite a claim, including its value. No window check on `completed_at`.
pub fn update_claim(pool: &DbPool, id: i64, update: &ClaimUpdate) -> CoreResult<Claim> {
    update.validate()?;
    get_claim(pool, id)?;
    crate::chore::get_chore(pool, update.chore_id)?;

    queries::update_claim(
        pool,
        id,
        &ClaimUpdateRow {
            chore_id: update.chore_id,
            value: update.value,
            completed_by: update.completed_by.trim(),
            completed_at: update.completed_at,
            note: update.note.as_deref(),
            updated_at: Utc::now(),
        },
    )
    .map_err(not_found(id))?;
    info!(claim_id = id, value = update.value, "Claim updated");

    get_claim(pool, id)
}

/// Permanently delete a claim.
pub fn delete_claim(pool: &DbPool, id: i64) -> CoreResult<()> {
    queries::delete_claim(pool, id).map_err(not_found(id))?;
    info!(claim_id = id, "Claim deleted");
    Ok(())
}

/// Claims completed since `cutoff`, newest completion first.
pub fn list_claims_since(
    pool: &DbPool,
    cutoff: &DateTime<Utc>,
    boundary: WindowBoundary,
) -> CoreResult<Vec<Claim>> {
    let rows = queries::list_claims_since(pool, boundary.lower_bound(cutoff))?;
    Ok(rows.into_iter().map(Claim::from_row).collect())
}

/// Every claim in the ledger, newest completion first.
pub fn list_claims(pool: &DbPool) -> CoreResult<Vec<Claim>> {
    let rows = queries::list_claims_since(pool, Bound::Unbounded)?;
    Ok(rows.into_iter().map(Claim::from_row).collect())
}
