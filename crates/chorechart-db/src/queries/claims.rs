//! Claim ledger queries.

use std::ops::Bound;

use crate::pool::{DbError, DbPool, DbResult};
use crate::timestamp;
use chrono::{DateTime, Utc};
use rusqlite::{params, OptionalExtension, Row};

/// Claim row joined with the name of its chore.
#[derive(Debug, Clone)]
pub struct ClaimRow {
    pub id: i64,
    pub chore_id: i64,
    pub chore_name: String,
    pub value: i64,
    pub created_by: String,
    pub completed_by: String,
    pub completed_at: DateTime<Utc>,
    pub note: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Fields of a claim about to be recorded. The value comes from the chore.
#[derive(Debug, Clone)]
pub struct NewClaimRow<'a> {
    pub chore_id: i64,
    pub created_by: &'a str,
    pub completed_by: &'a str,
    pub completed_at: DateTime<Utc>,
    pub note: Option<&'a str>,
    pub created_at: DateTime<Utc>,
}

/// Full replacement of a claim's editable fields.
#[derive(Debug, Clone)]
pub struct ClaimUpdateRow<'a> {
    pub chore_id: i64,
    pub value: i64,
    pub completed_by: &'a str,
    pub completed_at: DateTime<Utc>,
    pub note: Option<&'a str>,
    pub updated_at: DateTime<Utc>,
}

const SELECT_CLAIM: &str = "SELECT cl.id, cl.chore_id, ch.name, cl.value, cl.created_by,
            cl.completed_by, cl.completed_at, cl.note, cl.created_at, cl.updated_at
     FROM claims cl JOIN chores ch ON ch.id = cl.chore_id";

fn map_claim(row: &Row<'_>) -> rusqlite::Result<ClaimRow> {
    Ok(ClaimRow {
        id: row.get(0)?,
        chore_id: row.get(1)?,
        chore_name: row.get(2)?,
        value: row.get(3)?,
        created_by: row.get(4)?,
        completed_by: row.get(5)?,
        completed_at: timestamp::column(row, 6)?,
        note: row.get(7)?,
        created_at: timestamp::column(row, 8)?,
        updated_at: timestamp::column(row, 9)?,
    })
}

/// Record a claim, copying the chore's current value onto it.
///
/// Lookup and insert run in one transaction, so the copied value is the one
/// the chore had at the instant of the insert.
pub fn insert_claim_snapshot(pool: &DbPool, claim: &NewClaimRow<'_>) -> DbResult<i64> {
    pool.transaction(|tx| {
        let value: i64 = tx
            .query_row(
                "SELECT value FROM chores WHERE id = ?1",
                params![claim.chore_id],
                |row| row.get(0),
            )
            .optional()?
            .ok_or_else(|| DbError::NotFound(format!("Chore: {}", claim.chore_id)))?;

        let created_at = timestamp::encode(&claim.created_at);
        tx.execute(
            "INSERT INTO claims (chore_id, value, created_by, completed_by, completed_at, note,
                                 created_at, updated_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?7)",
            params![
                claim.chore_id,
                value,
                claim.created_by,
                claim.completed_by,
                timestamp::encode(&claim.completed_at),
                claim.note,
                created_at,
            ],
        )?;
        Ok(tx.last_insert_rowid())
    })
}

/// Get a claim by ID.
pub fn get_claim(pool: &DbPool, id: i64) -> DbResult<ClaimRow> {
    pool.with_conn(|conn| {
        conn.query_row(&format!("{} WHERE cl.id = ?1", SELECT_CLAIM), params![id], map_claim)
            .map_err(|e| match e {
                rusqlite::Error::QueryReturnedNoRows => DbError::NotFound(format!("Claim: {}", id)),
                e => DbError::Sqlite(e),
            })
    })
}

/// List claims completed after `since`, newest completion first.
///
/// `Included` keeps a claim completed exactly at the cutoff, `Excluded` drops
/// it, `Unbounded` lists the whole ledger.
pub fn list_claims_since(pool: &DbPool, since: Bound<&DateTime<Utc>>) -> DbResult<Vec<ClaimRow>> {
    let (filter, cutoff) = match since {
        Bound::Included(ts) => ("WHERE cl.completed_at >= ?1", Some(timestamp::encode(ts))),
        Bound::Excluded(ts) => ("WHERE cl.completed_at > ?1", Some(timestamp::encode(ts))),
        Bound::Unbounded => ("", None),
    };
    let sql = format!(
        "{} {} ORDER BY cl.completed_at DESC, cl.id DESC",
        SELECT_CLAIM, filter
    );

    pool.with_conn(|conn| {
        let mut stmt = conn.prepare(&sql)?;
        let rows = match &cutoff {
            Some(cutoff) => stmt.query_map(params![cutoff], map_claim)?,
            None => stmt.query_map([], map_claim)?,
        };
        rows.collect::<Result<Vec<_>, _>>().map_err(DbError::from)
    })
}

/// Overwrite every editable field of a claim.
pub fn update_claim(pool: &DbPool, id: i64, claim: &ClaimUpdateRow<'_>) -> DbResult<()> {
    pool.with_conn(|conn| {
        let changed = conn.execute(
            "UPDATE claims
             SET chore_id = ?1, value = ?2, completed_by = ?3, completed_at = ?4, note = ?5,
                 updated_at = ?6
             WHERE id = ?7",
            params![
                claim.chore_id,
                claim.value,
                claim.completed_by,
                timestamp::encode(&claim.completed_at),
                claim.note,
                timestamp::encode(&claim.updated_at),
                id,
            ],
        )?;
        if changed == 0 {
            return Err(DbError::NotFound(format!("Claim: {}", id)));
        }
        Ok(())
    })
}

/// Permanently delete a claim.
pub fn delete_claim(pool: &DbPool, id: i64) -> DbResult<()> {
    pool.with_conn(|conn| {
        let changed = conn.execute("DELETE FROM claims WHERE id = ?1", params![id])?;
        if changed == 0 {
            return Err(DbError::NotFound(format!("Claim: {}", id)));
        }
        Ok(())
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::init_memory_pool;
    use crate::queries::chores;
    use chrono::{Duration, TimeZone};

    fn at(day: u32, hour: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, day, hour, 0, 0).unwrap()
    }

    fn claim(pool: &DbPool, chore_id: i64, who: &str, completed_at: DateTime<Utc>) -> i64 {
        insert_claim_snapshot(
            pool,
            &NewClaimRow {
                chore_id,
                created_by: "",
                completed_by: who,
                completed_at,
                note: None,
                created_at: completed_at,
            },
        )
        .unwrap()
    }

    #[test]
    fn test_insert_copies_chore_value() {
        let pool = init_memory_pool().unwrap();
        let chore = chores::insert_chore(&pool, "Dishes", 3, None, None).unwrap();
        let id = claim(&pool, chore, "ana", at(4, 9));

        let row = get_claim(&pool, id).unwrap();
        assert_eq!(row.value, 3);
        assert_eq!(row.chore_name, "Dishes");
        assert_eq!(row.completed_at, at(4, 9));
        assert_eq!(row.created_by, "");
    }

    #[test]
    fn test_insert_for_missing_chore() {
        let pool = init_memory_pool().unwrap();
        let err = insert_claim_snapshot(
            &pool,
            &NewClaimRow {
                chore_id: 7,
                created_by: "",
                completed_by: "ana",
                completed_at: at(4, 9),
                note: None,
                created_at: at(4, 9),
            },
        )
        .unwrap_err();
        assert!(matches!(err, DbError::NotFound(_)));
    }

    #[test]
    fn test_list_since_bounds_and_order() {
        let pool = init_memory_pool().unwrap();
        let chore = chores::insert_chore(&pool, "Dishes", 3, None, None).unwrap();
        let cutoff = at(5, 12);
        let before = claim(&pool, chore, "ana", cutoff - Duration::seconds(1));
        let exact = claim(&pool, chore, "ben", cutoff);
        let after = claim(&pool, chore, "cy", at(6, 8));

        let included: Vec<i64> = list_claims_since(&pool, Bound::Included(&cutoff))
            .unwrap()
            .into_iter()
            .map(|c| c.id)
            .collect();
        assert_eq!(included, vec![after, exact]);

        let excluded: Vec<i64> = list_claims_since(&pool, Bound::Excluded(&cutoff))
            .unwrap()
            .into_iter()
            .map(|c| c.id)
            .collect();
        assert_eq!(excluded, vec![after]);

        let all = list_claims_since(&pool, Bound::Unbounded).unwrap();
        assert_eq!(all.len(), 3);
        assert_eq!(all[2].id, before);
    }

    #[test]
    fn test_claim_blocks_chore_delete() {
        let pool = init_memory_pool().unwrap();
        let chore = chores::insert_chore(&pool, "Dishes", 3, None, None).unwrap();
        let id = claim(&pool, chore, "ana", at(4, 9));

        assert_eq!(
            chores::delete_unclaimed_chore(&pool, chore).unwrap(),
            chores::ChoreDeletion::Claimed(1)
        );

        delete_claim(&pool, id).unwrap();
        assert_eq!(
            chores::delete_unclaimed_chore(&pool, chore).unwrap(),
            chores::ChoreDeletion::Deleted
        );
    }

    #[test]
    fn test_update_and_delete_missing_claim() {
        let pool = init_memory_pool().unwrap();
        let chore = chores::insert_chore(&pool, "Dishes", 3, None, None).unwrap();
        let update = ClaimUpdateRow {
            chore_id: chore,
            value: 1,
            completed_by: "ana",
            completed_at: at(4, 9),
            note: None,
            updated_at: at(4, 10),
        };

        assert!(matches!(update_claim(&pool, 42, &update), Err(DbError::NotFound(_))));
        assert!(matches!(delete_claim(&pool, 42), Err(DbError::NotFound(_))));
    }
}
