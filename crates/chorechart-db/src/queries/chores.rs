//! Chore catalog queries.

use crate::pool::{DbError, DbPool, DbResult};
use rusqlite::{params, OptionalExtension, Row};

/// Chore row from database.
#[derive(Debug, Clone)]
pub struct ChoreRow {
    pub id: i64,
    pub name: String,
    pub value: i64,
    pub description: Option<String>,
    pub category: Option<String>,
}

/// Outcome of a guarded chore deletion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChoreDeletion {
    Deleted,
    Missing,
    /// Claims still reference the chore; nothing was removed.
    Claimed(i64),
}

const SELECT_CHORE: &str = "SELECT id, name, value, description, category FROM chores";

fn map_chore(row: &Row<'_>) -> rusqlite::Result<ChoreRow> {
    Ok(ChoreRow {
        id: row.get(0)?,
        name: row.get(1)?,
        value: row.get(2)?,
        description: row.get(3)?,
        category: row.get(4)?,
    })
}

/// Insert a chore and return its id.
pub fn insert_chore(
    pool: &DbPool,
    name: &str,
    value: i64,
    description: Option<&str>,
    category: Option<&str>,
) -> DbResult<i64> {
    pool.with_conn(|conn| {
        conn.execute(
            "INSERT INTO chores (name, value, description, category) VALUES (?1, ?2, ?3, ?4)",
            params![name, value, description, category],
        )?;
        Ok(conn.last_insert_rowid())
    })
}

/// Get a chore by ID.
pub fn get_chore(pool: &DbPool, id: i64) -> DbResult<ChoreRow> {
    pool.with_conn(|conn| {
        conn.query_row(&format!("{} WHERE id = ?1", SELECT_CHORE), params![id], map_chore)
            .map_err(|e| match e {
                rusqlite::Error::QueryReturnedNoRows => DbError::NotFound(format!("Chore: {}", id)),
                e => DbError::Sqlite(e),
            })
    })
}

/// List all chores ordered by name.
pub fn list_chores(pool: &DbPool) -> DbResult<Vec<ChoreRow>> {
    pool.with_conn(|conn| {
        let mut stmt = conn.prepare(&format!("{} ORDER BY name, id", SELECT_CHORE))?;
        let rows = stmt.query_map([], map_chore)?;
        rows.collect::<Result<Vec<_>, _>>().map_err(DbError::from)
    })
}

/// Overwrite every mutable field of a chore.
pub fn update_chore(
    pool: &DbPool,
    id: i64,
    name: &str,
    value: i64,
    description: Option<&str>,
    category: Option<&str>,
) -> DbResult<()> {
    pool.with_conn(|conn| {
        let changed = conn.execute(
            "UPDATE chores SET name = ?1, value = ?2, description = ?3, category = ?4 WHERE id = ?5",
            params![name, value, description, category, id],
        )?;
        if changed == 0 {
            return Err(DbError::NotFound(format!("Chore: {}", id)));
        }
        Ok(())
    })
}

/// Delete a chore unless claims reference it. The check and the delete share a transaction.
pub fn delete_unclaimed_chore(pool: &DbPool, id: i64) -> DbResult<ChoreDeletion> {
    pool.transaction(|tx| {
        let exists = tx
            .query_row("SELECT 1 FROM chores WHERE id = ?1", params![id], |_| Ok(()))
            .optional()?
            .is_some();
        if !exists {
            return Ok(ChoreDeletion::Missing);
        }

        let claims: i64 = tx.query_row(
            "SELECT COUNT(*) FROM claims WHERE chore_id = ?1",
            params![id],
            |row| row.get(0),
        )?;
        if claims > 0 {
            return Ok(ChoreDeletion::Claimed(claims));
        }

        tx.execute("DELETE FROM chores WHERE id = ?1", params![id])?;
        Ok(ChoreDeletion::Deleted)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::init_memory_pool;

    #[test]
    fn test_list_orders_by_name_case_sensitive() {
        let pool = init_memory_pool().unwrap();
        insert_chore(&pool, "vacuum", 2, None, None).unwrap();
        insert_chore(&pool, "Laundry", 4, Some("fold too"), Some("weekly")).unwrap();
        insert_chore(&pool, "Dishes", 3, None, None).unwrap();

        let names: Vec<String> = list_chores(&pool).unwrap().into_iter().map(|c| c.name).collect();
        assert_eq!(names, vec!["Dishes", "Laundry", "vacuum"]);
    }

    #[test]
    fn test_update_missing_chore() {
        let pool = init_memory_pool().unwrap();
        let err = update_chore(&pool, 99, "Ghost", 1, None, None).unwrap_err();
        assert!(matches!(err, DbError::NotFound(_)));
    }

    #[test]
    fn test_value_check_constraint() {
        let pool = init_memory_pool().unwrap();
        assert!(insert_chore(&pool, "Free", 0, None, None).is_err());
    }

    #[test]
    fn test_delete_unclaimed_chore() {
        let pool = init_memory_pool().unwrap();
        let id = insert_chore(&pool, "Dishes", 3, None, None).unwrap();

        assert_eq!(delete_unclaimed_chore(&pool, id).unwrap(), ChoreDeletion::Deleted);
        assert_eq!(delete_unclaimed_chore(&pool, id).unwrap(), ChoreDeletion::Missing);
        assert!(matches!(get_chore(&pool, id), Err(DbError::NotFound(_))));
    }
}
