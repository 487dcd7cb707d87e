//! Chore catalog.

pub mod model;

pub use model::{Chore, ChoreInput};

use crate::error::{CoreError, CoreResult};
use chorechart_db::queries::chores::{self as queries, ChoreDeletion};
use chorechart_db::{DbError, DbPool};
use tracing::{info, warn};

fn not_found(id: i64) -> impl FnOnce(DbError) -> CoreError {
    move |e| match e {
        DbError::NotFound(_) => CoreError::ChoreNotFound(id),
        e => CoreError::Database(e),
    }
}

/// List all chores ordered by name.
pub fn list_chores(pool: &DbPool) -> CoreResult<Vec<Chore>> {
    let rows = queries::list_chores(pool)?;
    Ok(rows.into_iter().map(Chore::from_row).collect())
}

/// Get a chore by ID.
pub fn get_chore(pool: &DbPool, id: i64) -> CoreResult<Chore> {
    let row = queries::get_chore(pool, id).map_err(not_found(id))?;
    Ok(Chore::from_row(row))
}

/// Add a chore to the catalog.
pub fn create_chore(pool: &DbPool, input: &ChoreInput) -> CoreResult<Chore> {
    input.validate()?;

    let id = queries::insert_chore(
        pool,
        input.name.trim(),
        input.value,
        input.description.as_deref(),
        input.category.as_deref(),
    )?;
    info!(chore_id = id, name = %input.name, value = input.value, "Chore created");

    get_chore(pool, id)
}

/// Overwrite a chore. Existing claims keep the value they were recorded with.
pub fn update_chore(pool: &DbPool, id: i64, input: &ChoreInput) -> CoreResult<Chore> {
    input.validate()?;

    queries::update_chore(
        pool,
        id,
        input.name.trim(),
        input.value,
        input.description.as_deref(),
        input.category.as_deref(),
    )
    .map_err(not_found(id))?;
    info!(chore_id = id, value = input.value, "Chore updated");

    get_chore(pool, id)
}

/// Remove a chore that no claim references.
pub fn delete_chore(pool: &DbPool, id: i64) -> CoreResult<()> {
    match queries::delete_unclaimed_chore(pool, id)? {
        ChoreDeletion::Deleted => {
            info!(chore_id = id, "Chore deleted");
            Ok(())
        }
        ChoreDeletion::Missing => Err(CoreError::ChoreNotFound(id)),
        ChoreDeletion::Claimed(claims) => {
            warn!(chore_id = id, claims, "Refused to delete claimed chore");
            Err(CoreError::conflict(format!(
                "cannot delete: historic claims exist ({} claim{} reference this chore)",
                claims,
                if claims == 1 { "" } else { "s" }
            )))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::claim::{self, NewClaim};
    use chorechart_db::init_memory_pool;

    #[test]
    fn test_create_and_list() {
        let pool = init_memory_pool().unwrap();
        let mop = create_chore(&pool, &ChoreInput::new("Mop", 4).with_category("floors")).unwrap();
        create_chore(&pool, &ChoreInput::new("Dust", 1).with_description("shelves")).unwrap();

        assert_eq!(mop.category.as_deref(), Some("floors"));
        let names: Vec<String> = list_chores(&pool).unwrap().into_iter().map(|c| c.name).collect();
        assert_eq!(names, vec!["Dust", "Mop"]);
    }

    #[test]
    fn test_create_rejects_invalid_value() {
        let pool = init_memory_pool().unwrap();
        let err = create_chore(&pool, &ChoreInput::new("Mop", 0)).unwrap_err();
        assert!(matches!(err, CoreError::Validation(_)));
        assert!(list_chores(&pool).unwrap().is_empty());
    }

    #[test]
    fn test_update_overwrites_all_fields() {
        let pool = init_memory_pool().unwrap();
        let chore = create_chore(
            &pool,
            &ChoreInput::new("Mop", 4).with_description("kitchen").with_category("floors"),
        )
        .unwrap();

        let updated = update_chore(&pool, chore.id, &ChoreInput::new("Mop floors", 5)).unwrap();
        assert_eq!(updated.name, "Mop floors");
        assert_eq!(updated.value, 5);
        assert_eq!(updated.description, None);
        assert_eq!(updated.category, None);
    }

    #[test]
    fn test_update_missing_chore() {
        let pool = init_memory_pool().unwrap();
        let err = update_chore(&pool, 12, &ChoreInput::new("Mop", 4)).unwrap_err();
        assert!(matches!(err, CoreError::ChoreNotFound(12)));
    }

    #[test]
    fn test_delete_unclaimed_chore() {
        let pool = init_memory_pool().unwrap();
        let chore = create_chore(&pool, &ChoreInput::new("Mop", 4)).unwrap();

        delete_chore(&pool, chore.id).unwrap();
        assert!(list_chores(&pool).unwrap().iter().all(|c| c.id != chore.id));
        assert!(matches!(delete_chore(&pool, chore.id), Err(CoreError::ChoreNotFound(_))));
    }

    #[test]
    fn test_delete_claimed_chore_conflicts() {
        let pool = init_memory_pool().unwrap();
        let chore = create_chore(&pool, &ChoreInput::new("Mop", 4)).unwrap();
        let claim = claim::create_claim(&pool, &NewClaim::new(chore.id, "ana")).unwrap();

        let err = delete_chore(&pool, chore.id).unwrap_err();
        assert!(matches!(err, CoreError::Conflict(_)));
        assert!(err.to_string().contains("cannot delete: historic claims exist"));
        assert!(list_chores(&pool).unwrap().iter().any(|c| c.id == chore.id));
        assert_eq!(claim::get_claim(&pool, claim.id).unwrap().value, 4);

        claim::delete_claim(&pool, claim.id).unwrap();
        delete_chore(&pool, chore.id).unwrap();
    }
}
