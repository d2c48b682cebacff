//! Database repository for personnel.

use crate::db::{
    cascade::{Cascade, CascadeOutcome, PERSONNEL_DELETION},
    errors::Result,
};
use crate::types::PersonnelId;
use sqlx::PgConnection;
use tracing::instrument;

pub struct Personnel<'c> {
    db: &'c mut PgConnection,
}

impl<'c> Personnel<'c> {
    pub fn new(db: &'c mut PgConnection) -> Self {
        Self { db }
    }

    /// Delete a consultant and, when acknowledged, their role assignments and access grants.
    ///
    /// Dependents are counted again here rather than trusting what the form showed earlier.
    #[instrument(skip(self), err)]
    pub async fn delete_with_dependents(&mut self, id: PersonnelId, acknowledged: bool) -> Result<CascadeOutcome> {
        Cascade::new(&mut *self.db).delete(&PERSONNEL_DELETION, id, acknowledged).await
    }
}

#[cfg(all(test, feature = "db-tests"))]
mod tests {
    use super::*;
    use crate::db::errors::DbError;
    use crate::test_utils::seed_reference_data;
    use sqlx::PgPool;

    #[sqlx::test]
    async fn person_with_roles_needs_acknowledgment(pool: PgPool) {
        let seed = seed_reference_data(&pool).await;
        let project_id = seed.insert_project(&pool, "Acme-2025").await;
        let person = seed.personnel[0];
        seed.insert_mapping(&pool, project_id, person, 1, 100.0).await;
        seed.insert_access(&pool, project_id, person).await;

        let mut tx = pool.begin().await.unwrap();
        let outcome = Personnel::new(&mut tx).delete_with_dependents(person, false).await.unwrap();
        let CascadeOutcome::PendingAcknowledgment(counts) = outcome else {
            panic!("expected pending acknowledgment");
        };
        assert_eq!(counts.rows_in("projects_detail"), 1);
        assert_eq!(counts.rows_in("project_access"), 1);

        let outcome = Personnel::new(&mut tx).delete_with_dependents(person, true).await.unwrap();
        assert!(matches!(outcome, CascadeOutcome::Deleted(ref r) if r.dependents.total() == 2));
        tx.commit().await.unwrap();

        let remaining: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM personnel WHERE personnel_id = $1")
            .bind(person)
            .fetch_one(&pool)
            .await
            .unwrap();
        assert_eq!(remaining, 0);
        // The project itself is untouched
        let projects: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM projects").fetch_one(&pool).await.unwrap();
        assert_eq!(projects, 1);
    }

    #[sqlx::test]
    async fn person_without_roles_is_deleted_directly(pool: PgPool) {
        let seed = seed_reference_data(&pool).await;
        let person = seed.personnel[2];

        let mut conn = pool.acquire().await.unwrap();
        let outcome = Personnel::new(&mut conn).delete_with_dependents(person, false).await.unwrap();
        assert!(matches!(outcome, CascadeOutcome::Deleted(_)));

        let again = Personnel::new(&mut conn).delete_with_dependents(person, false).await;
        assert!(matches!(again, Err(DbError::NotFound)));
    }
}
