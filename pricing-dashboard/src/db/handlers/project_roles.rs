//! Database repository for project role assignments.

use crate::db::{
    errors::{DbError, Result},
    handlers::repository::Repository,
    models::project_roles::{ProjectRoleCreateDBRequest, ProjectRoleDBResponse, ProjectRoleFilter, ProjectRoleUpdateDBRequest},
};
use crate::types::ProjectRoleMappingId;
use sqlx::PgConnection;
use tracing::instrument;

const MAPPING_COLUMNS: &str = "project_role_mapping_id, project_id, role_id, personnel_id, epoch_number, epoch_value, epoch_percentage";

pub struct ProjectRoles<'c> {
    db: &'c mut PgConnection,
}

impl<'c> ProjectRoles<'c> {
    pub fn new(db: &'c mut PgConnection) -> Self {
        Self { db }
    }

    /// Change the epoch of an assignment. Project, role and consultant stay as they are.
    #[instrument(skip(self, request), err)]
    pub async fn update(&mut self, id: ProjectRoleMappingId, request: &ProjectRoleUpdateDBRequest) -> Result<ProjectRoleDBResponse> {
        let updated = sqlx::query_as::<_, ProjectRoleDBResponse>(&format!(
            r#"
            UPDATE projects_detail
            SET epoch_number = $2, epoch_percentage = $3
            WHERE project_role_mapping_id = $1
            RETURNING {MAPPING_COLUMNS}
            "#
        ))
        .bind(id)
        .bind(request.epoch_number)
        .bind(request.epoch_percentage)
        .fetch_optional(&mut *self.db)
        .await?;

        updated.ok_or(DbError::NotFound)
    }
}

#[async_trait::async_trait]
impl<'c> Repository for ProjectRoles<'c> {
    type CreateRequest = ProjectRoleCreateDBRequest;
    type Response = ProjectRoleDBResponse;
    type Id = ProjectRoleMappingId;
    type Filter = ProjectRoleFilter;

    /// No duplicate check: assigning the same role twice yields two rows.
    #[instrument(skip(self, request), fields(project_id = request.project_id, personnel_id = request.personnel_id), err)]
    async fn create(&mut self, request: &Self::CreateRequest) -> Result<Self::Response> {
        let mapping = sqlx::query_as::<_, ProjectRoleDBResponse>(&format!(
            r#"
            INSERT INTO projects_detail (project_id, role_id, personnel_id, epoch_number, epoch_value, epoch_percentage)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING {MAPPING_COLUMNS}
            "#
        ))
        .bind(request.project_id)
        .bind(request.role_id)
        .bind(request.personnel_id)
        .bind(request.epoch_number)
        .bind(request.epoch_value)
        .bind(request.epoch_percentage)
        .fetch_one(&mut *self.db)
        .await?;

        Ok(mapping)
    }

    #[instrument(skip(self), err)]
    async fn get_by_id(&mut self, id: Self::Id) -> Result<Option<Self::Response>> {
        let mapping = sqlx::query_as::<_, ProjectRoleDBResponse>(&format!(
            "SELECT {MAPPING_COLUMNS} FROM projects_detail WHERE project_role_mapping_id = $1"
        ))
        .bind(id)
        .fetch_optional(&mut *self.db)
        .await?;

        Ok(mapping)
    }

    #[instrument(skip(self, filter), err)]
    async fn list(&mut self, filter: &Self::Filter) -> Result<Vec<Self::Response>> {
        let mappings = sqlx::query_as::<_, ProjectRoleDBResponse>(&format!(
            r#"
            SELECT {MAPPING_COLUMNS} FROM projects_detail
            WHERE ($1::BIGINT IS NULL OR project_id = $1)
              AND ($2::BIGINT IS NULL OR personnel_id = $2)
            ORDER BY project_role_mapping_id
            "#
        ))
        .bind(filter.project_id)
        .bind(filter.personnel_id)
        .fetch_all(&mut *self.db)
        .await?;

        Ok(mappings)
    }

    #[instrument(skip(self), err)]
    async fn delete(&mut self, id: Self::Id) -> Result<bool> {
        let result = sqlx::query("DELETE FROM projects_detail WHERE project_role_mapping_id = $1")
            .bind(id)
            .execute(&mut *self.db)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}

#[cfg(all(test, feature = "db-tests"))]
mod tests {
    use super::*;
    use crate::test_utils::seed_reference_data;
    use sqlx::PgPool;

    #[sqlx::test]
    async fn identical_assignments_produce_two_rows(pool: PgPool) {
        let seed = seed_reference_data(&pool).await;
        let project_id = seed.insert_project(&pool, "Acme-2025").await;

        let mut conn = pool.acquire().await.unwrap();
        let mut repo = ProjectRoles::new(&mut conn);
        let request = ProjectRoleCreateDBRequest::new(project_id, seed.roles[0], seed.personnel[0], 1, 100.0);

        let first = repo.create(&request).await.unwrap();
        let second = repo.create(&request).await.unwrap();
        assert_ne!(first.project_role_mapping_id, second.project_role_mapping_id);
        assert_eq!(first.epoch_value, 1);

        let listed = repo
            .list(&ProjectRoleFilter {
                project_id: Some(project_id),
                personnel_id: None,
            })
            .await
            .unwrap();
        assert_eq!(listed.len(), 2);
    }

    #[sqlx::test]
    async fn update_touches_only_epoch_fields(pool: PgPool) {
        let seed = seed_reference_data(&pool).await;
        let project_id = seed.insert_project(&pool, "Acme-2025").await;
        let mapping_id = seed.insert_mapping(&pool, project_id, seed.personnel[0], 1, 100.0).await;
        let other_id = seed.insert_mapping(&pool, project_id, seed.personnel[1], 1, 100.0).await;

        let mut conn = pool.acquire().await.unwrap();
        let mut repo = ProjectRoles::new(&mut conn);
        let before = repo.get_by_id(mapping_id).await.unwrap().unwrap();

        let updated = repo
            .update(
                mapping_id,
                &ProjectRoleUpdateDBRequest {
                    epoch_number: 3,
                    epoch_percentage: 40.0,
                },
            )
            .await
            .unwrap();

        assert_eq!(updated.epoch_number, 3);
        assert_eq!(updated.epoch_percentage, 40.0);
        assert_eq!(updated.project_id, before.project_id);
        assert_eq!(updated.role_id, before.role_id);
        assert_eq!(updated.personnel_id, before.personnel_id);
        assert_eq!(updated.epoch_value, before.epoch_value);

        let untouched = repo.get_by_id(other_id).await.unwrap().unwrap();
        assert_eq!(untouched.epoch_number, 1);
        assert_eq!(untouched.epoch_percentage, 100.0);
    }

    #[sqlx::test]
    async fn update_of_unknown_id_is_not_found(pool: PgPool) {
        let mut conn = pool.acquire().await.unwrap();
        let result = ProjectRoles::new(&mut conn)
            .update(
                999,
                &ProjectRoleUpdateDBRequest {
                    epoch_number: 1,
                    epoch_percentage: 10.0,
                },
            )
            .await;
        assert!(matches!(result, Err(DbError::NotFound)));
    }

    #[sqlx::test]
    async fn delete_removes_single_row(pool: PgPool) {
        let seed = seed_reference_data(&pool).await;
        let project_id = seed.insert_project(&pool, "Acme-2025").await;
        let doomed = seed.insert_mapping(&pool, project_id, seed.personnel[0], 1, 50.0).await;
        let kept = seed.insert_mapping(&pool, project_id, seed.personnel[0], 2, 50.0).await;

        let mut conn = pool.acquire().await.unwrap();
        let mut repo = ProjectRoles::new(&mut conn);
        assert!(repo.delete(doomed).await.unwrap());
        assert!(!repo.delete(doomed).await.unwrap());
        assert!(repo.get_by_id(kept).await.unwrap().is_some());
    }
}
