//! Database repository for projects.

use crate::db::{
    cascade::{Cascade, CascadeOutcome, PROJECT_DELETION},
    errors::{DbError, Result},
    handlers::repository::Repository,
    models::projects::{ProjectCreateDBRequest, ProjectDBResponse, ProjectFilter},
};
use crate::types::ProjectId;
use sqlx::PgConnection;
use tracing::instrument;

const PROJECT_COLUMNS: &str = "project_id, project_name, rate_variance, currency_id, status_id, is_template, epoch_id, number_epochs";

pub struct Projects<'c> {
    db: &'c mut PgConnection,
}

impl<'c> Projects<'c> {
    pub fn new(db: &'c mut PgConnection) -> Self {
        Self { db }
    }

    /// Delete a project and, when acknowledged, everything that references it.
    ///
    /// Must run inside a transaction so the count and the deletes see the same rows.
    #[instrument(skip(self), err)]
    pub async fn delete_with_dependents(&mut self, id: ProjectId, acknowledged: bool) -> Result<CascadeOutcome> {
        Cascade::new(&mut *self.db).delete(&PROJECT_DELETION, id, acknowledged).await
    }
}

#[async_trait::async_trait]
impl<'c> Repository for Projects<'c> {
    type CreateRequest = ProjectCreateDBRequest;
    type Response = ProjectDBResponse;
    type Id = ProjectId;
    type Filter = ProjectFilter;

    #[instrument(skip(self, request), fields(name = %request.project_name), err)]
    async fn create(&mut self, request: &Self::CreateRequest) -> Result<Self::Response> {
        let project = sqlx::query_as::<_, ProjectDBResponse>(&format!(
            r#"
            INSERT INTO projects (project_name, rate_variance, currency_id, status_id, is_template, epoch_id, number_epochs)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING {PROJECT_COLUMNS}
            "#
        ))
        .bind(&request.project_name)
        .bind(request.rate_variance)
        .bind(request.currency_id)
        .bind(request.status_id)
        .bind(request.is_template)
        .bind(request.epoch_id)
        .bind(request.number_epochs)
        .fetch_one(&mut *self.db)
        .await?;

        Ok(project)
    }

    #[instrument(skip(self), err)]
    async fn get_by_id(&mut self, id: Self::Id) -> Result<Option<Self::Response>> {
        let project = sqlx::query_as::<_, ProjectDBResponse>(&format!("SELECT {PROJECT_COLUMNS} FROM projects WHERE project_id = $1"))
            .bind(id)
            .fetch_optional(&mut *self.db)
            .await?;

        Ok(project)
    }

    #[instrument(skip(self, filter), fields(include_templates = filter.include_templates), err)]
    async fn list(&mut self, filter: &Self::Filter) -> Result<Vec<Self::Response>> {
        let projects = sqlx::query_as::<_, ProjectDBResponse>(&format!(
            "SELECT {PROJECT_COLUMNS} FROM projects WHERE ($1 OR is_template = FALSE) ORDER BY project_id"
        ))
        .bind(filter.include_templates)
        .fetch_all(&mut *self.db)
        .await?;

        Ok(projects)
    }

    /// Removes the project together with its dependents.
    #[instrument(skip(self), err)]
    async fn delete(&mut self, id: Self::Id) -> Result<bool> {
        match self.delete_with_dependents(id, true).await {
            Ok(_) => Ok(true),
            Err(DbError::NotFound) => Ok(false),
            Err(e) => Err(e),
        }
    }
}
