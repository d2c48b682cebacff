//! Read-only lookups used to populate selection lists.
//!
//! Each method runs one fixed query and returns every row; there is no paging. Rows come back
//! ordered by key so that resolving a display value picks the same row every time.

use crate::db::{
    errors::Result,
    models::{
        personnel::{AssignablePersonnel, PersonnelAssignment, PersonnelSummary},
        project_roles::ProjectRoleDetail,
        projects::ProjectSummary,
        reference::{ReferenceItem, ReferenceTable},
    },
};
use crate::types::PersonnelId;
use sqlx::PgConnection;
use tracing::instrument;

pub struct Catalogs<'c> {
    db: &'c mut PgConnection,
}

impl<'c> Catalogs<'c> {
    pub fn new(db: &'c mut PgConnection) -> Self {
        Self { db }
    }

    #[instrument(skip(self), fields(table = table.table()), err)]
    pub async fn reference(&mut self, table: ReferenceTable) -> Result<Vec<ReferenceItem>> {
        let items = sqlx::query_as::<_, ReferenceItem>(&table.select_statement())
            .fetch_all(&mut *self.db)
            .await?;

        Ok(items)
    }

    /// Every project with its status and whether it is a template.
    #[instrument(skip(self), err)]
    pub async fn deletable_projects(&mut self) -> Result<Vec<ProjectSummary>> {
        let projects = sqlx::query_as::<_, ProjectSummary>(
            r#"
            SELECT p.project_id,
                   p.project_name,
                   s.status_name,
                   CASE WHEN p.is_template THEN 'Template' ELSE 'Active Project' END AS project_type
            FROM projects p
            JOIN status s ON p.status_id = s.status_id
            ORDER BY p.project_id
            "#,
        )
        .fetch_all(&mut *self.db)
        .await?;

        Ok(projects)
    }

    /// Active consultants only.
    #[instrument(skip(self), err)]
    pub async fn active_personnel(&mut self) -> Result<Vec<AssignablePersonnel>> {
        let personnel = sqlx::query_as::<_, AssignablePersonnel>(
            r#"
            SELECT p.personnel_id,
                   p.first_name || ' ' || p.last_name AS full_name,
                   cl.level_name
            FROM personnel p
            JOIN consultant_level cl ON p.consultant_level_id = cl.consultant_level_id
            WHERE p.is_active = TRUE
            ORDER BY p.personnel_id
            "#,
        )
        .fetch_all(&mut *self.db)
        .await?;

        Ok(personnel)
    }

    #[instrument(skip(self), err)]
    pub async fn all_personnel(&mut self) -> Result<Vec<PersonnelSummary>> {
        let personnel = sqlx::query_as::<_, PersonnelSummary>(
            r#"
            SELECT p.personnel_id,
                   p.first_name || ' ' || p.last_name AS full_name,
                   p.email,
                   p.ten_k_id,
                   cl.level_name,
                   CASE WHEN p.is_active THEN 'Active' ELSE 'Inactive' END AS status
            FROM personnel p
            JOIN consultant_level cl ON p.consultant_level_id = cl.consultant_level_id
            ORDER BY p.personnel_id
            "#,
        )
        .fetch_all(&mut *self.db)
        .await?;

        Ok(personnel)
    }

    /// Every assignment joined with project, role and consultant names.
    #[instrument(skip(self), err)]
    pub async fn project_roles(&mut self) -> Result<Vec<ProjectRoleDetail>> {
        let roles = sqlx::query_as::<_, ProjectRoleDetail>(
            r#"
            SELECT pd.project_role_mapping_id,
                   p.project_name,
                   r.role_name,
                   pe.first_name || ' ' || pe.last_name AS full_name,
                   pd.epoch_number,
                   pd.epoch_percentage
            FROM projects_detail pd
            JOIN projects p ON pd.project_id = p.project_id
            JOIN roles r ON pd.role_id = r.role_id
            JOIN personnel pe ON pd.personnel_id = pe.personnel_id
            ORDER BY pd.project_role_mapping_id
            "#,
        )
        .fetch_all(&mut *self.db)
        .await?;

        Ok(roles)
    }

    #[instrument(skip(self), err)]
    pub async fn personnel_assignments(&mut self, personnel_id: PersonnelId) -> Result<Vec<PersonnelAssignment>> {
        let assignments = sqlx::query_as::<_, PersonnelAssignment>(
            r#"
            SELECT p.project_name, r.role_name
            FROM projects_detail pd
            JOIN projects p ON pd.project_id = p.project_id
            JOIN roles r ON pd.role_id = r.role_id
            WHERE pd.personnel_id = $1
            ORDER BY pd.project_role_mapping_id
            "#,
        )
        .bind(personnel_id)
        .fetch_all(&mut *self.db)
        .await?;

        Ok(assignments)
    }
}
