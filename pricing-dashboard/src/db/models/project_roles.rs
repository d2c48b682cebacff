//! Database models for project role assignments (`projects_detail`).

use crate::types::{DEFAULT_EPOCH_VALUE, PersonnelId, ProjectId, ProjectRoleMappingId, RoleId};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

/// Database request for assigning a role
#[derive(Debug, Clone)]
pub struct ProjectRoleCreateDBRequest {
    pub project_id: ProjectId,
    pub role_id: RoleId,
    pub personnel_id: PersonnelId,
    pub epoch_number: i32,
    pub epoch_value: i32,
    pub epoch_percentage: f64,
}

impl ProjectRoleCreateDBRequest {
    pub fn new(project_id: ProjectId, role_id: RoleId, personnel_id: PersonnelId, epoch_number: i32, epoch_percentage: f64) -> Self {
        Self {
            project_id,
            role_id,
            personnel_id,
            epoch_number,
            epoch_value: DEFAULT_EPOCH_VALUE,
            epoch_percentage,
        }
    }
}

/// Database request for updating an assignment. Only the epoch fields are mutable.
#[derive(Debug, Clone)]
pub struct ProjectRoleUpdateDBRequest {
    pub epoch_number: i32,
    pub epoch_percentage: f64,
}

/// Database response for a `projects_detail` row
#[derive(Debug, Clone, PartialEq, FromRow)]
pub struct ProjectRoleDBResponse {
    pub project_role_mapping_id: ProjectRoleMappingId,
    pub project_id: ProjectId,
    pub role_id: RoleId,
    pub personnel_id: PersonnelId,
    pub epoch_number: i32,
    pub epoch_value: i32,
    pub epoch_percentage: f64,
}

/// Filter for listing assignments
#[derive(Debug, Clone, Default)]
pub struct ProjectRoleFilter {
    pub project_id: Option<ProjectId>,
    pub personnel_id: Option<PersonnelId>,
}

/// An assignment joined with project, role and consultant names.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow, ToSchema)]
pub struct ProjectRoleDetail {
    pub project_role_mapping_id: ProjectRoleMappingId,
    pub project_name: String,
    pub role_name: String,
    pub full_name: String,
    pub epoch_number: i32,
    pub epoch_percentage: f64,
}

impl ProjectRoleDetail {
    /// `"{project_name} - {role_name} ({full_name})"`
    pub fn display_string(&self) -> String {
        format!("{} - {} ({})", self.project_name, self.role_name, self.full_name)
    }
}
