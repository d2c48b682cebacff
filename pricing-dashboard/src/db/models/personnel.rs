//! Database models for personnel.

use crate::types::PersonnelId;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

/// An active consultant that can be assigned to a project role.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow, ToSchema)]
pub struct AssignablePersonnel {
    pub personnel_id: PersonnelId,
    pub full_name: String,
    pub level_name: String,
}

/// Directory entry for any consultant, active or not.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow, ToSchema)]
pub struct PersonnelSummary {
    pub personnel_id: PersonnelId,
    pub full_name: String,
    pub email: Option<String>,
    pub ten_k_id: Option<String>,
    pub level_name: String,
    /// `Active` or `Inactive`
    pub status: String,
}

/// A project role held by a consultant, shown as a warning before deletion.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow, ToSchema)]
pub struct PersonnelAssignment {
    pub project_name: String,
    pub role_name: String,
}
