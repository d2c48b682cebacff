//! API request/response models for project role assignments.

use crate::api::models::forms::{FormSpec, NumberBounds};
use crate::db::models::project_roles::ProjectRoleDetail;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

fn default_epoch_number() -> i32 {
    NumberBounds::EPOCH_NUMBER.default as i32
}

fn default_epoch_percentage() -> f64 {
    NumberBounds::EPOCH_PERCENTAGE.default
}

/// Submission of the Assign Project Roles form.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct RoleAssignmentCreate {
    /// Project name (non-template projects only)
    #[schema(example = "Acme-2025")]
    pub project: String,
    /// Full name of an active consultant
    #[schema(example = "Ada Lovelace")]
    pub personnel: String,
    #[schema(example = "Engagement Lead")]
    pub role: String,
    #[serde(default = "default_epoch_number")]
    pub epoch_number: i32,
    #[serde(default = "default_epoch_percentage")]
    pub epoch_percentage: f64,
}

/// Submission of the Update Project Roles form.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct RoleUpdate {
    /// Mapping id as offered by the form, in text form
    #[schema(example = "17")]
    pub project_role_mapping_id: String,
    #[serde(default = "default_epoch_number")]
    pub epoch_number: i32,
    #[serde(default = "default_epoch_percentage")]
    pub epoch_percentage: f64,
}

/// Submission of the Delete Project Role form.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct RoleDelete {
    /// Composite display string, `"{project} - {role} ({full name})"`
    #[schema(example = "Acme-2025 - Engagement Lead (Ada Lovelace)")]
    pub project_role: String,
}

/// A form together with the assignments it acts on.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ProjectRolesForm {
    pub form: FormSpec,
    pub roles: Vec<ProjectRoleDetail>,
}
