//! API request/response models for cascading deletes.

use crate::api::models::forms::FormSpec;
use crate::db::cascade::DependentCounts;
use crate::db::models::personnel::{PersonnelAssignment, PersonnelSummary};
use crate::db::models::projects::ProjectSummary;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

pub const PROJECT_DEPENDENTS_WARNING: &str = "This project has associated records. Deletion may cause data integrity issues.";
pub const PERSONNEL_DEPENDENTS_WARNING: &str = "This personnel has associated project roles or project access grants.";
pub const PERSONNEL_ASSIGNMENTS_WARNING: &str = "This personnel is associated with the following projects:";

/// Submission of the Delete Project form.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ProjectDelete {
    #[schema(example = "Acme-2025")]
    pub project: String,
    /// Must be true to remove a project that still has dependent rows
    #[serde(default)]
    pub acknowledge_cascade: bool,
}

/// Submission of the Delete Personnel form.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct PersonnelDelete {
    /// Full name of the consultant
    #[schema(example = "Ada Lovelace")]
    pub personnel: String,
    /// Must be true to remove a consultant that still holds roles or access grants
    #[serde(default)]
    pub acknowledge_cascade: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum DeletionStatus {
    Deleted,
    /// Dependents exist; resubmit with `acknowledge_cascade: true` to proceed
    PendingAcknowledgment,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct DeletionOutcome {
    pub status: DeletionStatus,
    pub message: String,
    /// Rows found (pending) or removed (deleted) per dependent table
    pub dependents: DependentCounts,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ProjectDeletionForm {
    pub form: FormSpec,
    pub projects: Vec<ProjectSummary>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct PersonnelDeletionForm {
    pub form: FormSpec,
    pub personnel: Vec<PersonnelSummary>,
}

/// Query parameters for the assignments lookup
#[derive(Debug, Deserialize, IntoParams, ToSchema)]
pub struct PersonnelAssignmentsQuery {
    /// Full name of the consultant
    pub personnel: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct PersonnelAssignments {
    /// Present when the consultant holds at least one role
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub warning: Option<String>,
    pub assignments: Vec<PersonnelAssignment>,
}
