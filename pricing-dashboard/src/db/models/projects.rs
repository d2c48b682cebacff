//! Database models for projects.

use crate::types::{DEFAULT_PROJECT_STATUS_ID, ProjectId, ReferenceId};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

/// Database request for creating a new project
#[derive(Debug, Clone)]
pub struct ProjectCreateDBRequest {
    pub project_name: String,
    pub rate_variance: f64,
    pub currency_id: ReferenceId,
    pub status_id: ReferenceId,
    pub is_template: bool,
    pub epoch_id: ReferenceId,
    pub number_epochs: i32,
}

impl ProjectCreateDBRequest {
    /// A new, non-template project in the default status.
    pub fn new(project_name: String, rate_variance: f64, currency_id: ReferenceId, epoch_id: ReferenceId, number_epochs: i32) -> Self {
        Self {
            project_name,
            rate_variance,
            currency_id,
            status_id: DEFAULT_PROJECT_STATUS_ID,
            is_template: false,
            epoch_id,
            number_epochs,
        }
    }
}

/// Database response for a project row
#[derive(Debug, Clone, PartialEq, FromRow)]
pub struct ProjectDBResponse {
    pub project_id: ProjectId,
    pub project_name: String,
    pub rate_variance: f64,
    pub currency_id: ReferenceId,
    pub status_id: ReferenceId,
    pub is_template: bool,
    pub epoch_id: ReferenceId,
    pub number_epochs: i32,
}

/// Filter for listing projects
#[derive(Debug, Clone, Default)]
pub struct ProjectFilter {
    pub include_templates: bool,
}

/// A project as offered for deletion: status name and whether it is a template.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow, ToSchema)]
pub struct ProjectSummary {
    pub project_id: ProjectId,
    pub project_name: String,
    pub status_name: String,
    /// `Template` or `Active Project`
    pub project_type: String,
}
