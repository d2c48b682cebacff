//! Database models backing the read-only overview pages.

use crate::types::{ProjectId, ReferenceId};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow, ToSchema)]
pub struct ProjectOverviewRow {
    pub project_id: ProjectId,
    pub project_name: String,
    pub currency_name: String,
    pub status_name: String,
    pub epoch_name: String,
    pub number_epochs: i32,
    pub rate_variance: f64,
    /// `Template` or `Active Project`
    pub project_type: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow, ToSchema)]
pub struct ConsultantLevelRow {
    pub consultant_level_id: ReferenceId,
    pub level_name: String,
    pub active_consultants: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow, ToSchema)]
pub struct CurrencyAnalysisRow {
    pub currency_name: String,
    pub project_count: i64,
    /// `None` when no project uses the currency
    pub average_rate_variance: Option<f64>,
}
