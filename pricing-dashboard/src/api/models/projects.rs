//! API request models for projects.

use crate::api::models::forms::NumberBounds;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

fn default_number_epochs() -> i32 {
    NumberBounds::NUMBER_OF_EPOCHS.default as i32
}

/// Submission of the Create New Project form.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ProjectCreate {
    #[schema(example = "Acme-2025")]
    pub project_name: String,
    /// Template name, one of the form's options
    #[schema(example = "Standard")]
    pub template: String,
    /// Currency name, one of the form's options
    #[schema(example = "USD")]
    pub currency: String,
    /// Epoch type name, one of the form's options
    #[schema(example = "Quarterly")]
    pub epoch_type: String,
    /// Between 0.0 and 1.0
    #[serde(default)]
    #[schema(example = 0.15)]
    pub rate_variance: f64,
    /// Between 1 and 4
    #[serde(default = "default_number_epochs")]
    #[schema(example = 2)]
    pub number_epochs: i32,
}
