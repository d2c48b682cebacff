//! Success body for form submissions.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Message shown inline next to the form after a successful submission.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct FormOutcome {
    #[schema(example = "Project created successfully! Project ID: 42")]
    pub message: String,
    /// Key generated by the submission, when it created a row
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
}

impl FormOutcome {
    pub fn message(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            id: None,
        }
    }

    pub fn created(message: impl Into<String>, id: i64) -> Self {
        Self {
            message: message.into(),
            id: Some(id),
        }
    }
}
