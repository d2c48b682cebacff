use crate::db::errors::DbError;
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};
use thiserror::Error as ThisError;
use utoipa::ToSchema;

#[derive(ThisError, Debug)]
pub enum Error {
    /// A read (catalog, page, form options) failed, including failing to connect
    #[error("Error loading {what}: {source}")]
    Query {
        what: String,
        #[source]
        source: DbError,
    },

    /// A write failed and was rolled back
    #[error("Error {action}: {source}")]
    Execution {
        action: String,
        #[source]
        source: DbError,
    },

    /// Invalid form input (value outside a field's bounds, malformed id)
    #[error("{message}")]
    BadRequest { message: String },

    /// The selected value is not present in the catalog it was chosen from
    #[error("{resource} '{id}' not found")]
    NotFound { resource: String, id: String },

    /// Generic internal service error
    #[error("Failed to {operation}")]
    Internal { operation: String },

    /// Unexpected error with full context chain
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// JSON body returned for every failed request.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ErrorBody {
    /// Human readable message, including the raw database error text where there is one
    pub message: String,
}

impl Error {
    /// Wrap a failed read of `what`, for use with `map_err`.
    pub fn query(what: &str) -> impl FnOnce(DbError) -> Error + '_ {
        move |source| Error::Query {
            what: what.to_string(),
            source,
        }
    }

    /// Wrap a failed write described by `action` ("creating project"), for use with `map_err`.
    pub fn execution(action: &str) -> impl FnOnce(DbError) -> Error + '_ {
        move |source| Error::Execution {
            action: action.to_string(),
            source,
        }
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Error::BadRequest { message: message.into() }
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            Error::Query { source, .. } | Error::Execution { source, .. } => match source {
                DbError::Connection { .. } => StatusCode::SERVICE_UNAVAILABLE,
                DbError::NotFound => StatusCode::NOT_FOUND,
                DbError::UniqueViolation { .. } => StatusCode::CONFLICT,
                DbError::ForeignKeyViolation { .. } | DbError::CheckViolation { .. } => StatusCode::BAD_REQUEST,
                DbError::Other(_) => StatusCode::INTERNAL_SERVER_ERROR,
            },
            Error::BadRequest { .. } => StatusCode::BAD_REQUEST,
            Error::NotFound { .. } => StatusCode::NOT_FOUND,
            Error::Internal { .. } | Error::Other(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// The message shown inline next to the form. Database failures keep the raw error text.
    pub fn user_message(&self) -> String {
        match self {
            Error::Internal { .. } | Error::Other(_) => "Internal server error".to_string(),
            _ => self.to_string(),
        }
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        match &self {
            Error::Query { source: DbError::Connection { .. }, .. } | Error::Execution { source: DbError::Connection { .. }, .. } => {
                tracing::error!("Database unavailable: {}", self);
            }
            Error::Query { .. } | Error::Internal { .. } | Error::Other(_) => {
                tracing::error!("Internal service error: {:#}", self);
            }
            Error::Execution { .. } => {
                tracing::warn!("Write rejected: {}", self);
            }
            Error::BadRequest { .. } | Error::NotFound { .. } => {
                tracing::debug!("Client error: {}", self);
            }
        }

        let body = ErrorBody { message: self.user_message() };
        (self.status_code(), Json(body)).into_response()
    }
}

/// Type alias for service operation results
pub type Result<T> = std::result::Result<T, Error>;
