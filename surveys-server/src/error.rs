//! Server error types

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};
use surveys_core::StoreError;
use thiserror::Error;

/// Errors that can occur in the surveys server
#[derive(Debug, Error)]
pub enum ServerError {
    /// Failed to bind to the specified address
    #[error("failed to bind to {addr}: {source}")]
    Bind {
        addr: String,
        #[source]
        source: std::io::Error,
    },

    /// Storage could not be opened or seeded
    #[error("storage error: {0}")]
    Store(#[from] StoreError),

    /// Internal server error
    #[error("internal error: {0}")]
    Internal(String),
}

/// JSON body returned with every API error
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub code: String,
}

/// Errors surfaced by API handlers
#[derive(Debug, Error)]
pub enum ApiError {
    /// The requested survey or result set does not exist
    #[error("{entity} not found: {id}")]
    NotFound { entity: &'static str, id: String },

    /// The store failed to complete the operation
    #[error(transparent)]
    Store(#[from] StoreError),
}

impl ApiError {
    pub fn survey_not_found(id: impl Into<String>) -> Self {
        Self::NotFound {
            entity: "survey",
            id: id.into(),
        }
    }

    pub fn results_not_found(id: impl Into<String>) -> Self {
        Self::NotFound {
            entity: "results",
            id: id.into(),
        }
    }
}

/// Body text for storage failures; details go to the log only.
const INTERNAL_ERROR_MESSAGE: &str = "internal storage error";

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, code, error) = match &self {
            ApiError::NotFound { .. } => (StatusCode::NOT_FOUND, "NOT_FOUND", self.to_string()),
            ApiError::Store(e) => {
                tracing::error!(error = %e, "store operation failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL_ERROR",
                    INTERNAL_ERROR_MESSAGE.to_string(),
                )
            }
        };

        (
            status,
            Json(ErrorResponse {
                error,
                code: code.to_string(),
            }),
        )
            .into_response()
    }
}
