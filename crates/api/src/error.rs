use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::validation::ValidationError;

#[derive(Error, Debug)]
pub enum ApiError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// The engine failed on input that passed validation.
    #[error("{context}: {reason}")]
    Computation {
        context: &'static str,
        reason: String,
    },
}

impl ApiError {
    pub fn computation(context: &'static str, reason: impl ToString) -> Self {
        ApiError::Computation {
            context,
            reason: reason.to_string(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        // Computation failures only follow a caller contract violation, so
        // they share the client-error status. The front end reads `error`.
        let body = Json(json!({ "error": self.to_string() }));
        (StatusCode::BAD_REQUEST, body).into_response()
    }
}

pub type ApiResult<T> = Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_message_passes_through() {
        let err = ApiError::from(ValidationError::MissingTasks);
        assert_eq!(err.to_string(), "'tasks' field is required.");
        assert_eq!(err.into_response().status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_computation_message_has_context() {
        let err = ApiError::computation("Failed to analyze tasks", "worker panicked");
        assert_eq!(err.to_string(), "Failed to analyze tasks: worker panicked");
    }
}
