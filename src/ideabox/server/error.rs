use crate::error::IdeaError;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use tracing::error;

pub const NOT_FOUND_MESSAGE: &str = "Idea not found";
pub const UNKNOWN_ENDPOINT_MESSAGE: &str = "Endpoint not found";
pub const INTERNAL_MESSAGE: &str = "Something went wrong!";
pub const INVALID_BODY_MESSAGE: &str = "Invalid JSON body";

/// An error response: a status code and a `{"error": "..."}` body.
///
/// Persistence causes are logged here and never echoed to the caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiError {
    pub status: StatusCode,
    pub message: String,
}

impl ApiError {
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
        }
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, message)
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(StatusCode::NOT_FOUND, message)
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, message)
    }

    /// Map a store outcome onto a response. `failure` is the generic message
    /// used for anything that went wrong after validation passed.
    pub fn from_store(err: IdeaError, failure: &str) -> Self {
        match err {
            IdeaError::Validation(message) => Self::bad_request(message),
            IdeaError::NotFound(_) => Self::not_found(NOT_FOUND_MESSAGE),
            other => {
                error!(error = %other, "{}", failure);
                Self::internal(failure)
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(json!({ "error": self.message }))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn persistence_cause_is_not_leaked() {
        let err = ApiError::from_store(
            IdeaError::Persistence("disk on fire at /var/data".into()),
            "Failed to save idea",
        );
        assert_eq!(err.status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(err.message, "Failed to save idea");
    }

    #[test]
    fn not_found_uses_fixed_message() {
        let err = ApiError::from_store(IdeaError::NotFound("abc".into()), "Failed to update idea");
        assert_eq!(err.status, StatusCode::NOT_FOUND);
        assert_eq!(err.message, NOT_FOUND_MESSAGE);
    }
}
