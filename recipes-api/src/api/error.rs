//! Mapping of store errors onto HTTP responses
//!
//! Every error body has the shape `{"error": "<message>"}`.

use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use tracing::error;

/// Errors returned by the recipe handlers
#[derive(Debug)]
pub enum ApiError {
    /// Request body missing, not JSON, or not a recipe
    MalformedBody(String),
    /// Outcome reported by the recipe store
    Store(recipes_common::Error),
}

impl From<recipes_common::Error> for ApiError {
    fn from(e: recipes_common::Error) -> Self {
        ApiError::Store(e)
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::MalformedBody(rejection.body_text())
    }
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        use recipes_common::Error;

        match self {
            ApiError::MalformedBody(_) => StatusCode::BAD_REQUEST,
            ApiError::Store(Error::Validation(_)) => StatusCode::BAD_REQUEST,
            ApiError::Store(Error::NotFound(_)) => StatusCode::NOT_FOUND,
            ApiError::Store(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = match self {
            ApiError::MalformedBody(msg) => msg,
            ApiError::Store(e) => {
                if !e.is_client_error() {
                    error!("Request failed: {}", e);
                }
                e.to_string()
            }
        };

        (status, Json(json!({ "error": message }))).into_response()
    }
}
