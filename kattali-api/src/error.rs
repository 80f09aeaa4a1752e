use axum::{
    extract::rejection::{JsonRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use kattali_core::{CoreError, ValidationError};
use serde_json::json;

const UPSTREAM_UNAVAILABLE: &str = "Upstream source unavailable";

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("{0}")]
    BadRequest(String),

    #[error("{0}")]
    NotFound(String),

    #[error("Method not allowed")]
    MethodNotAllowed,

    /// `message` goes to the client; `cause` only to the log.
    #[error("{message}: {cause}")]
    Internal { message: &'static str, cause: String },

    /// A backing source failed. `error` names the failed operation for the client.
    #[error("{error}: {cause}")]
    Upstream { error: &'static str, cause: String },
}

impl AppError {
    pub fn internal(message: &'static str, cause: impl std::fmt::Display) -> Self {
        Self::Internal {
            message,
            cause: cause.to_string(),
        }
    }

    pub fn upstream(error: &'static str, cause: impl std::fmt::Display) -> Self {
        Self::Upstream {
            error,
            cause: cause.to_string(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, body) = match self {
            AppError::Validation(err) => {
                tracing::debug!("Rejected input: {:?}", err);
                (
                    StatusCode::BAD_REQUEST,
                    json!({ "success": false, "message": err.to_string() }),
                )
            }
            AppError::BadRequest(msg) => (
                StatusCode::BAD_REQUEST,
                json!({ "success": false, "message": msg }),
            ),
            AppError::NotFound(msg) => (
                StatusCode::NOT_FOUND,
                json!({ "success": false, "error": "Not found", "message": msg }),
            ),
            AppError::MethodNotAllowed => (
                StatusCode::METHOD_NOT_ALLOWED,
                json!({ "error": "Method not allowed" }),
            ),
            AppError::Internal { message, cause } => {
                tracing::error!("Internal Server Error: {}: {}", message, cause);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    json!({ "success": false, "error": "Internal Server Error", "message": message }),
                )
            }
            AppError::Upstream { error, cause } => {
                tracing::error!("{}: {}", error, cause);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    json!({ "error": error, "message": UPSTREAM_UNAVAILABLE }),
                )
            }
        };

        (status, Json(body)).into_response()
    }
}

impl From<CoreError> for AppError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::Validation(v) => AppError::Validation(v),
            other => AppError::internal("Internal Server Error", other),
        }
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        tracing::debug!("JSON body rejected: {}", rejection.body_text());
        AppError::BadRequest("Invalid request body".to_string())
    }
}

impl From<QueryRejection> for AppError {
    fn from(rejection: QueryRejection) -> Self {
        tracing::debug!("Query string rejected: {}", rejection.body_text());
        AppError::BadRequest("Invalid query parameters".to_string())
    }
}
