use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;

/// Central error types for the site backend
#[derive(Debug)]
pub enum AppError {
    /// Bad input shape, surfaced as 400
    Validation(String),
    /// Local or document-store I/O failure, surfaced as 500
    Storage(String),
    /// External completion API failure, surfaced as 500 with the upstream
    /// diagnostic echoed to the caller
    Upstream { message: String, details: String },
}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AppError::Validation(msg) => write!(f, "Validation error: {}", msg),
            AppError::Storage(msg) => write!(f, "Storage error: {}", msg),
            AppError::Upstream { message, .. } => write!(f, "Upstream error: {}", message),
        }
    }
}

impl std::error::Error for AppError {}

// Conversions from other error types
impl From<rusqlite::Error> for AppError {
    fn from(e: rusqlite::Error) -> Self {
        AppError::Storage(e.to_string())
    }
}

impl From<photo_store::StoreError> for AppError {
    fn from(e: photo_store::StoreError) -> Self {
        AppError::Storage(e.to_string())
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = match self {
            AppError::Validation(_) => StatusCode::BAD_REQUEST,
            AppError::Storage(_) | AppError::Upstream { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        };

        let (message, details) = match &self {
            AppError::Validation(msg) | AppError::Storage(msg) => (msg.clone(), msg.clone()),
            AppError::Upstream { message, details } => (message.clone(), details.clone()),
        };

        let body = json!({
            "message": message,
            "error": self.to_string(),
            "details": details,
        });

        (status, Json(body)).into_response()
    }
}
