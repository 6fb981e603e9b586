use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

/// Application-level errors
#[derive(thiserror::Error, Debug)]
pub enum AppError {
    #[error("Database connection failed: {0}")]
    StoreConnection(#[source] sqlx::Error),

    #[error("Database query failed: {0}")]
    StoreQuery(#[source] sqlx::Error),

    #[error("Category not found: {0}")]
    CategoryNotFound(String),

    #[error("Internal server error: {0}")]
    Internal(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        // Driver errors stay in the logs, never in the body
        let (status, message) = match self {
            AppError::StoreConnection(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Database connection failed".to_string(),
            ),
            AppError::StoreQuery(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Database query failed".to_string(),
            ),
            AppError::CategoryNotFound(category) => (
                StatusCode::NOT_FOUND,
                format!("Category not found: {}", category),
            ),
            AppError::Internal(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Internal server error".to_string(),
            ),
        };

        let body = Json(json!({
            "error": message
        }));

        (status, body).into_response()
    }
}

pub type AppResult<T> = Result<T, AppError>;
