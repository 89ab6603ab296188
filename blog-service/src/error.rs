use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

/// Errors surfaced by the blog handlers.
///
/// Bodies are part of the public contract: lookups answer with `{message}`,
/// store failures with `{message, error}` and a bad identifier with `{error}`.
#[derive(Debug, Error)]
pub enum BlogError {
    #[error("Invalid ObjectId")]
    InvalidId,

    #[error("Blog not found")]
    NotFound,

    #[error("Failed to fetch blogs: {0}")]
    FetchAll(anyhow::Error),

    #[error("Failed to fetch blog: {0}")]
    Fetch(anyhow::Error),

    #[error("Failed to create blog: {0}")]
    Create(anyhow::Error),

    #[error("Failed to update blog: {0}")]
    Update(anyhow::Error),

    #[error("Failed to delete blog: {0}")]
    Delete(anyhow::Error),
}

impl IntoResponse for BlogError {
    fn into_response(self) -> Response {
        let (status, body) = match self {
            BlogError::InvalidId => (
                StatusCode::BAD_REQUEST,
                json!({ "error": "Invalid ObjectId" }),
            ),
            BlogError::NotFound => (
                StatusCode::NOT_FOUND,
                json!({ "message": "Blog not found" }),
            ),
            BlogError::FetchAll(err) => store_failure("Failed to fetch blogs", err),
            BlogError::Fetch(err) => store_failure("Failed to fetch blog", err),
            BlogError::Create(err) => {
                tracing::error!(error = %err, "Failed to create blog");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    json!({ "message": "Failed to create blog" }),
                )
            }
            BlogError::Update(err) => store_failure("Failed to update blog", err),
            BlogError::Delete(err) => store_failure("Failed to delete blog", err),
        };

        (status, Json(body)).into_response()
    }
}

fn store_failure(message: &str, err: anyhow::Error) -> (StatusCode, serde_json::Value) {
    tracing::error!(error = %err, "{}", message);
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        json!({ "message": message, "error": err.to_string() }),
    )
}
