use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use picker_interaction::{UpstreamError, wire::ErrorBody};
use thiserror::Error;
use tracing::error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Failed to read request body: {0}")]
    BodyRead(String),

    #[error("Invalid request body: {0}")]
    MalformedPayload(#[from] serde_json::Error),

    #[error(transparent)]
    Upstream(#[from] UpstreamError),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        error!("{self}");

        let body = ErrorBody {
            error: self.to_string(),
        };
        (StatusCode::INTERNAL_SERVER_ERROR, Json(body)).into_response()
    }
}
