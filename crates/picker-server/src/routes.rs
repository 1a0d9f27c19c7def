use std::sync::Arc;

use axum::{
    Json,
    body::Bytes,
    extract::{State, rejection::BytesRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use picker_interaction::wire::RelayRequest;
use tracing::debug;

use super::{error::AppError, state::AppState};

/// `POST /openai`: forwards the transcript upstream and relays the answer
/// with its original status.
///
/// Upstream error statuses (401, 429, ...) reach the caller unchanged instead
/// of being folded into a 200 carrying the upstream error body.
pub async fn openai_handler(
    State(state): State<Arc<AppState>>,
    body: Result<Bytes, BytesRejection>,
) -> Result<Response, AppError> {
    let body = body.map_err(|e| AppError::BodyRead(e.body_text()))?;
    let request: RelayRequest = serde_json::from_slice(&body)?;
    debug!("Relaying {} message(s) upstream", request.messages.len());

    let upstream = state.upstream.forward(&request.messages).await?;
    let status = StatusCode::from_u16(upstream.status).unwrap_or(StatusCode::BAD_GATEWAY);
    debug!("Upstream answered {status}");

    Ok((status, Json(upstream.body)).into_response())
}

pub async fn not_found_handler() -> impl IntoResponse {
    (StatusCode::NOT_FOUND, "Not found")
}
