// src/error.rs
use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;

use crate::services::concierge;

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("{0}")]
    BadRequest(String),
    #[error("upstream provider call failed: {0}")]
    Upstream(anyhow::Error),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match self {
            AppError::BadRequest(msg) => {
                (StatusCode::BAD_REQUEST, Json(json!({ "error": msg }))).into_response()
            }
            AppError::Upstream(err) => {
                tracing::error!("upstream provider error: {err:#}");
                // The reply field stays present so the client renders the
                // failure branch with the same code path as a success.
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(json!({
                        "error": concierge::UPSTREAM_ERROR_MESSAGE,
                        "reply": concierge::UPSTREAM_FALLBACK_REPLY,
                    })),
                )
                    .into_response()
            }
        }
    }
}
