// src/routes/chat.rs
use axum::Json;
use axum::extract::State;
use axum::extract::rejection::JsonRejection;

use crate::error::AppError;
use crate::message::{ChatRequest, ChatResponse};
use crate::services::concierge;
use crate::state::SharedState;

/// Forward one chat message to the completion provider.
///
/// A malformed body (missing field, non-string message, invalid JSON) is
/// rejected before the provider is ever contacted.
pub async fn chat_handler(
    State(state): State<SharedState>,
    payload: Result<Json<ChatRequest>, JsonRejection>,
) -> Result<Json<ChatResponse>, AppError> {
    let Json(payload) =
        payload.map_err(|_| AppError::BadRequest("Message is required and must be a string".to_string()))?;

    let trimmed = payload.message.trim();
    if trimmed.is_empty() {
        return Err(AppError::BadRequest("Message cannot be empty".to_string()));
    }

    let reply = concierge::ask(state.llm.as_ref(), trimmed)
        .await
        .map_err(AppError::Upstream)?;

    Ok(Json(ChatResponse { reply }))
}
