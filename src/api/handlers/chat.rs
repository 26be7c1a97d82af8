use crate::{
    types::{ChatRequest, ChatResponse, Result},
    AppState,
};
use axum::{extract::State, Json};

/// Chat with the assistant
///
/// Errors other than quota exhaustion are rendered by
/// [`AppError`](crate::types::AppError)'s `IntoResponse` as a technical-error
/// reply, still with status 200.
pub async fn chat(
    State(state): State<AppState>,
    Json(payload): Json<ChatRequest>,
) -> Result<Json<ChatResponse>> {
    let reply = state
        .chat
        .handle(&payload.message, payload.image.as_deref())
        .await?;

    Ok(Json(ChatResponse::new(reply)))
}
