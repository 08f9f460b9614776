//! Chat handlers for the web API.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use std::sync::Arc;

use crate::chat::{ChatInput, ChatRepository};
use crate::web::dto::{ChatRequest, ChatResponse, ValidatedJson};
use crate::web::error::ApiError;
use crate::web::handlers::AppState;

/// GET /api/chat/ - List all chats.
///
/// An empty table yields `200 []`. The Django service this API replaces
/// answered `404` in that case.
#[utoipa::path(
    get,
    path = "/api/chat/",
    tag = "chat",
    responses(
        (status = 200, description = "All chat records, empty array when there are none", body = Vec<ChatResponse>)
    )
)]
pub async fn list_chats(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<ChatResponse>>, ApiError> {
    let chats = ChatRepository::new(state.db.pool()).list().await?;
    Ok(Json(chats.into_iter().map(ChatResponse::from).collect()))
}

/// POST /api/chat/ - Create a chat.
#[utoipa::path(
    post,
    path = "/api/chat/",
    tag = "chat",
    request_body = ChatRequest,
    responses(
        (status = 201, description = "Chat created", body = ChatResponse),
        (status = 400, description = "Malformed body or validation error")
    )
)]
pub async fn create_chat(
    State(state): State<Arc<AppState>>,
    ValidatedJson(req): ValidatedJson<ChatRequest>,
) -> Result<(StatusCode, Json<ChatResponse>), ApiError> {
    let chat = ChatRepository::new(state.db.pool())
        .create(&ChatInput::from(req))
        .await?;

    tracing::info!(id = chat.id, chat_id = chat.chat_id, "Chat created");
    Ok((StatusCode::CREATED, Json(chat.into())))
}

/// GET /api/chat/:id - Get a chat.
#[utoipa::path(
    get,
    path = "/api/chat/{id}",
    tag = "chat",
    params(("id" = i64, Path, description = "Chat record id")),
    responses(
        (status = 200, description = "Chat record", body = ChatResponse),
        (status = 404, description = "Chat not found")
    )
)]
pub async fn get_chat(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
) -> Result<Json<ChatResponse>, ApiError> {
    let chat = ChatRepository::new(state.db.pool())
        .get(id)
        .await?
        .ok_or_else(|| ApiError::not_found("Chat not found"))?;

    Ok(Json(chat.into()))
}

/// PUT /api/chat/:id - Replace a chat.
#[utoipa::path(
    put,
    path = "/api/chat/{id}",
    tag = "chat",
    params(("id" = i64, Path, description = "Chat record id")),
    request_body = ChatRequest,
    responses(
        (status = 200, description = "Chat replaced", body = ChatResponse),
        (status = 400, description = "Malformed body or validation error"),
        (status = 404, description = "Chat not found")
    )
)]
pub async fn update_chat(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
    ValidatedJson(req): ValidatedJson<ChatRequest>,
) -> Result<Json<ChatResponse>, ApiError> {
    let chat = ChatRepository::new(state.db.pool())
        .update(id, &ChatInput::from(req))
        .await?
        .ok_or_else(|| ApiError::not_found("Chat not found"))?;

    Ok(Json(chat.into()))
}

/// DELETE /api/chat/:id - Delete a chat.
#[utoipa::path(
    delete,
    path = "/api/chat/{id}",
    tag = "chat",
    params(("id" = i64, Path, description = "Chat record id")),
    responses(
        (status = 204, description = "Chat deleted"),
        (status = 404, description = "Chat not found")
    )
)]
pub async fn delete_chat(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
) -> Result<StatusCode, ApiError> {
    if !ChatRepository::new(state.db.pool()).delete(id).await? {
        return Err(ApiError::not_found("Chat not found"));
    }

    tracing::info!(id, "Chat deleted");
    Ok(StatusCode::NO_CONTENT)
}
