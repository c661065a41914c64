// src/api/http/chat.rs

use axum::{Json, extract::State};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::api::error::ApiResult;
use crate::chat::ChatReply;
use crate::identity::Caller;
use crate::messages::ChatMessage;
use crate::state::AppState;

#[derive(Deserialize)]
pub struct SendMessageRequest {
    pub content: String,
}

#[derive(Serialize)]
pub struct ChatHistoryResponse {
    pub messages: Vec<ChatMessage>,
}

pub async fn send_message(
    State(app_state): State<Arc<AppState>>,
    caller: Caller,
    Json(request): Json<SendMessageRequest>,
) -> ApiResult<Json<ChatReply>> {
    let reply = app_state
        .chat
        .send_message(&caller, &request.content)
        .await?;
    Ok(Json(reply))
}

pub async fn list_messages(
    State(app_state): State<Arc<AppState>>,
    caller: Caller,
) -> ApiResult<Json<ChatHistoryResponse>> {
    let messages = app_state.chat.list_messages(&caller).await?;
    Ok(Json(ChatHistoryResponse { messages }))
}
