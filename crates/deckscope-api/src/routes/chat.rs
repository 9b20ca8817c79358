use axum::{
    extract::{Path, State},
    Json,
};
use serde::Serialize;
use std::sync::Arc;

use deckscope_chat::{ChatError, ChatReply, ChatTurn, ConversationHistory};

use crate::{
    error::{ApiError, ApiResult},
    state::AppState,
};

#[derive(Debug, Serialize)]
pub struct ConversationsResponse {
    pub analysis_id: String,
    pub conversations: Vec<ConversationHistory>,
}

/// Send a chat message about a completed analysis
#[utoipa::path(
    post,
    path = "/chat",
    responses(
        (status = 200, description = "Assistant reply"),
        (status = 404, description = "No stored context for the analysis")
    ),
    tag = "chat"
)]
pub async fn send_message(
    State(state): State<Arc<AppState>>,
    Json(turn): Json<ChatTurn>,
) -> ApiResult<Json<ChatReply>> {
    let reply = state.chat.chat(turn).await.map_err(|e| match e {
        ChatError::ContextNotFound(analysis_id) => ApiError::AnalysisNotFound(analysis_id),
    })?;

    Ok(Json(reply))
}

/// All conversations attached to an analysis
#[utoipa::path(
    get,
    path = "/chat/conversations/{analysis_id}",
    params(
        ("analysis_id" = String, Path, description = "Analysis ID")
    ),
    responses(
        (status = 200, description = "Conversations for the analysis")
    ),
    tag = "chat"
)]
pub async fn list_conversations(
    State(state): State<Arc<AppState>>,
    Path(analysis_id): Path<String>,
) -> Json<ConversationsResponse> {
    let conversations = state.chat.conversations_for_analysis(&analysis_id);

    Json(ConversationsResponse {
        analysis_id,
        conversations,
    })
}

/// One conversation's full history
#[utoipa::path(
    get,
    path = "/chat/history/{conversation_id}",
    params(
        ("conversation_id" = String, Path, description = "Conversation ID")
    ),
    responses(
        (status = 200, description = "Conversation history"),
        (status = 404, description = "Conversation not found")
    ),
    tag = "chat"
)]
pub async fn get_history(
    State(state): State<Arc<AppState>>,
    Path(conversation_id): Path<String>,
) -> ApiResult<Json<ConversationHistory>> {
    let conversation = state
        .chat
        .conversation(&conversation_id)
        .ok_or(ApiError::ConversationNotFound(conversation_id))?;

    Ok(Json(conversation))
}
