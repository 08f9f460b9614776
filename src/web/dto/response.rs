//! Response DTOs for the chat API.

use serde::Serialize;
use utoipa::ToSchema;

use crate::chat::Chat;

/// A chat record as returned by the API.
#[derive(Debug, Serialize, ToSchema)]
pub struct ChatResponse {
    /// Record id.
    pub id: i64,
    /// Telegram chat identifier.
    pub chat_id: i64,
    /// Chat title.
    pub title: String,
    /// Chat username.
    pub username: String,
    /// Chat type.
    #[serde(rename = "type")]
    pub chat_type: String,
}

impl From<Chat> for ChatResponse {
    fn from(chat: Chat) -> Self {
        Self {
            id: chat.id,
            chat_id: chat.chat_id,
            title: chat.title,
            username: chat.username,
            chat_type: chat.chat_type,
        }
    }
}
