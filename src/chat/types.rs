//! Chat record types.

/// A stored chat record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Chat {
    /// Store-assigned identifier.
    pub id: i64,
    /// Telegram chat identifier.
    pub chat_id: i64,
    /// Chat title.
    pub title: String,
    /// Chat username.
    pub username: String,
    /// Chat type (e.g. "channel", "group").
    pub chat_type: String,
}

/// Field values for creating or replacing a chat.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatInput {
    /// Telegram chat identifier.
    pub chat_id: i64,
    /// Chat title.
    pub title: String,
    /// Chat username.
    pub username: String,
    /// Chat type.
    pub chat_type: String,
}

impl ChatInput {
    /// Create a new input.
    pub fn new(
        chat_id: i64,
        title: impl Into<String>,
        username: impl Into<String>,
        chat_type: impl Into<String>,
    ) -> Self {
        Self {
            chat_id,
            title: title.into(),
            username: username.into(),
            chat_type: chat_type.into(),
        }
    }
}
