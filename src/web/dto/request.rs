//! Request DTOs for the chat API.

use serde::Deserialize;
use utoipa::ToSchema;
use validator::Validate;

use super::validation::plain_text;
use crate::chat::ChatInput;

/// Body of a chat create or replace request.
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct ChatRequest {
    /// Telegram chat identifier.
    pub chat_id: i64,
    /// Chat title.
    #[validate(
        length(min = 1, max = 256, message = "Must be 1-256 characters"),
        custom(function = "plain_text")
    )]
    pub title: String,
    /// Chat username.
    #[validate(
        length(min = 1, max = 256, message = "Must be 1-256 characters"),
        custom(function = "plain_text")
    )]
    pub username: String,
    /// Chat type.
    #[serde(rename = "type")]
    #[validate(
        length(min = 1, max = 256, message = "Must be 1-256 characters"),
        custom(function = "plain_text")
    )]
    pub chat_type: String,
}

impl From<ChatRequest> for ChatInput {
    fn from(req: ChatRequest) -> Self {
        ChatInput::new(req.chat_id, req.title, req.username, req.chat_type)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(title: &str) -> ChatRequest {
        ChatRequest {
            chat_id: 1,
            title: title.to_string(),
            username: "desk".to_string(),
            chat_type: "channel".to_string(),
        }
    }

    #[test]
    fn test_valid_request() {
        assert!(request("Sports Desk").validate().is_ok());
    }

    #[test]
    fn test_title_length() {
        assert!(request("").validate().is_err());
        assert!(request(&"a".repeat(256)).validate().is_ok());
        assert!(request(&"a".repeat(257)).validate().is_err());
    }

    #[test]
    fn test_title_blank_or_control_chars() {
        let errors = request("   ").validate().unwrap_err();
        assert!(errors.field_errors().contains_key("title"));

        assert!(request("Bad\x07title").validate().is_err());
    }

    #[test]
    fn test_type_field_name() {
        let req: ChatRequest = serde_json::from_str(
            r#"{"chat_id": -100, "title": "T", "username": "u", "type": "group"}"#,
        )
        .unwrap();
        assert_eq!(req.chat_type, "group");

        let input = ChatInput::from(req);
        assert_eq!(input.chat_id, -100);
    }
}
