use thiserror::Error;

/// Message delivery errors.
#[derive(Debug, Error)]
pub enum NotifyError {
    /// HTTP request failed before a response arrived.
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The messaging API rejected the message.
    #[error("Telegram API error: {0}")]
    Api(String),
}
