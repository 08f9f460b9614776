//! Outbound notifications.

pub mod error;
pub mod message;
pub mod telegram;

use async_trait::async_trait;

pub use error::NotifyError;
pub use message::format_message;
pub use telegram::TelegramNotifier;

/// Delivers a rendered message to its destination.
#[async_trait]
pub trait Notifier: Send + Sync {
    /// Send one message. `Ok` means the destination accepted it.
    async fn send(&self, text: &str) -> Result<(), NotifyError>;
}
