//! feedrelay - RSS to Telegram relay
//!
//! Fetches a feed, remembers every entry it has seen in SQLite and posts the
//! new ones to a Telegram channel. A small REST API manages chat records.

pub mod chat;
pub mod config;
pub mod db;
pub mod error;
pub mod feed;
pub mod logging;
pub mod notify;
pub mod relay;
pub mod store;
pub mod web;

pub use chat::{Chat, ChatInput, ChatRepository};
pub use config::{Config, DeliveryPolicy};
pub use db::{Database, DbPool};
pub use error::{RelayError, Result};
pub use feed::{FeedSource, HttpFeedSource};
pub use notify::{format_message, Notifier, NotifyError, TelegramNotifier};
pub use relay::{Relay, RunReport};
pub use store::{InsertOutcome, InsertReport, NewPost, Post, PostRepository, PostStatus};
pub use web::WebServer;
