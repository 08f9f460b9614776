//! Chat records managed through the web API.
//!
//! Independent of the relay; the two only share the database pool.

pub mod repository;
pub mod types;

pub use repository::ChatRepository;
pub use types::{Chat, ChatInput};
