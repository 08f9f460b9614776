//! API handlers.

pub mod chat;

pub use chat::*;

use crate::Database;

/// Shared state for all handlers.
#[derive(Clone)]
pub struct AppState {
    /// Database handle.
    pub db: Database,
}

impl AppState {
    /// Create a new state around a database.
    pub fn new(db: Database) -> Self {
        Self { db }
    }
}
