//! Web API module for feedrelay.
//!
//! Serves CRUD endpoints for chat records alongside the relay.

pub mod dto;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod openapi;
pub mod router;
pub mod server;

pub use error::ApiError;
pub use router::create_router;
pub use server::WebServer;
