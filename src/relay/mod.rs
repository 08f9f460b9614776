//! Feed-to-channel relay for feedrelay.

pub mod service;

pub use service::{Relay, RunReport};
