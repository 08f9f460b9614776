//! Post store for feedrelay.
//!
//! A single `posts` table keyed by feed entry id. Inserts are conditional on
//! absence, which is what deduplicates entries across runs.

pub mod repository;
pub mod types;

pub use repository::PostRepository;
pub use types::{InsertOutcome, InsertReport, NewPost, Post, PostStatus};
