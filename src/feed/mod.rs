//! Feed source for feedrelay.

pub mod fetcher;

pub use fetcher::{parse_feed, validate_url, FeedSource, HttpFeedSource};
