//! Feed fetcher.
//!
//! Downloads an RSS/Atom document and turns its entries into unsent posts.

use async_trait::async_trait;
use feed_rs::model::{Link, Text};
use feed_rs::parser;
use reqwest::Client;
use std::time::Duration;
use tracing::{debug, warn};

use crate::config::FeedConfig;
use crate::error::{RelayError, Result};
use crate::store::NewPost;

/// User agent string for feed fetching.
const USER_AGENT: &str = concat!("feedrelay/", env!("CARGO_PKG_VERSION"));

/// Source of feed entries.
#[async_trait]
pub trait FeedSource: Send + Sync {
    /// Fetch the feed at `url` and return its entries as unsent posts.
    async fn fetch(&self, url: &str) -> Result<Vec<NewPost>>;
}

/// Feed source backed by an HTTP client.
pub struct HttpFeedSource {
    client: Client,
    max_feed_size: u64,
}

impl HttpFeedSource {
    /// Create a fetcher from the feed configuration.
    pub fn new(config: &FeedConfig) -> Result<Self> {
        let client = Client::builder()
            .connect_timeout(Duration::from_secs(config.connect_timeout_secs))
            .read_timeout(Duration::from_secs(config.read_timeout_secs))
            .timeout(Duration::from_secs(config.total_timeout_secs))
            .redirect(reqwest::redirect::Policy::limited(config.max_redirects))
            .user_agent(USER_AGENT)
            .build()
            .map_err(|e| RelayError::Feed(format!("failed to create HTTP client: {}", e)))?;

        Ok(Self {
            client,
            max_feed_size: config.max_feed_size_bytes,
        })
    }
}

#[async_trait]
impl FeedSource for HttpFeedSource {
    async fn fetch(&self, url: &str) -> Result<Vec<NewPost>> {
        validate_url(url)?;
        debug!("Fetching feed {}", url);

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| RelayError::Feed(format!("failed to fetch feed: {}", e)))?;

        if !response.status().is_success() {
            return Err(RelayError::Feed(format!(
                "HTTP error: {}",
                response.status()
            )));
        }

        if let Some(content_length) = response.content_length() {
            if content_length > self.max_feed_size {
                return Err(RelayError::Feed(format!(
                    "feed too large: {} bytes (max {} bytes)",
                    content_length, self.max_feed_size
                )));
            }
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|e| RelayError::Feed(format!("failed to read response: {}", e)))?;

        // Chunked responses carry no content length
        if bytes.len() as u64 > self.max_feed_size {
            return Err(RelayError::Feed(format!(
                "feed too large: {} bytes (max {} bytes)",
                bytes.len(),
                self.max_feed_size
            )));
        }

        parse_feed(&bytes)
    }
}

/// Check that a feed URL is absolute http(s) with a host.
pub fn validate_url(url: &str) -> Result<()> {
    let parsed =
        url::Url::parse(url).map_err(|e| RelayError::Feed(format!("invalid URL: {}", e)))?;

    match parsed.scheme() {
        "http" | "https" => {}
        scheme => {
            return Err(RelayError::Feed(format!(
                "unsupported URL scheme: {}",
                scheme
            )));
        }
    }

    if parsed.host().is_none() {
        return Err(RelayError::Feed("URL has no host".to_string()));
    }

    Ok(())
}

/// Identifier for entries the feed gives no id: the first link, if any.
fn link_as_id(links: &[Link], _title: &Option<Text>, _uri: Option<&str>) -> String {
    links
        .first()
        .map(|l| l.href.trim().to_string())
        .unwrap_or_default()
}

/// Parse feed bytes into unsent posts.
///
/// The post id is the entry's guid (RSS) or id (Atom), falling back to its
/// first link. Entries with neither are dropped. Title, summary and link are
/// copied verbatim; missing values become empty strings.
pub fn parse_feed(bytes: &[u8]) -> Result<Vec<NewPost>> {
    let feed = parser::Builder::new()
        .id_generator(link_as_id)
        .build()
        .parse(bytes)
        .map_err(|e| RelayError::Feed(format!("failed to parse feed: {}", e)))?;

    let mut posts = Vec::with_capacity(feed.entries.len());
    for entry in feed.entries {
        if entry.id.trim().is_empty() {
            warn!("Skipping feed entry without guid or link");
            continue;
        }

        let title = entry.title.map(|t| t.content).unwrap_or_default();
        let summary = entry
            .summary
            .map(|t| t.content)
            .or(entry.content.and_then(|c| c.body))
            .unwrap_or_default();
        let link = entry
            .links
            .first()
            .map(|l| l.href.clone())
            .unwrap_or_default();

        posts.push(
            NewPost::new(entry.id, title)
                .with_summary(summary)
                .with_link(link),
        );
    }

    Ok(posts)
}
