//! Post types for the dedup store.

use chrono::{DateTime, Utc};
use std::fmt;
use std::str::FromStr;

use crate::RelayError;

/// Two-state posted flag.
///
/// Stored as the strings `"false"` / `"true"` in the `is_posted` column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PostStatus {
    /// Not yet relayed.
    #[default]
    Unsent,
    /// Relayed to the channel.
    Sent,
}

impl PostStatus {
    /// Column value for this status.
    pub fn as_str(&self) -> &'static str {
        match self {
            PostStatus::Unsent => "false",
            PostStatus::Sent => "true",
        }
    }
}

impl FromStr for PostStatus {
    type Err = RelayError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "false" => Ok(PostStatus::Unsent),
            "true" => Ok(PostStatus::Sent),
            other => Err(RelayError::Validation(format!(
                "invalid is_posted value: {other}"
            ))),
        }
    }
}

impl fmt::Display for PostStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A stored post.
#[derive(Debug, Clone, PartialEq)]
pub struct Post {
    /// Feed entry identifier.
    pub id: String,
    /// Entry title.
    pub title: String,
    /// Entry summary.
    pub summary: String,
    /// Link to the original article.
    pub link: String,
    /// Posted flag.
    pub status: PostStatus,
    /// Failed delivery attempts so far.
    pub attempts: i64,
    /// When the post was first stored.
    pub created_at: DateTime<Utc>,
    /// When the post was marked sent.
    pub posted_at: Option<DateTime<Utc>>,
}

/// A post as produced by the feed source, before it is stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewPost {
    /// Feed entry identifier.
    pub id: String,
    /// Entry title.
    pub title: String,
    /// Entry summary.
    pub summary: String,
    /// Link to the original article.
    pub link: String,
    /// Initial posted flag.
    pub status: PostStatus,
}

impl NewPost {
    /// Create a new unsent post.
    pub fn new(id: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            summary: String::new(),
            link: String::new(),
            status: PostStatus::Unsent,
        }
    }

    /// Set the summary.
    pub fn with_summary(mut self, summary: impl Into<String>) -> Self {
        self.summary = summary.into();
        self
    }

    /// Set the link.
    pub fn with_link(mut self, link: impl Into<String>) -> Self {
        self.link = link.into();
        self
    }
}

/// Outcome of a single conditional insert.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InsertOutcome {
    /// The post was stored.
    Inserted,
    /// A post with the same id already exists; nothing was written.
    Duplicate,
}

/// Summary of a batch insert.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct InsertReport {
    /// Number of newly stored posts.
    pub inserted: usize,
    /// Number of posts skipped as duplicates.
    pub duplicates: usize,
}

impl InsertReport {
    /// Record one outcome.
    pub fn record(&mut self, outcome: InsertOutcome) {
        match outcome {
            InsertOutcome::Inserted => self.inserted += 1,
            InsertOutcome::Duplicate => self.duplicates += 1,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_post_status_strings() {
        assert_eq!(PostStatus::Unsent.as_str(), "false");
        assert_eq!(PostStatus::Sent.as_str(), "true");
        assert_eq!(PostStatus::default(), PostStatus::Unsent);
        assert_eq!("true".parse::<PostStatus>().unwrap(), PostStatus::Sent);
        assert_eq!("false".parse::<PostStatus>().unwrap(), PostStatus::Unsent);
        assert!("yes".parse::<PostStatus>().is_err());
    }

    #[test]
    fn test_new_post_defaults_to_unsent() {
        let post = NewPost::new("guid-1", "Title");
        assert_eq!(post.id, "guid-1");
        assert_eq!(post.title, "Title");
        assert_eq!(post.status, PostStatus::Unsent);
        assert!(post.summary.is_empty());
        assert!(post.link.is_empty());
    }

    #[test]
    fn test_new_post_builder() {
        let post = NewPost::new("guid-1", "Title")
            .with_summary("Summary")
            .with_link("https://example.com/1");
        assert_eq!(post.summary, "Summary");
        assert_eq!(post.link, "https://example.com/1");
    }

    #[test]
    fn test_insert_report_record() {
        let mut report = InsertReport::default();
        report.record(InsertOutcome::Inserted);
        report.record(InsertOutcome::Duplicate);
        report.record(InsertOutcome::Inserted);
        assert_eq!(report.inserted, 2);
        assert_eq!(report.duplicates, 1);
    }
}
