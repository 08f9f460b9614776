//! Post repository: the dedup store behind the relay.

use chrono::{DateTime, Utc};
use tracing::debug;

use super::types::{InsertOutcome, InsertReport, NewPost, Post, PostStatus};
use crate::db::{DbPool, POSTS_TABLE};
use crate::{RelayError, Result};

/// Row type for a post from the database.
#[derive(Debug, Clone, sqlx::FromRow)]
struct PostRow {
    id: String,
    title: String,
    summary: String,
    link: String,
    is_posted: String,
    attempts: i64,
    created_at: String,
    posted_at: Option<String>,
}

impl TryFrom<PostRow> for Post {
    type Error = RelayError;

    fn try_from(row: PostRow) -> Result<Self> {
        Ok(Post {
            status: row.is_posted.parse()?,
            created_at: parse_datetime(&row.created_at)?,
            posted_at: row.posted_at.as_deref().map(parse_datetime).transpose()?,
            id: row.id,
            title: row.title,
            summary: row.summary,
            link: row.link,
            attempts: row.attempts,
        })
    }
}

fn into_posts(rows: Vec<PostRow>) -> Result<Vec<Post>> {
    rows.into_iter().map(Post::try_from).collect()
}

/// Repository for post operations.
pub struct PostRepository<'a> {
    pool: &'a DbPool,
}

impl<'a> PostRepository<'a> {
    /// Create a new repository instance.
    pub fn new(pool: &'a DbPool) -> Self {
        Self { pool }
    }

    /// Create the posts table if it does not exist.
    pub async fn ensure_schema(&self) -> Result<()> {
        sqlx::raw_sql(POSTS_TABLE).execute(self.pool).await?;
        Ok(())
    }

    /// Store a post unless one with the same id already exists.
    ///
    /// A conflict on `id` is reported as [`InsertOutcome::Duplicate`]; any
    /// other failure is returned as an error.
    pub async fn insert(&self, post: &NewPost) -> Result<InsertOutcome> {
        let result = sqlx::query(
            r#"
            INSERT INTO posts (id, title, summary, link, is_posted)
            VALUES ($1, $2, $3, $4, $5)
            ON CONFLICT (id) DO NOTHING
            "#,
        )
        .bind(&post.id)
        .bind(&post.title)
        .bind(&post.summary)
        .bind(&post.link)
        .bind(post.status.as_str())
        .execute(self.pool)
        .await?;

        if result.rows_affected() > 0 {
            Ok(InsertOutcome::Inserted)
        } else {
            Ok(InsertOutcome::Duplicate)
        }
    }

    /// Store every post that is not already present.
    ///
    /// Stops at the first backend error.
    pub async fn insert_new(&self, posts: &[NewPost]) -> Result<InsertReport> {
        let mut report = InsertReport::default();
        for post in posts {
            let outcome = self.insert(post).await?;
            if outcome == InsertOutcome::Duplicate {
                debug!("Post {} already stored, skipping", post.id);
            }
            report.record(outcome);
        }
        Ok(report)
    }

    /// Get a post by id.
    pub async fn get(&self, id: &str) -> Result<Option<Post>> {
        let row = sqlx::query_as::<_, PostRow>(
            r#"
            SELECT id, title, summary, link, is_posted, attempts, created_at, posted_at
            FROM posts
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(self.pool)
        .await?;

        row.map(Post::try_from).transpose()
    }

    /// List every post that has not been relayed yet (oldest first).
    pub async fn find_unsent(&self) -> Result<Vec<Post>> {
        let rows = sqlx::query_as::<_, PostRow>(
            r#"
            SELECT id, title, summary, link, is_posted, attempts, created_at, posted_at
            FROM posts
            WHERE is_posted = $1
            ORDER BY rowid ASC
            "#,
        )
        .bind(PostStatus::Unsent.as_str())
        .fetch_all(self.pool)
        .await?;

        into_posts(rows)
    }

    /// List at most `limit` unsent posts.
    ///
    /// Posts with fewer failed delivery attempts come first, then the oldest,
    /// so posts that keep failing cannot hold the whole window.
    pub async fn find_unsent_limited(&self, limit: usize) -> Result<Vec<Post>> {
        let rows = sqlx::query_as::<_, PostRow>(
            r#"
            SELECT id, title, summary, link, is_posted, attempts, created_at, posted_at
            FROM posts
            WHERE is_posted = $1
            ORDER BY attempts ASC, rowid ASC
            LIMIT $2
            "#,
        )
        .bind(PostStatus::Unsent.as_str())
        .bind(limit as i64)
        .fetch_all(self.pool)
        .await?;

        into_posts(rows)
    }

    /// Mark a post as relayed.
    ///
    /// Returns `NotFound` when no post has this id.
    pub async fn mark_sent(&self, id: &str) -> Result<()> {
        let result = sqlx::query(
            r#"
            UPDATE posts
            SET is_posted = $1, posted_at = COALESCE(posted_at, datetime('now'))
            WHERE id = $2
            "#,
        )
        .bind(PostStatus::Sent.as_str())
        .bind(id)
        .execute(self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(RelayError::NotFound(format!("post {id}")));
        }
        Ok(())
    }

    /// Record a failed delivery attempt.
    ///
    /// Returns `NotFound` when no post has this id.
    pub async fn record_failure(&self, id: &str) -> Result<()> {
        let result = sqlx::query("UPDATE posts SET attempts = attempts + 1 WHERE id = $1")
            .bind(id)
            .execute(self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(RelayError::NotFound(format!("post {id}")));
        }
        Ok(())
    }

    /// Count all stored posts.
    pub async fn count(&self) -> Result<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM posts")
            .fetch_one(self.pool)
            .await?;
        Ok(count)
    }

    /// Count posts that have not been relayed.
    pub async fn count_unsent(&self) -> Result<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM posts WHERE is_posted = $1")
            .bind(PostStatus::Unsent.as_str())
            .fetch_one(self.pool)
            .await?;
        Ok(count)
    }
}

/// Parse a datetime string stored by SQLite or as RFC 3339.
fn parse_datetime(s: &str) -> Result<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Ok(dt.with_timezone(&Utc));
    }
    chrono::NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S")
        .map(|naive| DateTime::from_naive_utc_and_offset(naive, Utc))
        .map_err(|_| RelayError::Validation(format!("invalid timestamp: {s}")))
}
