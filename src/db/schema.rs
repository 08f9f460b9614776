//! Database schema and migrations for feedrelay.
//!
//! Migrations are applied in order when the database is opened. Every
//! statement is idempotent so a table created outside the migration path
//! (see `PostRepository::ensure_schema`) does not break a later migration.

/// Posts table: the dedup store for relayed feed entries.
pub const POSTS_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS posts (
    id          TEXT PRIMARY KEY NOT NULL,   -- feed entry guid
    title       TEXT NOT NULL DEFAULT '',
    summary     TEXT NOT NULL DEFAULT '',
    link        TEXT NOT NULL DEFAULT '',
    is_posted   TEXT NOT NULL DEFAULT 'false' CHECK (is_posted IN ('false', 'true')),
    attempts    INTEGER NOT NULL DEFAULT 0,  -- failed deliveries
    created_at  TEXT NOT NULL DEFAULT (datetime('now')),
    posted_at   TEXT
);

CREATE INDEX IF NOT EXISTS idx_posts_is_posted ON posts(is_posted);
"#;

/// Chats table for the chat record API.
pub const CHATS_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS chats (
    id          INTEGER PRIMARY KEY AUTOINCREMENT,
    chat_id     INTEGER NOT NULL,
    title       TEXT NOT NULL,
    username    TEXT NOT NULL,
    type        TEXT NOT NULL
);
"#;

/// Database migrations.
///
/// The schema_version table tracks which migrations have been applied.
pub const MIGRATIONS: &[&str] = &[
    // v1: posts
    POSTS_TABLE,
    // v2: chats
    CHATS_TABLE,
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_migrations_not_empty() {
        assert!(!MIGRATIONS.is_empty());
    }

    #[test]
    fn test_posts_migration() {
        let posts = MIGRATIONS[0];
        assert!(posts.contains("CREATE TABLE IF NOT EXISTS posts"));
        assert!(posts.contains("id          TEXT PRIMARY KEY"));
        assert!(posts.contains("is_posted"));
        assert!(posts.contains("summary"));
        assert!(posts.contains("link"));
        assert!(posts.contains("attempts"));
    }

    #[test]
    fn test_chats_migration() {
        let chats = MIGRATIONS[1];
        assert!(chats.contains("CREATE TABLE IF NOT EXISTS chats"));
        assert!(chats.contains("chat_id"));
        assert!(chats.contains("username"));
        assert!(chats.contains("type"));
    }

    #[test]
    fn test_migrations_are_idempotent_sql() {
        for migration in MIGRATIONS {
            assert!(!migration.trim().is_empty());
            assert!(migration.contains("IF NOT EXISTS"));
        }
    }
}
