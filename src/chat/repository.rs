//! Chat repository.

use super::types::{Chat, ChatInput};
use crate::db::DbPool;
use crate::Result;

/// Row type for a chat from the database.
#[derive(Debug, Clone, sqlx::FromRow)]
struct ChatRow {
    id: i64,
    chat_id: i64,
    title: String,
    username: String,
    chat_type: String,
}

impl From<ChatRow> for Chat {
    fn from(row: ChatRow) -> Self {
        Chat {
            id: row.id,
            chat_id: row.chat_id,
            title: row.title,
            username: row.username,
            chat_type: row.chat_type,
        }
    }
}

/// Repository for chat record operations.
pub struct ChatRepository<'a> {
    pool: &'a DbPool,
}

impl<'a> ChatRepository<'a> {
    /// Create a new repository instance.
    pub fn new(pool: &'a DbPool) -> Self {
        Self { pool }
    }

    /// List all chats ordered by id.
    pub async fn list(&self) -> Result<Vec<Chat>> {
        let rows = sqlx::query_as::<_, ChatRow>(
            "SELECT id, chat_id, title, username, type AS chat_type FROM chats ORDER BY id",
        )
        .fetch_all(self.pool)
        .await?;

        Ok(rows.into_iter().map(Chat::from).collect())
    }

    /// Get a chat by id.
    pub async fn get(&self, id: i64) -> Result<Option<Chat>> {
        let row = sqlx::query_as::<_, ChatRow>(
            "SELECT id, chat_id, title, username, type AS chat_type FROM chats WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(self.pool)
        .await?;

        Ok(row.map(Chat::from))
    }

    /// Create a chat and return it with its assigned id.
    pub async fn create(&self, input: &ChatInput) -> Result<Chat> {
        let result = sqlx::query(
            "INSERT INTO chats (chat_id, title, username, type) VALUES ($1, $2, $3, $4)",
        )
        .bind(input.chat_id)
        .bind(&input.title)
        .bind(&input.username)
        .bind(&input.chat_type)
        .execute(self.pool)
        .await?;

        Ok(Chat {
            id: result.last_insert_rowid(),
            chat_id: input.chat_id,
            title: input.title.clone(),
            username: input.username.clone(),
            chat_type: input.chat_type.clone(),
        })
    }

    /// Replace every field of a chat.
    ///
    /// Returns `None` if the chat doesn't exist.
    pub async fn update(&self, id: i64, input: &ChatInput) -> Result<Option<Chat>> {
        let result = sqlx::query(
            "UPDATE chats SET chat_id = $1, title = $2, username = $3, type = $4 WHERE id = $5",
        )
        .bind(input.chat_id)
        .bind(&input.title)
        .bind(&input.username)
        .bind(&input.chat_type)
        .bind(id)
        .execute(self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Ok(None);
        }

        Ok(Some(Chat {
            id,
            chat_id: input.chat_id,
            title: input.title.clone(),
            username: input.username.clone(),
            chat_type: input.chat_type.clone(),
        }))
    }

    /// Delete a chat. Returns whether a row was removed.
    pub async fn delete(&self, id: i64) -> Result<bool> {
        let result = sqlx::query("DELETE FROM chats WHERE id = $1")
            .bind(id)
            .execute(self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Count all chats.
    pub async fn count(&self) -> Result<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM chats")
            .fetch_one(self.pool)
            .await?;
        Ok(count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Database;

    async fn setup_db() -> Database {
        Database::open_in_memory().await.unwrap()
    }

    fn sample() -> ChatInput {
        ChatInput::new(-100123, "Sports Desk", "sportsdesk", "channel")
    }

    #[tokio::test]
    async fn test_create_and_get() {
        let db = setup_db().await;
        let repo = ChatRepository::new(db.pool());

        let chat = repo.create(&sample()).await.unwrap();
        assert!(chat.id > 0);

        let fetched = repo.get(chat.id).await.unwrap().unwrap();
        assert_eq!(fetched, chat);
        assert_eq!(fetched.chat_id, -100123);
        assert_eq!(fetched.chat_type, "channel");
    }

    #[tokio::test]
    async fn test_get_missing() {
        let db = setup_db().await;
        let repo = ChatRepository::new(db.pool());
        assert!(repo.get(42).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_list_empty_and_ordered() {
        let db = setup_db().await;
        let repo = ChatRepository::new(db.pool());
        assert!(repo.list().await.unwrap().is_empty());

        let first = repo.create(&sample()).await.unwrap();
        let second = repo
            .create(&ChatInput::new(7, "Team", "team", "group"))
            .await
            .unwrap();

        let chats = repo.list().await.unwrap();
        assert_eq!(chats.len(), 2);
        assert_eq!(chats[0].id, first.id);
        assert_eq!(chats[1].id, second.id);
    }

    #[tokio::test]
    async fn test_update() {
        let db = setup_db().await;
        let repo = ChatRepository::new(db.pool());
        let chat = repo.create(&sample()).await.unwrap();

        let input = ChatInput::new(99, "Renamed", "renamed", "supergroup");
        let updated = repo.update(chat.id, &input).await.unwrap().unwrap();
        assert_eq!(updated.id, chat.id);
        assert_eq!(updated.title, "Renamed");

        let fetched = repo.get(chat.id).await.unwrap().unwrap();
        assert_eq!(fetched, updated);
    }

    #[tokio::test]
    async fn test_update_missing() {
        let db = setup_db().await;
        let repo = ChatRepository::new(db.pool());
        assert!(repo.update(5, &sample()).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_delete() {
        let db = setup_db().await;
        let repo = ChatRepository::new(db.pool());
        let chat = repo.create(&sample()).await.unwrap();

        assert!(repo.delete(chat.id).await.unwrap());
        assert!(!repo.delete(chat.id).await.unwrap());
        assert_eq!(repo.count().await.unwrap(), 0);
    }
}
