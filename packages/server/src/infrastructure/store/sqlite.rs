//! SQLite MessageStore 実装 (sqlx)

use std::{str::FromStr, time::Duration};

use async_trait::async_trait;
use sqlx::{
    Row,
    sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions, SqliteRow},
};

use crate::domain::{
    ChatMessage, MessageContent, MessageId, MessageStore, RoomId, StoreError, Timestamp,
    UserName,
};

const MIGRATIONS: [&str; 2] = [
    r#"
    CREATE TABLE IF NOT EXISTS messages (
        seq          INTEGER PRIMARY KEY AUTOINCREMENT,
        id           TEXT NOT NULL UNIQUE,
        room_id      TEXT NOT NULL,
        sender_id    TEXT NOT NULL,
        recipient_id TEXT NOT NULL,
        content      TEXT NOT NULL,
        delivered_at INTEGER NOT NULL,
        is_read      INTEGER NOT NULL DEFAULT 0
    );"#,
    r#"
    CREATE INDEX IF NOT EXISTS idx_messages_room_delivered
        ON messages (room_id, delivered_at);"#,
];

/// SQLite-backed MessageStore
pub struct SqliteMessageStore {
    pool: SqlitePool,
}

impl SqliteMessageStore {
    /// Connect to `url` (e.g. `sqlite://venti.db` or `sqlite::memory:`) and
    /// create the schema if needed. The database file is created when missing.
    pub async fn connect(url: &str) -> Result<Self, sqlx::Error> {
        let options = SqliteConnectOptions::from_str(url)?.create_if_missing(true);

        // an in-memory database lives only as long as its single connection
        let in_memory = url.contains(":memory:") || url.contains("mode=memory");
        let pool_options = SqlitePoolOptions::new().acquire_timeout(Duration::from_secs(5));
        let pool_options = if in_memory {
            pool_options
                .max_connections(1)
                .idle_timeout(None)
                .max_lifetime(None)
        } else {
            pool_options.max_connections(5)
        };

        let pool = pool_options.connect_with(options).await?;
        let store = Self { pool };
        store.run_migrations().await?;
        Ok(store)
    }

    async fn run_migrations(&self) -> Result<(), sqlx::Error> {
        for statement in MIGRATIONS {
            sqlx::query(statement).execute(&self.pool).await?;
        }
        Ok(())
    }
}

fn row_to_message(row: &SqliteRow) -> Result<ChatMessage, StoreError> {
    let corrupt = |e: String| StoreError::QueryFailed(format!("corrupt row: {}", e));

    let room_id: String = row.try_get("room_id").map_err(|e| corrupt(e.to_string()))?;
    let sender_id: String = row.try_get("sender_id").map_err(|e| corrupt(e.to_string()))?;
    let content: String = row.try_get("content").map_err(|e| corrupt(e.to_string()))?;

    Ok(ChatMessage {
        id: MessageId::from_stored(row.try_get("id").map_err(|e| corrupt(e.to_string()))?),
        room_id: RoomId::new(room_id).map_err(|e| corrupt(e.to_string()))?,
        sender_id: UserName::new(sender_id).map_err(|e| corrupt(e.to_string()))?,
        recipient_id: row
            .try_get("recipient_id")
            .map_err(|e| corrupt(e.to_string()))?,
        content: MessageContent::new(content).map_err(|e| corrupt(e.to_string()))?,
        delivered_at: Timestamp::new(
            row.try_get("delivered_at")
                .map_err(|e| corrupt(e.to_string()))?,
        ),
        read: row.try_get("is_read").map_err(|e| corrupt(e.to_string()))?,
    })
}

#[async_trait]
impl MessageStore for SqliteMessageStore {
    async fn insert(&self, message: &ChatMessage) -> Result<(), StoreError> {
        sqlx::query(
            "INSERT INTO messages (id, room_id, sender_id, recipient_id, content, delivered_at, is_read) \
             VALUES (?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(message.id.as_str())
        .bind(message.room_id.as_str())
        .bind(message.sender_id.as_str())
        .bind(message.recipient_id.as_str())
        .bind(message.content.as_str())
        .bind(message.delivered_at.value())
        .bind(message.read)
        .execute(&self.pool)
        .await
        .map_err(|e| StoreError::WriteRejected(e.to_string()))?;
        Ok(())
    }

    async fn find_by_room(
        &self,
        room_id: &RoomId,
        limit: usize,
    ) -> Result<Vec<ChatMessage>, StoreError> {
        let rows = sqlx::query(
            "SELECT id, room_id, sender_id, recipient_id, content, delivered_at, is_read \
             FROM messages WHERE room_id = ? ORDER BY delivered_at ASC, seq ASC LIMIT ?",
        )
        .bind(room_id.as_str())
        .bind(i64::try_from(limit).unwrap_or(i64::MAX))
        .fetch_all(&self.pool)
        .await
        .map_err(|e| StoreError::QueryFailed(e.to_string()))?;

        rows.iter().map(row_to_message).collect()
    }
}
