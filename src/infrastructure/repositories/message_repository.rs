//! Message Repository Implementation
//!
//! PostgreSQL implementation of room-scoped message storage (`chats` table).

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;

use crate::domain::{Message, MessageRepository};
use crate::shared::error::AppError;

/// PostgreSQL message repository implementation.
#[derive(Clone)]
pub struct PgMessageRepository {
    pool: PgPool,
}

impl PgMessageRepository {
    /// Creates a new PgMessageRepository with the given connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// Internal row type for message queries.
#[derive(Debug, sqlx::FromRow)]
struct MessageRow {
    id: i64,
    room_id: i64,
    sender_id: Option<i64>,
    message: String,
    created_at: DateTime<Utc>,
}

impl MessageRow {
    fn into_message(self) -> Message {
        Message {
            id: self.id,
            room_id: self.room_id,
            sender_id: self.sender_id,
            body: self.message,
            created_at: self.created_at,
        }
    }
}

#[async_trait]
impl MessageRepository for PgMessageRepository {
    async fn create(&self, message: &Message) -> Result<Message, AppError> {
        let row = sqlx::query_as::<_, MessageRow>(
            r#"
            INSERT INTO chats (id, room_id, sender_id, message, created_at)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id, room_id, sender_id, message, created_at
            "#,
        )
        .bind(message.id)
        .bind(message.room_id)
        .bind(message.sender_id)
        .bind(&message.body)
        .bind(message.created_at)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| match &e {
            sqlx::Error::Database(db_err) if db_err.is_foreign_key_violation() => {
                AppError::NotFound(format!("Room {} not found", message.room_id))
            }
            _ => AppError::Database(e),
        })?;

        Ok(row.into_message())
    }

    async fn list_by_room(&self, room_id: i64) -> Result<Vec<Message>, AppError> {
        let rows = sqlx::query_as::<_, MessageRow>(
            r#"
            SELECT id, room_id, sender_id, message, created_at
            FROM chats
            WHERE room_id = $1
            ORDER BY created_at ASC, id ASC
            "#,
        )
        .bind(room_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(MessageRow::into_message).collect())
    }

    async fn update_by_sender(
        &self,
        room_id: i64,
        sender_id: i64,
        body: &str,
    ) -> Result<u64, AppError> {
        let result = sqlx::query("UPDATE chats SET message = $3 WHERE room_id = $1 AND sender_id = $2")
            .bind(room_id)
            .bind(sender_id)
            .bind(body)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!(
                "No messages from user {} in room {}",
                sender_id, room_id
            )));
        }

        Ok(result.rows_affected())
    }

    async fn delete_by_sender(&self, room_id: i64, sender_id: i64) -> Result<u64, AppError> {
        let result = sqlx::query("DELETE FROM chats WHERE room_id = $1 AND sender_id = $2")
            .bind(room_id)
            .bind(sender_id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!(
                "No messages from user {} in room {}",
                sender_id, room_id
            )));
        }

        Ok(result.rows_affected())
    }
}
