//! Message entity and repository trait.
//!
//! Maps to the `chats` table in the database schema.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::shared::error::AppError;

/// Maximum message body length in characters.
pub const MAX_MESSAGE_LENGTH: usize = 4000;

/// Represents a message posted into a room.
///
/// Maps to the `chats` table:
/// - id: BIGINT PRIMARY KEY (Snowflake ID)
/// - room_id: BIGINT NOT NULL REFERENCES rooms(id) ON DELETE CASCADE
/// - sender_id: BIGINT NULL REFERENCES users(id) ON DELETE SET NULL
/// - message: TEXT NOT NULL
/// - created_at: TIMESTAMPTZ NOT NULL DEFAULT NOW()
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    /// Snowflake ID (primary key)
    pub id: i64,

    /// Room the message was posted in
    pub room_id: i64,

    /// Author. None once the author's account has been deleted.
    pub sender_id: Option<i64>,

    /// Message text
    pub body: String,

    /// Timestamp when the message was posted
    pub created_at: DateTime<Utc>,
}

/// Repository trait for Message data access operations.
///
/// Mutations are scoped to `(room_id, sender_id)` and may touch several rows.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MessageRepository: Send + Sync {
    /// Insert a new message.
    async fn create(&self, message: &Message) -> Result<Message, AppError>;

    /// All messages of a room, oldest first.
    async fn list_by_room(&self, room_id: i64) -> Result<Vec<Message>, AppError>;

    /// Replace the body of every message the sender posted in the room.
    ///
    /// Returns the number of rows updated; `NotFound` when there were none.
    async fn update_by_sender(
        &self,
        room_id: i64,
        sender_id: i64,
        body: &str,
    ) -> Result<u64, AppError>;

    /// Delete every message the sender posted in the room.
    ///
    /// Returns the number of rows deleted; `NotFound` when there were none.
    async fn delete_by_sender(&self, room_id: i64, sender_id: i64) -> Result<u64, AppError>;
}
