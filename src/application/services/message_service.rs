//! Message Service
//!
//! Handles posting, editing, deleting and listing room messages.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::Serialize;

use super::room_access::{AccessError, RoomGate};
use crate::domain::{
    AccessDenial, Message, MessageRepository, RoomOperation, RoomRepository, MAX_MESSAGE_LENGTH,
};
use crate::infrastructure::metrics;
use crate::shared::clock::Clock;
use crate::shared::error::AppError;
use crate::shared::snowflake::SnowflakeGenerator;

/// Message service trait
#[async_trait]
pub trait MessageService: Send + Sync {
    /// Post a message into a room (members only)
    async fn post_message(&self, room_id: i64, caller_id: i64, body: String) -> Result<ChatMessageDto, MessageError>;

    /// Replace the body of every message the caller posted in the room.
    /// Returns the number of messages changed.
    async fn edit_message(&self, room_id: i64, caller_id: i64, body: String) -> Result<u64, MessageError>;

    /// Delete every message the caller posted in the room.
    /// Returns the number of messages deleted.
    async fn delete_message(&self, room_id: i64, caller_id: i64) -> Result<u64, MessageError>;

    /// All messages of a room, oldest first
    async fn list_messages(&self, room_id: i64) -> Result<Vec<ChatMessageDto>, MessageError>;
}

/// Message data transfer object
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChatMessageDto {
    pub id: i64,
    pub room_id: i64,
    pub sender_id: Option<i64>,
    pub body: String,
    pub time: DateTime<Utc>,
}

impl From<Message> for ChatMessageDto {
    fn from(message: Message) -> Self {
        Self {
            id: message.id,
            room_id: message.room_id,
            sender_id: message.sender_id,
            body: message.body,
            time: message.created_at,
        }
    }
}

/// Message service errors
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MessageError {
    #[error("Room not found")]
    RoomNotFound,

    #[error("Caller is not a member of the room")]
    Unauthorized,

    #[error("Caller has no messages in the room")]
    NotAMember,

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Storage error: {0}")]
    Storage(String),
}

impl MessageError {
    /// Metric label for this outcome.
    pub fn outcome(&self) -> &'static str {
        match self {
            MessageError::RoomNotFound => "room_not_found",
            MessageError::Unauthorized => "unauthorized",
            MessageError::NotAMember => "not_a_member",
            MessageError::BadRequest(_) => "bad_request",
            MessageError::Storage(_) => "storage_error",
        }
    }

    fn storage(err: AppError) -> Self {
        tracing::error!(error = %err, "Message storage failure");
        MessageError::Storage(err.to_string())
    }
}

impl From<AccessError> for MessageError {
    fn from(err: AccessError) -> Self {
        match err {
            AccessError::Denied(AccessDenial::RoomNotFound) => MessageError::RoomNotFound,
            AccessError::Denied(_) => MessageError::Unauthorized,
            AccessError::Storage(e) => MessageError::storage(e),
        }
    }
}

/// Check a message body: non-blank and at most MAX_MESSAGE_LENGTH characters.
fn validate_body(body: &str) -> Result<(), MessageError> {
    if body.trim().is_empty() {
        return Err(MessageError::BadRequest("Message body must not be empty".into()));
    }
    if body.chars().count() > MAX_MESSAGE_LENGTH {
        return Err(MessageError::BadRequest(format!(
            "Message body must be at most {} characters",
            MAX_MESSAGE_LENGTH
        )));
    }
    Ok(())
}

fn observe<T>(operation: RoomOperation, result: Result<T, MessageError>) -> Result<T, MessageError> {
    let outcome = match &result {
        Ok(_) => "ok",
        Err(e) => e.outcome(),
    };
    metrics::record_room_operation(operation.as_str(), outcome);
    result
}

/// MessageService implementation
pub struct MessageServiceImpl<M, R>
where
    M: MessageRepository,
    R: RoomRepository,
{
    message_repo: Arc<M>,
    gate: RoomGate<R>,
    id_generator: Arc<SnowflakeGenerator>,
    clock: Arc<dyn Clock>,
}

impl<M, R> MessageServiceImpl<M, R>
where
    M: MessageRepository,
    R: RoomRepository,
{
    pub fn new(
        message_repo: Arc<M>,
        room_repo: Arc<R>,
        id_generator: Arc<SnowflakeGenerator>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            message_repo,
            gate: RoomGate::new(room_repo),
            id_generator,
            clock,
        }
    }

    async fn do_post(&self, room_id: i64, caller_id: i64, body: String) -> Result<ChatMessageDto, MessageError> {
        validate_body(&body)?;
        self.gate.check(RoomOperation::PostMessage, room_id, caller_id).await?;

        let message = Message {
            id: self.id_generator.generate(),
            room_id,
            sender_id: Some(caller_id),
            body,
            created_at: self.clock.now(),
        };

        let message = self.message_repo.create(&message).await.map_err(|e| match e {
            // Room deleted between the gate and the insert
            AppError::NotFound(_) => MessageError::RoomNotFound,
            e => MessageError::storage(e),
        })?;

        tracing::debug!(room_id, caller_id, message_id = message.id, "Message posted");
        Ok(message.into())
    }

    async fn do_edit(&self, room_id: i64, caller_id: i64, body: String) -> Result<u64, MessageError> {
        validate_body(&body)?;
        self.gate.check(RoomOperation::EditMessage, room_id, caller_id).await?;

        let updated = self
            .message_repo
            .update_by_sender(room_id, caller_id, &body)
            .await
            .map_err(|e| match e {
                AppError::NotFound(_) => MessageError::NotAMember,
                e => MessageError::storage(e),
            })?;

        tracing::debug!(room_id, caller_id, updated, "Messages edited");
        Ok(updated)
    }

    async fn do_delete(&self, room_id: i64, caller_id: i64) -> Result<u64, MessageError> {
        self.gate.check(RoomOperation::DeleteMessage, room_id, caller_id).await?;

        let deleted = self
            .message_repo
            .delete_by_sender(room_id, caller_id)
            .await
            .map_err(|e| match e {
                AppError::NotFound(_) => MessageError::NotAMember,
                e => MessageError::storage(e),
            })?;

        tracing::debug!(room_id, caller_id, deleted, "Messages deleted");
        Ok(deleted)
    }

    async fn do_list(&self, room_id: i64) -> Result<Vec<ChatMessageDto>, MessageError> {
        self.gate.check(RoomOperation::ListMessages, room_id, 0).await?;

        let messages = self
            .message_repo
            .list_by_room(room_id)
            .await
            .map_err(MessageError::storage)?;

        Ok(messages.into_iter().map(ChatMessageDto::from).collect())
    }
}

#[async_trait]
impl<M, R> MessageService for MessageServiceImpl<M, R>
where
    M: MessageRepository + 'static,
    R: RoomRepository + 'static,
{
    #[tracing::instrument(skip(self, body), fields(body_len = body.len()))]
    async fn post_message(&self, room_id: i64, caller_id: i64, body: String) -> Result<ChatMessageDto, MessageError> {
        observe(RoomOperation::PostMessage, self.do_post(room_id, caller_id, body).await)
    }

    #[tracing::instrument(skip(self, body))]
    async fn edit_message(&self, room_id: i64, caller_id: i64, body: String) -> Result<u64, MessageError> {
        observe(RoomOperation::EditMessage, self.do_edit(room_id, caller_id, body).await)
    }

    #[tracing::instrument(skip(self))]
    async fn delete_message(&self, room_id: i64, caller_id: i64) -> Result<u64, MessageError> {
        observe(RoomOperation::DeleteMessage, self.do_delete(room_id, caller_id).await)
    }

    async fn list_messages(&self, room_id: i64) -> Result<Vec<ChatMessageDto>, MessageError> {
        observe(RoomOperation::ListMessages, self.do_list(room_id).await)
    }
}
