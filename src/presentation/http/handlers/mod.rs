//! HTTP Handlers
//!
//! Request handlers for all HTTP endpoints.

pub mod health;
pub mod member;
pub mod message;
pub mod room;

use crate::application::services::{MessageError, RoomError};
use crate::shared::error::AppError;

impl From<RoomError> for AppError {
    fn from(err: RoomError) -> Self {
        match err {
            RoomError::RoomNotFound => AppError::NotFound("Room not found".into()),
            RoomError::Unauthorized => {
                AppError::Forbidden("Not allowed to perform this operation in the room".into())
            }
            RoomError::AlreadyMember => {
                AppError::Conflict("One or more users are already members of the room".into())
            }
            RoomError::NotAMember => {
                AppError::NotFound("One or more users are not members of the room".into())
            }
            RoomError::BadRequest(msg) => AppError::BadRequest(msg),
            RoomError::Storage(msg) => AppError::Internal(msg),
        }
    }
}

impl From<MessageError> for AppError {
    fn from(err: MessageError) -> Self {
        match err {
            MessageError::RoomNotFound => AppError::NotFound("Room not found".into()),
            MessageError::Unauthorized => AppError::Forbidden("Not a member of the room".into()),
            MessageError::NotAMember => {
                AppError::NotFound("No messages from the caller in the room".into())
            }
            MessageError::BadRequest(msg) => AppError::BadRequest(msg),
            MessageError::Storage(msg) => AppError::Internal(msg),
        }
    }
}
