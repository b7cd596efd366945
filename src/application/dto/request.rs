//! Request DTOs
//!
//! Data structures for API request bodies.

use serde::Deserialize;
use validator::Validate;

use crate::application::services::MAX_ROOM_NAME_LENGTH;
use crate::domain::MAX_MESSAGE_LENGTH;

/// Create room request
#[derive(Debug, Deserialize, Validate)]
pub struct CreateRoomRequest {
    #[validate(length(min = 1, max = 100, message = "Name must be 1-100 characters"))]
    pub name: String,

    #[validate(length(max = 1000, message = "Description must be at most 1000 characters"))]
    pub description: Option<String>,
}

/// Update room request
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateRoomRequest {
    #[validate(length(min = 1, max = 100, message = "Name must be 1-100 characters"))]
    pub name: String,

    #[validate(length(max = 1000, message = "Description must be at most 1000 characters"))]
    pub description: Option<String>,
}

/// Add or remove members request
#[derive(Debug, Deserialize, Validate)]
pub struct MembersRequest {
    #[validate(length(min = 1, max = 100, message = "user_ids must contain 1-100 entries"))]
    pub user_ids: Vec<i64>,
}

/// Post or edit message request
#[derive(Debug, Deserialize, Validate)]
pub struct MessageRequest {
    #[validate(length(min = 1, max = 4000, message = "Message must be 1-4000 characters"))]
    pub body: String,
}

// Literal bounds in the validate attributes must track the domain limits
const _: () = assert!(MAX_ROOM_NAME_LENGTH == 100);
const _: () = assert!(MAX_MESSAGE_LENGTH == 4000);
