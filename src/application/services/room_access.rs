//! Room Access Gate
//!
//! Evaluates the access rule of a [`RoomOperation`] against stored room and
//! membership state. Shared by the room and message workflows so both report
//! denials in the same order.

use std::sync::Arc;

use crate::domain::{AccessDenial, AccessLevel, RoomOperation, RoomRepository};
use crate::shared::error::AppError;

/// Outcome of a failed access check.
#[derive(Debug, thiserror::Error)]
pub enum AccessError {
    #[error("Access denied: {0:?}")]
    Denied(AccessDenial),

    #[error("Access check failed: {0}")]
    Storage(#[from] AppError),
}

/// Checks room existence, membership and role, in that order.
pub struct RoomGate<R: RoomRepository> {
    rooms: Arc<R>,
}

impl<R: RoomRepository> RoomGate<R> {
    pub fn new(rooms: Arc<R>) -> Self {
        Self { rooms }
    }

    /// Verify that `user_id` may perform `operation` in `room_id`.
    ///
    /// Stops at the first failing condition. Operations without a room scope
    /// pass without touching storage.
    pub async fn check(
        &self,
        operation: RoomOperation,
        room_id: i64,
        user_id: i64,
    ) -> Result<(), AccessError> {
        let Some(level) = operation.required_access() else {
            return Ok(());
        };

        self.require(level, room_id, user_id).await
    }

    async fn require(&self, level: AccessLevel, room_id: i64, user_id: i64) -> Result<(), AccessError> {
        if !self.rooms.room_exists(room_id).await? {
            return Err(AccessError::Denied(AccessDenial::RoomNotFound));
        }

        if level.requires_membership() && !self.rooms.is_member(room_id, user_id).await? {
            return Err(AccessError::Denied(AccessDenial::NotAMember));
        }

        if level.requires_admin() && !self.rooms.is_admin(room_id, user_id).await? {
            return Err(AccessError::Denied(AccessDenial::NotAnAdmin));
        }

        Ok(())
    }
}
