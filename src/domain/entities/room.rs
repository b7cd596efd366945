//! Room entity and repository trait.
//!
//! Maps to the `rooms` table in the database schema. The repository also
//! owns membership data access because every membership query is scoped
//! to a room.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::member::Membership;
use crate::shared::error::AppError;

/// Represents a chat room.
///
/// Maps to the `rooms` table:
/// - id: BIGINT PRIMARY KEY (Snowflake ID)
/// - name: VARCHAR(100) NOT NULL
/// - description: TEXT NULL
/// - creator_id: BIGINT NOT NULL REFERENCES users(id)
/// - created_at: TIMESTAMPTZ NOT NULL DEFAULT NOW()
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Room {
    /// Snowflake ID (primary key)
    pub id: i64,

    /// Room name (1-100 characters)
    pub name: String,

    /// Optional free-form description
    pub description: Option<String>,

    /// User who created the room. Never changes after creation.
    pub creator_id: i64,

    /// Room creation timestamp
    pub created_at: DateTime<Utc>,
}

impl Room {
    /// Build a new, not yet persisted room.
    pub fn new(
        id: i64,
        name: impl Into<String>,
        description: Option<String>,
        creator_id: i64,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            description,
            creator_id,
            created_at,
        }
    }
}

/// Compact room view used when listing a user's rooms.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoomSummary {
    pub id: i64,
    pub name: String,
    pub description: Option<String>,
}

impl From<Room> for RoomSummary {
    fn from(room: Room) -> Self {
        Self {
            id: room.id,
            name: room.name,
            description: room.description,
        }
    }
}

/// A room together with its complete membership list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoomDetail {
    pub room: Room,
    pub members: Vec<Membership>,
}

impl RoomDetail {
    /// Number of members currently holding the admin role.
    pub fn admin_count(&self) -> usize {
        self.members.iter().filter(|m| m.role.is_admin()).count()
    }
}

/// Why a bulk membership write was refused.
#[derive(Debug, thiserror::Error)]
pub enum MembershipError {
    #[error("Room {0} not found")]
    RoomNotFound(i64),

    #[error("User {0} is not an admin of the room")]
    NotAdmin(i64),

    #[error("Users {0:?} are already members of the room")]
    AlreadyMembers(Vec<i64>),

    #[error("Users {0:?} are not members of the room")]
    NotMembers(Vec<i64>),

    #[error("One or more users do not exist")]
    UnknownUsers,

    #[error(transparent)]
    Storage(#[from] AppError),
}

impl From<sqlx::Error> for MembershipError {
    fn from(err: sqlx::Error) -> Self {
        MembershipError::Storage(AppError::Database(err))
    }
}

/// Repository trait for room and membership data access.
///
/// Implementations enforce no business rules beyond the atomicity of the
/// multi-row writes and the admin re-check inside bulk membership writes.
/// "Not found" is reported through the return value (`false`,
/// `AppError::NotFound`), storage failures as `AppError::Database`.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RoomRepository: Send + Sync {
    /// Check whether a room exists.
    async fn room_exists(&self, room_id: i64) -> Result<bool, AppError>;

    /// Check whether a user holds any membership in a room.
    async fn is_member(&self, room_id: i64, user_id: i64) -> Result<bool, AppError>;

    /// Check whether a user holds the admin role in a room.
    async fn is_admin(&self, room_id: i64, user_id: i64) -> Result<bool, AppError>;

    /// Insert a room and its creator's admin membership in one transaction.
    async fn create_room_with_creator(&self, room: &Room, creator_id: i64) -> Result<Room, AppError>;

    /// Update name and description. `NotFound` when no row matched.
    async fn update_room(
        &self,
        room_id: i64,
        name: &str,
        description: Option<String>,
    ) -> Result<Room, AppError>;

    /// Delete a room. Memberships and messages go with it via FK cascade.
    async fn delete_room(&self, room_id: i64) -> Result<(), AppError>;

    /// Rooms in which the user holds any membership.
    async fn list_rooms_for_user(&self, user_id: i64) -> Result<Vec<RoomSummary>, AppError>;

    /// Room plus its full membership list. `NotFound` if the room is absent.
    async fn get_room_detail(&self, room_id: i64) -> Result<RoomDetail, AppError>;

    /// All memberships of a room.
    async fn list_members(&self, room_id: i64) -> Result<Vec<Membership>, AppError>;

    /// Add every target as a `member`, or nobody.
    ///
    /// Room existence and the admin role of `admin_id` are re-checked in the
    /// same transaction as the insert. Fails with `AlreadyMembers` before
    /// writing anything if any target already holds a membership.
    async fn add_members(
        &self,
        room_id: i64,
        admin_id: i64,
        user_ids: &[i64],
    ) -> Result<(), MembershipError>;

    /// Remove every target, or nobody.
    ///
    /// Same in-transaction checks as `add_members`. Fails with `NotMembers`
    /// before deleting anything if any target holds no membership.
    async fn remove_members(
        &self,
        room_id: i64,
        admin_id: i64,
        user_ids: &[i64],
    ) -> Result<(), MembershipError>;

    /// Delete a single membership row. Returns the number of rows removed.
    async fn remove_member(&self, room_id: i64, user_id: i64) -> Result<u64, AppError>;
}
