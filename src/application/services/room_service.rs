//! Room Service
//!
//! Room lifecycle and membership management, gated by room role.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::Serialize;

use super::room_access::{AccessError, RoomGate};
use crate::domain::{
    AccessDenial, MemberRole, Membership, MembershipError, Room, RoomDetail, RoomOperation,
    RoomRepository, RoomSummary,
};
use crate::infrastructure::metrics;
use crate::shared::clock::Clock;
use crate::shared::error::AppError;
use crate::shared::snowflake::SnowflakeGenerator;

/// Maximum room name length in characters.
pub const MAX_ROOM_NAME_LENGTH: usize = 100;

/// Room service trait
#[async_trait]
pub trait RoomService: Send + Sync {
    /// Create a room; the caller becomes its sole admin
    async fn create_room(&self, caller_id: i64, request: CreateRoomDto) -> Result<RoomDto, RoomError>;

    /// Replace name and description (admin only)
    async fn update_room(
        &self,
        room_id: i64,
        caller_id: i64,
        request: UpdateRoomDto,
    ) -> Result<RoomDto, RoomError>;

    /// Delete a room with all memberships and messages (admin only)
    async fn delete_room(&self, room_id: i64, caller_id: i64) -> Result<(), RoomError>;

    /// Room fields plus the membership list
    async fn get_room_detail(&self, room_id: i64) -> Result<RoomDetailDto, RoomError>;

    /// Rooms the caller belongs to
    async fn list_rooms_for_user(&self, caller_id: i64) -> Result<Vec<RoomSummaryDto>, RoomError>;

    /// Add users as plain members, all or none (admin only)
    async fn add_members(&self, room_id: i64, caller_id: i64, user_ids: Vec<i64>) -> Result<(), RoomError>;

    /// Remove users from the room, all or none (admin only)
    async fn remove_members_by_admin(
        &self,
        room_id: i64,
        caller_id: i64,
        user_ids: Vec<i64>,
    ) -> Result<(), RoomError>;

    /// Drop the caller's own membership
    async fn leave_room(&self, room_id: i64, caller_id: i64) -> Result<(), RoomError>;

    /// Membership list of a room
    async fn get_room_members(&self, room_id: i64) -> Result<Vec<MemberDto>, RoomError>;
}

/// Create room request
#[derive(Debug, Clone)]
pub struct CreateRoomDto {
    pub name: String,
    pub description: Option<String>,
}

/// Update room request. Both fields replace the stored values.
#[derive(Debug, Clone)]
pub struct UpdateRoomDto {
    pub name: String,
    pub description: Option<String>,
}

/// Room data transfer object
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RoomDto {
    pub id: i64,
    pub name: String,
    pub description: Option<String>,
    pub creator_id: i64,
    pub created_at: DateTime<Utc>,
}

impl From<Room> for RoomDto {
    fn from(room: Room) -> Self {
        Self {
            id: room.id,
            name: room.name,
            description: room.description,
            creator_id: room.creator_id,
            created_at: room.created_at,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RoomSummaryDto {
    pub id: i64,
    pub name: String,
    pub description: Option<String>,
}

impl From<RoomSummary> for RoomSummaryDto {
    fn from(summary: RoomSummary) -> Self {
        Self {
            id: summary.id,
            name: summary.name,
            description: summary.description,
        }
    }
}

/// Member data transfer object
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MemberDto {
    /// None when the member's account has been deleted
    pub user_id: Option<i64>,
    pub role: MemberRole,
}

impl From<Membership> for MemberDto {
    fn from(membership: Membership) -> Self {
        Self {
            user_id: membership.user_id,
            role: membership.role,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RoomDetailDto {
    pub room: RoomDto,
    pub members: Vec<MemberDto>,
}

impl From<RoomDetail> for RoomDetailDto {
    fn from(detail: RoomDetail) -> Self {
        Self {
            room: detail.room.into(),
            members: detail.members.into_iter().map(MemberDto::from).collect(),
        }
    }
}

/// Room service errors
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RoomError {
    #[error("Room not found")]
    RoomNotFound,

    #[error("Caller is not allowed to perform this operation")]
    Unauthorized,

    #[error("User is already a member of the room")]
    AlreadyMember,

    #[error("User is not a member of the room")]
    NotAMember,

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Storage error: {0}")]
    Storage(String),
}

impl RoomError {
    /// Metric label for this outcome.
    pub fn outcome(&self) -> &'static str {
        match self {
            RoomError::RoomNotFound => "room_not_found",
            RoomError::Unauthorized => "unauthorized",
            RoomError::AlreadyMember => "already_member",
            RoomError::NotAMember => "not_a_member",
            RoomError::BadRequest(_) => "bad_request",
            RoomError::Storage(_) => "storage_error",
        }
    }

    /// Wrap a repository failure that has no semantic meaning at this call site.
    fn storage(err: AppError) -> Self {
        tracing::error!(error = %err, "Room storage failure");
        RoomError::Storage(err.to_string())
    }
}

impl From<MembershipError> for RoomError {
    fn from(err: MembershipError) -> Self {
        match err {
            MembershipError::RoomNotFound(_) => RoomError::RoomNotFound,
            MembershipError::NotAdmin(_) => RoomError::Unauthorized,
            MembershipError::AlreadyMembers(_) => RoomError::AlreadyMember,
            MembershipError::NotMembers(_) => RoomError::NotAMember,
            e @ MembershipError::UnknownUsers => RoomError::BadRequest(e.to_string()),
            MembershipError::Storage(e) => RoomError::storage(e),
        }
    }
}

impl From<AccessError> for RoomError {
    fn from(err: AccessError) -> Self {
        match err {
            AccessError::Denied(AccessDenial::RoomNotFound) => RoomError::RoomNotFound,
            AccessError::Denied(AccessDenial::NotAMember | AccessDenial::NotAnAdmin) => {
                RoomError::Unauthorized
            }
            AccessError::Storage(e) => RoomError::storage(e),
        }
    }
}

/// Validate and normalize a room name.
fn normalize_name(name: &str) -> Result<String, RoomError> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(RoomError::BadRequest("Room name must not be empty".into()));
    }
    if trimmed.chars().count() > MAX_ROOM_NAME_LENGTH {
        return Err(RoomError::BadRequest(format!(
            "Room name must be at most {} characters",
            MAX_ROOM_NAME_LENGTH
        )));
    }
    Ok(trimmed.to_string())
}

fn require_targets(user_ids: &[i64]) -> Result<(), RoomError> {
    if user_ids.is_empty() {
        return Err(RoomError::BadRequest("user_ids must not be empty".into()));
    }
    Ok(())
}

/// Count the outcome of a workflow call.
fn observe<T>(operation: RoomOperation, result: Result<T, RoomError>) -> Result<T, RoomError> {
    let outcome = match &result {
        Ok(_) => "ok",
        Err(e) => e.outcome(),
    };
    metrics::record_room_operation(operation.as_str(), outcome);
    result
}

/// RoomService implementation
pub struct RoomServiceImpl<R>
where
    R: RoomRepository,
{
    room_repo: Arc<R>,
    gate: RoomGate<R>,
    id_generator: Arc<SnowflakeGenerator>,
    clock: Arc<dyn Clock>,
}

impl<R> RoomServiceImpl<R>
where
    R: RoomRepository,
{
    pub fn new(room_repo: Arc<R>, id_generator: Arc<SnowflakeGenerator>, clock: Arc<dyn Clock>) -> Self {
        Self {
            gate: RoomGate::new(Arc::clone(&room_repo)),
            room_repo,
            id_generator,
            clock,
        }
    }

    async fn do_create_room(&self, caller_id: i64, request: CreateRoomDto) -> Result<RoomDto, RoomError> {
        let name = normalize_name(&request.name)?;
        let room = Room::new(
            self.id_generator.generate(),
            name,
            request.description,
            caller_id,
            self.clock.now(),
        );

        let room = self
            .room_repo
            .create_room_with_creator(&room, caller_id)
            .await
            .map_err(|e| match e {
                AppError::BadRequest(msg) => RoomError::BadRequest(msg),
                e => RoomError::storage(e),
            })?;

        tracing::info!(room_id = room.id, creator_id = caller_id, "Room created");
        Ok(room.into())
    }

    async fn do_update_room(
        &self,
        room_id: i64,
        caller_id: i64,
        request: UpdateRoomDto,
    ) -> Result<RoomDto, RoomError> {
        let name = normalize_name(&request.name)?;
        self.gate.check(RoomOperation::UpdateRoom, room_id, caller_id).await?;

        let room = self
            .room_repo
            .update_room(room_id, &name, request.description)
            .await
            .map_err(|e| match e {
                AppError::NotFound(_) => RoomError::RoomNotFound,
                e => RoomError::storage(e),
            })?;

        tracing::info!(room_id, caller_id, "Room updated");
        Ok(room.into())
    }

    async fn do_delete_room(&self, room_id: i64, caller_id: i64) -> Result<(), RoomError> {
        self.gate.check(RoomOperation::DeleteRoom, room_id, caller_id).await?;

        self.room_repo.delete_room(room_id).await.map_err(|e| match e {
            AppError::NotFound(_) => RoomError::RoomNotFound,
            e => RoomError::storage(e),
        })?;

        tracing::info!(room_id, caller_id, "Room deleted");
        Ok(())
    }

    async fn do_add_members(&self, room_id: i64, caller_id: i64, user_ids: Vec<i64>) -> Result<(), RoomError> {
        require_targets(&user_ids)?;
        self.gate.check(RoomOperation::AddMembers, room_id, caller_id).await?;

        self.room_repo
            .add_members(room_id, caller_id, &user_ids)
            .await?;

        tracing::info!(room_id, caller_id, requested = user_ids.len(), "Members added");
        Ok(())
    }

    async fn do_remove_members(&self, room_id: i64, caller_id: i64, user_ids: Vec<i64>) -> Result<(), RoomError> {
        require_targets(&user_ids)?;
        self.gate.check(RoomOperation::RemoveMembers, room_id, caller_id).await?;

        self.room_repo
            .remove_members(room_id, caller_id, &user_ids)
            .await?;

        tracing::info!(room_id, caller_id, requested = user_ids.len(), "Members removed");
        Ok(())
    }

    async fn do_leave_room(&self, room_id: i64, caller_id: i64) -> Result<(), RoomError> {
        self.gate.check(RoomOperation::LeaveRoom, room_id, caller_id).await?;

        let removed = self
            .room_repo
            .remove_member(room_id, caller_id)
            .await
            .map_err(RoomError::storage)?;

        if removed == 0 {
            // Membership vanished between the gate and the delete
            tracing::warn!(room_id, caller_id, "Leave removed no membership row");
        } else {
            tracing::info!(room_id, caller_id, "Member left room");
        }
        Ok(())
    }
}

#[async_trait]
impl<R> RoomService for RoomServiceImpl<R>
where
    R: RoomRepository + 'static,
{
    #[tracing::instrument(skip(self, request))]
    async fn create_room(&self, caller_id: i64, request: CreateRoomDto) -> Result<RoomDto, RoomError> {
        observe(RoomOperation::CreateRoom, self.do_create_room(caller_id, request).await)
    }

    #[tracing::instrument(skip(self, request))]
    async fn update_room(
        &self,
        room_id: i64,
        caller_id: i64,
        request: UpdateRoomDto,
    ) -> Result<RoomDto, RoomError> {
        observe(
            RoomOperation::UpdateRoom,
            self.do_update_room(room_id, caller_id, request).await,
        )
    }

    #[tracing::instrument(skip(self))]
    async fn delete_room(&self, room_id: i64, caller_id: i64) -> Result<(), RoomError> {
        observe(RoomOperation::DeleteRoom, self.do_delete_room(room_id, caller_id).await)
    }

    async fn get_room_detail(&self, room_id: i64) -> Result<RoomDetailDto, RoomError> {
        let result = self
            .room_repo
            .get_room_detail(room_id)
            .await
            .map(|detail| {
                if detail.admin_count() == 0 {
                    tracing::debug!(room_id, "Room has no admin left");
                }
                RoomDetailDto::from(detail)
            })
            .map_err(|e| match e {
                AppError::NotFound(_) => RoomError::RoomNotFound,
                e => RoomError::storage(e),
            });

        observe(RoomOperation::GetRoomDetail, result)
    }

    async fn list_rooms_for_user(&self, caller_id: i64) -> Result<Vec<RoomSummaryDto>, RoomError> {
        let result = self
            .room_repo
            .list_rooms_for_user(caller_id)
            .await
            .map(|rooms| rooms.into_iter().map(RoomSummaryDto::from).collect())
            .map_err(RoomError::storage);

        observe(RoomOperation::ListRooms, result)
    }

    #[tracing::instrument(skip(self, user_ids), fields(targets = user_ids.len()))]
    async fn add_members(&self, room_id: i64, caller_id: i64, user_ids: Vec<i64>) -> Result<(), RoomError> {
        observe(
            RoomOperation::AddMembers,
            self.do_add_members(room_id, caller_id, user_ids).await,
        )
    }

    #[tracing::instrument(skip(self, user_ids), fields(targets = user_ids.len()))]
    async fn remove_members_by_admin(
        &self,
        room_id: i64,
        caller_id: i64,
        user_ids: Vec<i64>,
    ) -> Result<(), RoomError> {
        observe(
            RoomOperation::RemoveMembers,
            self.do_remove_members(room_id, caller_id, user_ids).await,
        )
    }

    #[tracing::instrument(skip(self))]
    async fn leave_room(&self, room_id: i64, caller_id: i64) -> Result<(), RoomError> {
        observe(RoomOperation::LeaveRoom, self.do_leave_room(room_id, caller_id).await)
    }

    async fn get_room_members(&self, room_id: i64) -> Result<Vec<MemberDto>, RoomError> {
        let result: Result<Vec<MemberDto>, RoomError> = async {
            // Room-scoped read: no caller standing is checked
            self.gate.check(RoomOperation::GetRoomMembers, room_id, 0).await?;
            let members = self
                .room_repo
                .list_members(room_id)
                .await
                .map_err(RoomError::storage)?;
            Ok(members.into_iter().map(MemberDto::from).collect())
        }
        .await;

        observe(RoomOperation::GetRoomMembers, result)
    }
}
