//! Room access rules.
//!
//! Every room operation requires one of three access levels. The checks for
//! a level run in a fixed order (room existence, then membership, then role)
//! so that the first failing condition decides the reported denial.

use serde::Serialize;

/// Minimum standing a caller needs for an operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum AccessLevel {
    /// Room must exist; any authenticated caller passes.
    Authenticated,
    /// Caller must hold a membership in the room.
    Member,
    /// Caller must hold the admin role in the room.
    Admin,
}

impl AccessLevel {
    pub fn requires_membership(&self) -> bool {
        *self >= AccessLevel::Member
    }

    pub fn requires_admin(&self) -> bool {
        *self == AccessLevel::Admin
    }
}

/// Operations exposed by the room and message workflows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RoomOperation {
    CreateRoom,
    UpdateRoom,
    DeleteRoom,
    GetRoomDetail,
    ListRooms,
    GetRoomMembers,
    AddMembers,
    RemoveMembers,
    LeaveRoom,
    PostMessage,
    EditMessage,
    DeleteMessage,
    ListMessages,
}

impl RoomOperation {
    /// Access level the caller must reach in the target room.
    ///
    /// `None` for operations that are not scoped to an existing room.
    pub fn required_access(&self) -> Option<AccessLevel> {
        match self {
            Self::CreateRoom | Self::ListRooms => None,
            Self::GetRoomDetail | Self::GetRoomMembers | Self::ListMessages => {
                Some(AccessLevel::Authenticated)
            }
            Self::LeaveRoom | Self::PostMessage | Self::EditMessage | Self::DeleteMessage => {
                Some(AccessLevel::Member)
            }
            Self::UpdateRoom | Self::DeleteRoom | Self::AddMembers | Self::RemoveMembers => {
                Some(AccessLevel::Admin)
            }
        }
    }

    /// Stable label used in logs and metrics.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::CreateRoom => "create_room",
            Self::UpdateRoom => "update_room",
            Self::DeleteRoom => "delete_room",
            Self::GetRoomDetail => "get_room_detail",
            Self::ListRooms => "list_rooms",
            Self::GetRoomMembers => "get_room_members",
            Self::AddMembers => "add_members",
            Self::RemoveMembers => "remove_members",
            Self::LeaveRoom => "leave_room",
            Self::PostMessage => "post_message",
            Self::EditMessage => "edit_message",
            Self::DeleteMessage => "delete_message",
            Self::ListMessages => "list_messages",
        }
    }
}

/// Why a caller was turned away from a room.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccessDenial {
    RoomNotFound,
    NotAMember,
    NotAnAdmin,
}
