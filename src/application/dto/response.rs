//! Response DTOs
//!
//! Data structures for API response bodies. Snowflake IDs are serialized as
//! strings so JavaScript clients do not lose precision.

use serde::Serialize;

use crate::application::services::{ChatMessageDto, MemberDto, RoomDetailDto, RoomDto, RoomSummaryDto};
use crate::domain::MemberRole;

/// Room response
#[derive(Debug, Serialize)]
pub struct RoomResponse {
    pub id: String,
    pub name: String,
    pub description: Option<String>,
    pub creator_id: String,
    pub created_at: String,
}

impl From<RoomDto> for RoomResponse {
    fn from(room: RoomDto) -> Self {
        Self {
            id: room.id.to_string(),
            name: room.name,
            description: room.description,
            creator_id: room.creator_id.to_string(),
            created_at: room.created_at.to_rfc3339(),
        }
    }
}

/// Room list entry
#[derive(Debug, Serialize)]
pub struct RoomSummaryResponse {
    pub id: String,
    pub name: String,
    pub description: Option<String>,
}

impl From<RoomSummaryDto> for RoomSummaryResponse {
    fn from(room: RoomSummaryDto) -> Self {
        Self {
            id: room.id.to_string(),
            name: room.name,
            description: room.description,
        }
    }
}

/// Member response
#[derive(Debug, Serialize)]
pub struct MemberResponse {
    pub user_id: Option<String>,
    pub role: MemberRole,
}

impl From<MemberDto> for MemberResponse {
    fn from(member: MemberDto) -> Self {
        Self {
            user_id: member.user_id.map(|id| id.to_string()),
            role: member.role,
        }
    }
}

/// Room detail response (room fields plus members)
#[derive(Debug, Serialize)]
pub struct RoomDetailResponse {
    #[serde(flatten)]
    pub room: RoomResponse,
    pub members: Vec<MemberResponse>,
}

impl From<RoomDetailDto> for RoomDetailResponse {
    fn from(detail: RoomDetailDto) -> Self {
        Self {
            room: detail.room.into(),
            members: detail.members.into_iter().map(MemberResponse::from).collect(),
        }
    }
}

/// Message response
#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub id: String,
    pub room_id: String,
    pub sender_id: Option<String>,
    pub body: String,
    pub time: String,
}

impl From<ChatMessageDto> for MessageResponse {
    fn from(message: ChatMessageDto) -> Self {
        Self {
            id: message.id.to_string(),
            room_id: message.room_id.to_string(),
            sender_id: message.sender_id.map(|id| id.to_string()),
            body: message.body,
            time: message.time.to_rfc3339(),
        }
    }
}

/// Result of a bulk message mutation
#[derive(Debug, Serialize)]
pub struct AffectedResponse {
    pub affected: u64,
}

