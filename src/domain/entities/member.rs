//! Room membership entity.
//!
//! Maps to the `room_members` table in the database schema.

use serde::{Deserialize, Serialize};

/// Role a user holds inside a room.
///
/// Stored as lowercase text with a `CHECK (role IN ('admin', 'member'))`
/// constraint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum MemberRole {
    /// May update or delete the room and manage its members
    Admin,
    #[default]
    Member,
}

impl MemberRole {
    /// Convert from database string representation.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "admin" => Some(Self::Admin),
            "member" => Some(Self::Member),
            _ => None,
        }
    }

    /// Convert to database string representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Admin => "admin",
            Self::Member => "member",
        }
    }

    pub fn is_admin(&self) -> bool {
        matches!(self, Self::Admin)
    }
}

impl std::fmt::Display for MemberRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A user's membership in a room.
///
/// Maps to the `room_members` table:
/// - id: BIGSERIAL PRIMARY KEY
/// - room_id: BIGINT NOT NULL REFERENCES rooms(id) ON DELETE CASCADE
/// - user_id: BIGINT NULL REFERENCES users(id) ON DELETE SET NULL
/// - role: VARCHAR(16) NOT NULL
/// - UNIQUE (room_id, user_id)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Membership {
    /// Surrogate row ID
    pub id: i64,

    pub room_id: i64,

    /// None once the user account has been deleted
    pub user_id: Option<i64>,

    pub role: MemberRole,
}
