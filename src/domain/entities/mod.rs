//! # Domain Entities
//!
//! Core domain entities representing the main business objects in the chat server.
//! All entities map directly to their corresponding database tables.
//!
//! - **Room**: A named chat channel that owns its memberships and messages
//! - **Membership**: The binding of a user to a room with a role
//! - **Message**: A text message posted into a room
//!
//! ## Repository Traits
//!
//! Each aggregate has an associated repository trait defining data access operations.
//! These traits are implemented in the infrastructure layer, following the
//! dependency inversion principle.

mod member;
mod message;
mod room;

pub use member::{MemberRole, Membership};
pub use message::{Message, MessageRepository, MAX_MESSAGE_LENGTH};
pub use room::{MembershipError, Room, RoomDetail, RoomRepository, RoomSummary};

#[cfg(test)]
pub use message::MockMessageRepository;
#[cfg(test)]
pub use room::MockRoomRepository;
