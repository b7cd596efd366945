//! Application Services
//!
//! Business logic services that coordinate domain operations.
//!
//! ## Available Services
//!
//! - **RoomService**: Room lifecycle and membership management
//! - **MessageService**: Room-scoped message CRUD
//!
//! Both authorize through the shared [`RoomGate`].

pub mod message_service;
pub mod room_access;
pub mod room_service;

pub use room_access::{AccessError, RoomGate};

pub use room_service::{
    CreateRoomDto, MemberDto, RoomDetailDto, RoomDto, RoomError, RoomService, RoomServiceImpl,
    RoomSummaryDto, UpdateRoomDto, MAX_ROOM_NAME_LENGTH,
};

pub use message_service::{ChatMessageDto, MessageError, MessageService, MessageServiceImpl};
