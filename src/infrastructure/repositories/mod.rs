//! Repository Implementations
//!
//! PostgreSQL implementations of domain repository traits.
//!
//! ## Usage Example
//!
//! ```rust,ignore
//! use sqlx::PgPool;
//! use crate::infrastructure::repositories::{PgMessageRepository, PgRoomRepository};
//!
//! async fn setup_repositories(pool: PgPool) {
//!     let room_repo = PgRoomRepository::new(pool.clone());
//!     let message_repo = PgMessageRepository::new(pool);
//! }
//! ```

pub mod message_repository;
pub mod room_repository;

pub use message_repository::PgMessageRepository;
pub use room_repository::PgRoomRepository;
