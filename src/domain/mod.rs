//! # Domain Layer
//!
//! The domain layer contains the core business types of the chat server.
//! It is independent of any external frameworks or infrastructure concerns.
//!
//! ## Structure
//!
//! - **entities**: Rooms, memberships, messages and their repository traits
//! - **value_objects**: Immutable value types (CallerIdentity)
//! - **services**: Room access rules shared by every workflow
//!
//! ## Design Principles
//!
//! - No dependencies on infrastructure or presentation layers
//! - Repository traits define data access contracts

pub mod entities;
pub mod services;
pub mod value_objects;

// Re-export commonly used types
pub use entities::*;
pub use services::*;
pub use value_objects::*;
