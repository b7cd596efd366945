//! # Domain Services
//!
//! Domain rules that don't naturally belong to a single entity.
//!
//! - **RoomAccessPolicy**: Which room operations require which membership level

mod access_policy;

pub use access_policy::*;
