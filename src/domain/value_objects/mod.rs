//! # Domain Value Objects
//!
//! Immutable value types that represent domain concepts without identity.
//!
//! - **CallerIdentity**: The verified user on whose behalf an operation runs

mod identity;

pub use identity::*;
