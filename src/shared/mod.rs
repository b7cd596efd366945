//! Shared Utilities
//!
//! Common utilities used across all layers.

pub mod clock;
pub mod error;
pub mod snowflake;
pub mod validation;
