//! Middleware
//!
//! Tower middleware for request processing.

pub mod auth;
pub mod cors;
pub mod logging;

pub use auth::{auth_middleware, decode_caller, Claims};
pub use logging::{create_trace_layer, track_metrics};
