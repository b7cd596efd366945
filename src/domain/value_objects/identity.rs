//! Caller identity value object.

use serde::{Deserialize, Serialize};

/// The authenticated user attached to an incoming operation.
///
/// Produced by the identity layer after the bearer token has been verified.
/// Workflow operations only ever see identities with `verified == true`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CallerIdentity {
    pub user_id: i64,
    pub verified: bool,
}

impl CallerIdentity {
    pub fn new(user_id: i64, verified: bool) -> Self {
        Self { user_id, verified }
    }
}
