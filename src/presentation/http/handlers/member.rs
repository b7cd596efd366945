//! Room Membership Handlers

use axum::{extract::State, http::StatusCode, Json};
use validator::Validate;

use crate::application::dto::request::MembersRequest;
use crate::application::dto::response::MemberResponse;
use crate::presentation::http::extractors::{Caller, RoomId};
use crate::shared::error::AppError;
use crate::shared::validation::validation_error;
use crate::startup::AppState;

/// List room members
pub async fn list_members(
    State(state): State<AppState>,
    RoomId(room_id): RoomId,
) -> Result<Json<Vec<MemberResponse>>, AppError> {
    let members = state.room_service.get_room_members(room_id).await?;

    Ok(Json(members.into_iter().map(MemberResponse::from).collect()))
}

/// Add members (admin only)
pub async fn add_members(
    State(state): State<AppState>,
    Caller(caller): Caller,
    RoomId(room_id): RoomId,
    Json(body): Json<MembersRequest>,
) -> Result<StatusCode, AppError> {
    body.validate().map_err(validation_error)?;

    state
        .room_service
        .add_members(room_id, caller.user_id, body.user_ids)
        .await?;

    Ok(StatusCode::NO_CONTENT)
}

/// Remove members (admin only)
pub async fn remove_members(
    State(state): State<AppState>,
    Caller(caller): Caller,
    RoomId(room_id): RoomId,
    Json(body): Json<MembersRequest>,
) -> Result<StatusCode, AppError> {
    body.validate().map_err(validation_error)?;

    state
        .room_service
        .remove_members_by_admin(room_id, caller.user_id, body.user_ids)
        .await?;

    Ok(StatusCode::NO_CONTENT)
}

/// Leave a room
pub async fn leave_room(
    State(state): State<AppState>,
    Caller(caller): Caller,
    RoomId(room_id): RoomId,
) -> Result<StatusCode, AppError> {
    state.room_service.leave_room(room_id, caller.user_id).await?;

    Ok(StatusCode::NO_CONTENT)
}
