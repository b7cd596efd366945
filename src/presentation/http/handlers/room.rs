//! Room Handlers

use axum::{extract::State, http::StatusCode, Json};
use validator::Validate;

use crate::application::dto::request::{CreateRoomRequest, UpdateRoomRequest};
use crate::application::dto::response::{RoomDetailResponse, RoomResponse, RoomSummaryResponse};
use crate::application::services::{CreateRoomDto, UpdateRoomDto};
use crate::presentation::http::extractors::{Caller, RoomId};
use crate::shared::error::AppError;
use crate::shared::validation::validation_error;
use crate::startup::AppState;

/// List rooms the caller belongs to
pub async fn list_rooms(
    State(state): State<AppState>,
    Caller(caller): Caller,
) -> Result<Json<Vec<RoomSummaryResponse>>, AppError> {
    let rooms = state.room_service.list_rooms_for_user(caller.user_id).await?;

    Ok(Json(rooms.into_iter().map(RoomSummaryResponse::from).collect()))
}

/// Create a new room
pub async fn create_room(
    State(state): State<AppState>,
    Caller(caller): Caller,
    Json(body): Json<CreateRoomRequest>,
) -> Result<(StatusCode, Json<RoomResponse>), AppError> {
    body.validate().map_err(validation_error)?;

    let request = CreateRoomDto {
        name: body.name,
        description: body.description,
    };

    let room = state.room_service.create_room(caller.user_id, request).await?;

    Ok((StatusCode::CREATED, Json(RoomResponse::from(room))))
}

/// Get a room with its members
pub async fn get_room(
    State(state): State<AppState>,
    RoomId(room_id): RoomId,
) -> Result<Json<RoomDetailResponse>, AppError> {
    let detail = state.room_service.get_room_detail(room_id).await?;

    Ok(Json(RoomDetailResponse::from(detail)))
}

/// Update room name and description
pub async fn update_room(
    State(state): State<AppState>,
    Caller(caller): Caller,
    RoomId(room_id): RoomId,
    Json(body): Json<UpdateRoomRequest>,
) -> Result<Json<RoomResponse>, AppError> {
    body.validate().map_err(validation_error)?;

    let update = UpdateRoomDto {
        name: body.name,
        description: body.description,
    };

    let room = state
        .room_service
        .update_room(room_id, caller.user_id, update)
        .await?;

    Ok(Json(RoomResponse::from(room)))
}

/// Delete a room
pub async fn delete_room(
    State(state): State<AppState>,
    Caller(caller): Caller,
    RoomId(room_id): RoomId,
) -> Result<StatusCode, AppError> {
    state.room_service.delete_room(room_id, caller.user_id).await?;

    Ok(StatusCode::NO_CONTENT)
}
