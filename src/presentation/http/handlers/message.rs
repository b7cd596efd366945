//! Message Handlers

use axum::{extract::State, http::StatusCode, Json};
use validator::Validate;

use crate::application::dto::request::MessageRequest;
use crate::application::dto::response::{AffectedResponse, MessageResponse};
use crate::presentation::http::extractors::{Caller, RoomId};
use crate::shared::error::AppError;
use crate::shared::validation::validation_error;
use crate::startup::AppState;

/// List messages in a room, oldest first
pub async fn list_messages(
    State(state): State<AppState>,
    RoomId(room_id): RoomId,
) -> Result<Json<Vec<MessageResponse>>, AppError> {
    let messages = state.message_service.list_messages(room_id).await?;

    Ok(Json(messages.into_iter().map(MessageResponse::from).collect()))
}

/// Post a message
pub async fn post_message(
    State(state): State<AppState>,
    Caller(caller): Caller,
    RoomId(room_id): RoomId,
    Json(body): Json<MessageRequest>,
) -> Result<(StatusCode, Json<MessageResponse>), AppError> {
    body.validate().map_err(validation_error)?;

    let message = state
        .message_service
        .post_message(room_id, caller.user_id, body.body)
        .await?;

    Ok((StatusCode::CREATED, Json(MessageResponse::from(message))))
}

/// Edit all of the caller's messages in a room
pub async fn edit_messages(
    State(state): State<AppState>,
    Caller(caller): Caller,
    RoomId(room_id): RoomId,
    Json(body): Json<MessageRequest>,
) -> Result<Json<AffectedResponse>, AppError> {
    body.validate().map_err(validation_error)?;

    let affected = state
        .message_service
        .edit_message(room_id, caller.user_id, body.body)
        .await?;

    Ok(Json(AffectedResponse { affected }))
}

/// Delete all of the caller's messages in a room
pub async fn delete_messages(
    State(state): State<AppState>,
    Caller(caller): Caller,
    RoomId(room_id): RoomId,
) -> Result<StatusCode, AppError> {
    state
        .message_service
        .delete_message(room_id, caller.user_id)
        .await?;

    Ok(StatusCode::NO_CONTENT)
}
