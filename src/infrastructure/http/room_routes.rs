//! Room API routes

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde_json::Value;
use std::sync::Arc;

use super::auth::AuthUser;
use super::deleted;
use super::error::{parse_id, ApiResult, JsonBody};
use crate::application::dto::{CreateRoomRequestDto, RoomWithFurnitureDto, UpdateRoomRequestDto};
use crate::application::services::RoomService;
use crate::domain::entities::Room;
use crate::infrastructure::state::AppState;

pub async fn list_rooms(
    State(state): State<Arc<AppState>>,
    AuthUser(user): AuthUser,
    Path(project_id): Path<String>,
) -> ApiResult<Json<Vec<Room>>> {
    let project_id = parse_id(&project_id)?;
    Ok(Json(state.room_service.list_rooms(project_id, user).await?))
}

pub async fn create_room(
    State(state): State<Arc<AppState>>,
    AuthUser(user): AuthUser,
    Path(project_id): Path<String>,
    JsonBody(req): JsonBody<CreateRoomRequestDto>,
) -> ApiResult<(StatusCode, Json<Room>)> {
    let project_id = parse_id(&project_id)?;
    let room = state.room_service.create_room(project_id, user, req).await?;
    Ok((StatusCode::CREATED, Json(room)))
}

pub async fn get_room(
    State(state): State<Arc<AppState>>,
    AuthUser(user): AuthUser,
    Path(id): Path<String>,
) -> ApiResult<Json<RoomWithFurnitureDto>> {
    let id = parse_id(&id)?;
    Ok(Json(state.room_service.get_room(id, user).await?))
}

pub async fn update_room(
    State(state): State<Arc<AppState>>,
    AuthUser(user): AuthUser,
    Path(id): Path<String>,
    JsonBody(req): JsonBody<UpdateRoomRequestDto>,
) -> ApiResult<Json<Room>> {
    let id = parse_id(&id)?;
    Ok(Json(state.room_service.update_room(id, user, req).await?))
}

pub async fn delete_room(
    State(state): State<Arc<AppState>>,
    AuthUser(user): AuthUser,
    Path(id): Path<String>,
) -> ApiResult<Json<Value>> {
    let id = parse_id(&id)?;
    state.room_service.delete_room(id, user).await?;
    Ok(deleted("Room"))
}

/// Move an existing furniture item into this room
pub async fn add_furniture(
    State(state): State<Arc<AppState>>,
    AuthUser(user): AuthUser,
    Path((id, furniture_id)): Path<(String, String)>,
) -> ApiResult<Json<RoomWithFurnitureDto>> {
    let id = parse_id(&id)?;
    let furniture_id = parse_id(&furniture_id)?;
    let room = state
        .room_service
        .add_furniture_to_room(id, furniture_id, user)
        .await?;
    Ok(Json(room))
}

pub async fn remove_furniture(
    State(state): State<Arc<AppState>>,
    AuthUser(user): AuthUser,
    Path((id, furniture_id)): Path<(String, String)>,
) -> ApiResult<Json<RoomWithFurnitureDto>> {
    let id = parse_id(&id)?;
    let furniture_id = parse_id(&furniture_id)?;
    let room = state
        .room_service
        .remove_furniture_from_room(id, furniture_id, user)
        .await?;
    Ok(Json(room))
}
