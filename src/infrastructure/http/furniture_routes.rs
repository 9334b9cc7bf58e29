//! Furniture API routes

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
use crate::application::dto::{CreateFurnitureRequestDto, UpdateFurnitureRequestDto};
use crate::application::services::FurnitureService;
use crate::domain::entities::Furniture;
use crate::infrastructure::state::AppState;

pub async fn list_furniture(
    State(state): State<Arc<AppState>>,
    AuthUser(user): AuthUser,
    Path(room_id): Path<String>,
) -> ApiResult<Json<Vec<Furniture>>> {
    let room_id = parse_id(&room_id)?;
    Ok(Json(state.furniture_service.list_furniture(room_id, user).await?))
}

pub async fn create_furniture(
    State(state): State<Arc<AppState>>,
    AuthUser(user): AuthUser,
    Path(room_id): Path<String>,
    JsonBody(req): JsonBody<CreateFurnitureRequestDto>,
) -> ApiResult<(StatusCode, Json<Furniture>)> {
    let room_id = parse_id(&room_id)?;
    let item = state
        .furniture_service
        .create_furniture(room_id, user, req)
        .await?;
    Ok((StatusCode::CREATED, Json(item)))
}

pub async fn get_furniture(
    State(state): State<Arc<AppState>>,
    AuthUser(user): AuthUser,
    Path(id): Path<String>,
) -> ApiResult<Json<Furniture>> {
    let id = parse_id(&id)?;
    Ok(Json(state.furniture_service.get_furniture(id, user).await?))
}

pub async fn update_furniture(
    State(state): State<Arc<AppState>>,
    AuthUser(user): AuthUser,
    Path(id): Path<String>,
    JsonBody(req): JsonBody<UpdateFurnitureRequestDto>,
) -> ApiResult<Json<Furniture>> {
    let id = parse_id(&id)?;
    Ok(Json(state.furniture_service.update_furniture(id, user, req).await?))
}

pub async fn delete_furniture(
    State(state): State<Arc<AppState>>,
    AuthUser(user): AuthUser,
    Path(id): Path<String>,
) -> ApiResult<Json<Value>> {
    let id = parse_id(&id)?;
    state.furniture_service.delete_furniture(id, user).await?;
    Ok(deleted("Furniture"))
}
