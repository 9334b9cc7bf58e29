//! Asset library API routes

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
use crate::application::dto::{CreateAssetLibraryRequestDto, CreateAssetRequestDto};
use crate::application::services::AssetLibraryService;
use crate::domain::entities::AssetLibrary;
use crate::infrastructure::state::AppState;

/// Libraries the caller owns plus every public one
pub async fn list_libraries(
    State(state): State<Arc<AppState>>,
    AuthUser(user): AuthUser,
) -> ApiResult<Json<Vec<AssetLibrary>>> {
    Ok(Json(state.asset_library_service.list_libraries(user).await?))
}

pub async fn create_library(
    State(state): State<Arc<AppState>>,
    AuthUser(user): AuthUser,
    JsonBody(req): JsonBody<CreateAssetLibraryRequestDto>,
) -> ApiResult<(StatusCode, Json<AssetLibrary>)> {
    let library = state.asset_library_service.create_library(user, req).await?;
    Ok((StatusCode::CREATED, Json(library)))
}

pub async fn get_library(
    State(state): State<Arc<AppState>>,
    AuthUser(user): AuthUser,
    Path(id): Path<String>,
) -> ApiResult<Json<AssetLibrary>> {
    let id = parse_id(&id)?;
    Ok(Json(state.asset_library_service.get_library(id, user).await?))
}

pub async fn delete_library(
    State(state): State<Arc<AppState>>,
    AuthUser(user): AuthUser,
    Path(id): Path<String>,
) -> ApiResult<Json<Value>> {
    let id = parse_id(&id)?;
    state.asset_library_service.delete_library(id, user).await?;
    Ok(deleted("Asset library"))
}

pub async fn add_asset(
    State(state): State<Arc<AppState>>,
    AuthUser(user): AuthUser,
    Path(id): Path<String>,
    JsonBody(req): JsonBody<CreateAssetRequestDto>,
) -> ApiResult<(StatusCode, Json<AssetLibrary>)> {
    let id = parse_id(&id)?;
    let library = state.asset_library_service.add_asset(id, user, req).await?;
    Ok((StatusCode::CREATED, Json(library)))
}

pub async fn remove_asset(
    State(state): State<Arc<AppState>>,
    AuthUser(user): AuthUser,
    Path((id, asset_id)): Path<(String, String)>,
) -> ApiResult<Json<AssetLibrary>> {
    let id = parse_id(&id)?;
    let asset_id = parse_id(&asset_id)?;
    let library = state
        .asset_library_service
        .remove_asset(id, asset_id, user)
        .await?;
    Ok(Json(library))
}
