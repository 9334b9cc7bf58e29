//! Project API routes

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde_json::Value;
use std::sync::Arc;

use super::auth::AuthUser;
use super::deleted;
use super::error::{parse_id, ApiResult, JsonBody, QueryParams};
use crate::application::dto::{
    CreateProjectRequestDto, DuplicateQueryDto, ListQueryDto, ProjectDetailsDto, ProjectPageDto,
    UpdateProjectRequestDto,
};
use crate::application::services::ProjectService;
use crate::domain::entities::Project;
use crate::infrastructure::state::AppState;

/// List the caller's projects, one page at a time
pub async fn list_projects(
    State(state): State<Arc<AppState>>,
    AuthUser(user): AuthUser,
    QueryParams(query): QueryParams<ListQueryDto>,
) -> ApiResult<Json<ProjectPageDto>> {
    Ok(Json(state.project_service.list_projects(user, query).await?))
}

pub async fn create_project(
    State(state): State<Arc<AppState>>,
    AuthUser(user): AuthUser,
    JsonBody(req): JsonBody<CreateProjectRequestDto>,
) -> ApiResult<(StatusCode, Json<Project>)> {
    let project = state.project_service.create_project(user, req).await?;
    Ok((StatusCode::CREATED, Json(project)))
}

pub async fn get_project(
    State(state): State<Arc<AppState>>,
    AuthUser(user): AuthUser,
    Path(id): Path<String>,
) -> ApiResult<Json<ProjectDetailsDto>> {
    let id = parse_id(&id)?;
    Ok(Json(state.project_service.get_project(id, user).await?))
}

pub async fn update_project(
    State(state): State<Arc<AppState>>,
    AuthUser(user): AuthUser,
    Path(id): Path<String>,
    JsonBody(req): JsonBody<UpdateProjectRequestDto>,
) -> ApiResult<Json<Project>> {
    let id = parse_id(&id)?;
    Ok(Json(state.project_service.update_project(id, user, req).await?))
}

/// Delete a project along with its rooms and furniture
pub async fn delete_project(
    State(state): State<Arc<AppState>>,
    AuthUser(user): AuthUser,
    Path(id): Path<String>,
) -> ApiResult<Json<Value>> {
    let id = parse_id(&id)?;
    state.project_service.delete_project(id, user).await?;
    Ok(deleted("Project"))
}

/// Copy a project; `?deep=true` copies its rooms and furniture too
pub async fn duplicate_project(
    State(state): State<Arc<AppState>>,
    AuthUser(user): AuthUser,
    Path(id): Path<String>,
    QueryParams(query): QueryParams<DuplicateQueryDto>,
) -> ApiResult<(StatusCode, Json<Project>)> {
    let id = parse_id(&id)?;
    let copy = state
        .project_service
        .duplicate_project(id, user, query.deep)
        .await?;
    Ok((StatusCode::CREATED, Json(copy)))
}
