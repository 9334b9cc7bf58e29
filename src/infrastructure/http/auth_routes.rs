//! Account API routes

use axum::{extract::State, http::StatusCode, Json};
use std::sync::Arc;

use super::auth::AuthUser;
use super::error::{ApiResult, JsonBody};
use crate::application::dto::{
    AuthResponseDto, LoginRequestDto, RegisterRequestDto, UpdatePreferencesRequestDto,
    UserResponseDto,
};
use crate::application::services::AuthService;
use crate::infrastructure::state::AppState;

/// Create an account and sign it in
pub async fn register(
    State(state): State<Arc<AppState>>,
    JsonBody(req): JsonBody<RegisterRequestDto>,
) -> ApiResult<(StatusCode, Json<AuthResponseDto>)> {
    let response = state.auth_service.register(req).await?;
    Ok((StatusCode::CREATED, Json(response)))
}

pub async fn login(
    State(state): State<Arc<AppState>>,
    JsonBody(req): JsonBody<LoginRequestDto>,
) -> ApiResult<Json<AuthResponseDto>> {
    Ok(Json(state.auth_service.login(req).await?))
}

pub async fn current_user(
    State(state): State<Arc<AppState>>,
    AuthUser(user): AuthUser,
) -> ApiResult<Json<UserResponseDto>> {
    Ok(Json(state.auth_service.current_user(user).await?))
}

pub async fn update_preferences(
    State(state): State<Arc<AppState>>,
    AuthUser(user): AuthUser,
    JsonBody(req): JsonBody<UpdatePreferencesRequestDto>,
) -> ApiResult<Json<UserResponseDto>> {
    Ok(Json(state.auth_service.update_preferences(user, req).await?))
}
