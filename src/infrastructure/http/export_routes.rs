//! Export API routes

use axum::{
    extract::{Path, State},
    http::header::{CONTENT_DISPOSITION, CONTENT_TYPE},
    response::{IntoResponse, Response},
    Json,
};
use std::sync::Arc;

use super::auth::AuthUser;
use super::error::{parse_id, ApiResult};
use crate::application::dto::ProjectExportDto;
use crate::application::services::{ExportFile, ExportService};
use crate::domain::aggregates::ProjectSummary;
use crate::infrastructure::state::AppState;

fn download(file: ExportFile) -> Response {
    let disposition = format!("attachment; filename=\"{}\"", file.file_name);
    (
        [
            (CONTENT_TYPE, file.content_type.to_string()),
            (CONTENT_DISPOSITION, disposition),
        ],
        file.bytes,
    )
        .into_response()
}

/// Export a project with its rooms and furniture as one JSON document
pub async fn export_json(
    State(state): State<Arc<AppState>>,
    AuthUser(user): AuthUser,
    Path(id): Path<String>,
) -> ApiResult<Json<ProjectExportDto>> {
    let id = parse_id(&id)?;
    Ok(Json(state.export_service.export_json(id, user).await?))
}

/// Zip archive of project, room and furniture CSV files
pub async fn export_csv(
    State(state): State<Arc<AppState>>,
    AuthUser(user): AuthUser,
    Path(id): Path<String>,
) -> ApiResult<Response> {
    let id = parse_id(&id)?;
    Ok(download(state.export_service.export_csv(id, user).await?))
}

pub async fn export_pdf(
    State(state): State<Arc<AppState>>,
    AuthUser(user): AuthUser,
    Path(id): Path<String>,
) -> ApiResult<Response> {
    let id = parse_id(&id)?;
    Ok(download(state.export_service.export_pdf(id, user).await?))
}

pub async fn project_summary(
    State(state): State<Arc<AppState>>,
    AuthUser(user): AuthUser,
    Path(id): Path<String>,
) -> ApiResult<Json<ProjectSummary>> {
    let id = parse_id(&id)?;
    Ok(Json(state.export_service.generate_summary(id, user).await?))
}
