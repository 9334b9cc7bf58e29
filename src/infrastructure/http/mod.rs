//! HTTP REST API routes

mod asset_library_routes;
mod auth;
mod auth_routes;
mod error;
mod export_routes;
mod furniture_routes;
mod project_routes;
mod room_routes;

use axum::{
    routing::{delete, get, post, put},
    Json, Router,
};
use serde_json::{json, Value};
use std::sync::Arc;

use crate::infrastructure::state::AppState;

pub use error::attach_internal_detail;

/// Body returned by every successful delete
fn deleted(entity: &str) -> Json<Value> {
    Json(json!({ "message": format!("{entity} deleted successfully") }))
}

/// Create all API routes
pub fn create_routes() -> Router<Arc<AppState>> {
    Router::new()
        // Account routes
        .route("/api/auth/register", post(auth_routes::register))
        .route("/api/auth/login", post(auth_routes::login))
        .route("/api/auth/me", get(auth_routes::current_user))
        .route(
            "/api/auth/me/preferences",
            put(auth_routes::update_preferences),
        )
        // Project routes
        .route("/api/projects", get(project_routes::list_projects))
        .route("/api/projects", post(project_routes::create_project))
        .route("/api/projects/{id}", get(project_routes::get_project))
        .route("/api/projects/{id}", put(project_routes::update_project))
        .route("/api/projects/{id}", delete(project_routes::delete_project))
        .route(
            "/api/projects/{id}/duplicate",
            post(project_routes::duplicate_project),
        )
        // Room routes
        .route("/api/projects/{id}/rooms", get(room_routes::list_rooms))
        .route("/api/projects/{id}/rooms", post(room_routes::create_room))
        .route("/api/rooms/{id}", get(room_routes::get_room))
        .route("/api/rooms/{id}", put(room_routes::update_room))
        .route("/api/rooms/{id}", delete(room_routes::delete_room))
        .route(
            "/api/rooms/{id}/furniture/{furniture_id}",
            put(room_routes::add_furniture),
        )
        .route(
            "/api/rooms/{id}/furniture/{furniture_id}",
            delete(room_routes::remove_furniture),
        )
        // Furniture routes
        .route(
            "/api/rooms/{id}/furniture",
            get(furniture_routes::list_furniture),
        )
        .route(
            "/api/rooms/{id}/furniture",
            post(furniture_routes::create_furniture),
        )
        .route("/api/furniture/{id}", get(furniture_routes::get_furniture))
        .route(
            "/api/furniture/{id}",
            put(furniture_routes::update_furniture),
        )
        .route(
            "/api/furniture/{id}",
            delete(furniture_routes::delete_furniture),
        )
        // Export routes
        .route(
            "/api/export/projects/{id}/json",
            get(export_routes::export_json),
        )
        .route(
            "/api/export/projects/{id}/csv",
            get(export_routes::export_csv),
        )
        .route(
            "/api/export/projects/{id}/pdf",
            get(export_routes::export_pdf),
        )
        .route(
            "/api/export/projects/{id}/summary",
            get(export_routes::project_summary),
        )
        // Asset library routes
        .route(
            "/api/asset-libraries",
            get(asset_library_routes::list_libraries),
        )
        .route(
            "/api/asset-libraries",
            post(asset_library_routes::create_library),
        )
        .route(
            "/api/asset-libraries/{id}",
            get(asset_library_routes::get_library),
        )
        .route(
            "/api/asset-libraries/{id}",
            delete(asset_library_routes::delete_library),
        )
        .route(
            "/api/asset-libraries/{id}/assets",
            post(asset_library_routes::add_asset),
        )
        .route(
            "/api/asset-libraries/{id}/assets/{asset_id}",
            delete(asset_library_routes::remove_asset),
        )
}
