use serde::{Deserialize, Serialize};

use super::common::DimensionsDto;
use crate::domain::entities::Project;
use crate::domain::value_objects::RoomId;

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct CreateProjectRequestDto {
    pub name: Option<String>,
    pub description: Option<String>,
    pub dimensions: Option<DimensionsDto>,
    pub settings: Option<ProjectSettingsDto>,
    pub status: Option<String>,
    pub styles: Option<Vec<String>>,
    pub tags: Option<Vec<String>>,
    pub thumbnail: Option<String>,
    pub is_public: Option<bool>,
    pub budget: Option<BudgetDto>,
    pub collaborators: Option<Vec<CollaboratorDto>>,
}

/// Partial project update; `version` enables the optimistic concurrency check
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct UpdateProjectRequestDto {
    pub name: Option<String>,
    pub description: Option<String>,
    pub dimensions: Option<DimensionsDto>,
    pub settings: Option<ProjectSettingsDto>,
    pub status: Option<String>,
    pub styles: Option<Vec<String>>,
    pub tags: Option<Vec<String>>,
    pub thumbnail: Option<String>,
    pub is_public: Option<bool>,
    pub budget: Option<BudgetDto>,
    pub collaborators: Option<Vec<CollaboratorDto>>,
    pub version: Option<u32>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct ProjectSettingsDto {
    pub units: Option<String>,
    pub grid_snap: Option<bool>,
    pub grid_size: Option<f64>,
    pub wall_thickness: Option<f64>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct BudgetDto {
    pub amount: Option<f64>,
    pub currency: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CollaboratorDto {
    pub user: Option<String>,
    pub role: Option<String>,
}

/// A project together with the ids of its rooms
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectDetailsDto {
    #[serde(flatten)]
    pub project: Project,
    pub rooms: Vec<RoomId>,
}

#[derive(Debug, Serialize)]
pub struct PaginationDto {
    pub total: u64,
    pub page: u32,
    pub pages: u64,
}

#[derive(Debug, Serialize)]
pub struct ProjectPageDto {
    pub projects: Vec<Project>,
    pub pagination: PaginationDto,
}
