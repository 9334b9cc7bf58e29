use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::domain::aggregates::ProjectAggregate;
use crate::domain::entities::{Furniture, Room};
use crate::domain::value_objects::{
    Dimensions, FurnitureId, FurnitureType, ProjectId, RoomDimensions, RoomId, RoomType, Vector3,
};

/// Portable JSON projection of a project with its rooms and furniture
#[derive(Debug, Clone, Serialize)]
pub struct ProjectExportDto {
    pub project: ExportedProjectDto,
    pub rooms: Vec<ExportedRoomDto>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportedProjectDto {
    pub id: ProjectId,
    pub name: String,
    pub description: String,
    pub dimensions: Dimensions,
    pub styles: Vec<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportedRoomDto {
    pub id: RoomId,
    pub name: String,
    #[serde(rename = "type")]
    pub room_type: RoomType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub custom_type: Option<String>,
    pub dimensions: RoomDimensions,
    pub furniture: Vec<ExportedFurnitureDto>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ExportedFurnitureDto {
    pub id: FurnitureId,
    pub name: String,
    #[serde(rename = "type")]
    pub furniture_type: FurnitureType,
    pub dimensions: Dimensions,
    pub position: Vector3,
    pub rotation: Vector3,
    pub model: String,
}

impl From<&ProjectAggregate> for ProjectExportDto {
    fn from(aggregate: &ProjectAggregate) -> Self {
        let project = aggregate.project();
        Self {
            project: ExportedProjectDto {
                id: project.id,
                name: project.name.clone(),
                description: project.description.clone(),
                dimensions: project.dimensions,
                styles: project.styles.clone(),
                created_at: project.audit.created_at,
            },
            rooms: aggregate
                .rooms()
                .iter()
                .map(|contents| exported_room(&contents.room, &contents.furniture))
                .collect(),
        }
    }
}

fn exported_room(room: &Room, furniture: &[Furniture]) -> ExportedRoomDto {
    ExportedRoomDto {
        id: room.id,
        name: room.name.clone(),
        room_type: room.room_type,
        custom_type: room.custom_type.clone(),
        dimensions: room.dimensions,
        furniture: furniture
            .iter()
            .map(|item| ExportedFurnitureDto {
                id: item.id,
                name: item.name.clone(),
                furniture_type: item.furniture_type,
                dimensions: item.dimensions,
                position: item.position,
                rotation: item.rotation,
                model: item.model.clone(),
            })
            .collect(),
    }
}
