use serde::{Deserialize, Serialize};

use super::common::{DimensionsDto, Vector3Dto};
use crate::domain::entities::{Furniture, Room};

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct CreateRoomRequestDto {
    pub name: Option<String>,
    #[serde(rename = "type")]
    pub room_type: Option<String>,
    pub custom_type: Option<String>,
    pub dimensions: Option<DimensionsDto>,
    pub position: Option<Vector3Dto>,
    pub walls: Option<Vec<WallDto>>,
    pub wall_color: Option<String>,
    pub floor: Option<FloorDto>,
    pub ceiling: Option<CeilingDto>,
    pub notes: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct UpdateRoomRequestDto {
    pub name: Option<String>,
    #[serde(rename = "type")]
    pub room_type: Option<String>,
    pub custom_type: Option<String>,
    pub dimensions: Option<DimensionsDto>,
    pub position: Option<Vector3Dto>,
    pub walls: Option<Vec<WallDto>>,
    pub wall_color: Option<String>,
    pub floor: Option<FloorDto>,
    pub ceiling: Option<CeilingDto>,
    pub notes: Option<String>,
    pub version: Option<u32>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FloorPointDto {
    pub x: Option<f64>,
    pub z: Option<f64>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct WallDto {
    pub start: Option<FloorPointDto>,
    pub end: Option<FloorPointDto>,
    pub windows: Option<Vec<WindowDto>>,
    pub doors: Option<Vec<DoorDto>>,
    pub color: Option<String>,
    pub texture: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct WindowDto {
    pub position: Option<f64>,
    pub width: Option<f64>,
    pub height: Option<f64>,
    pub elevation: Option<f64>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct DoorDto {
    pub position: Option<f64>,
    pub width: Option<f64>,
    pub height: Option<f64>,
    pub is_open: Option<bool>,
    pub open_direction: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FloorDto {
    pub material: Option<String>,
    pub color: Option<String>,
    pub texture: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CeilingDto {
    pub height: Option<f64>,
    pub color: Option<String>,
    pub texture: Option<String>,
}

/// A room with its furniture populated
#[derive(Debug, Serialize)]
pub struct RoomWithFurnitureDto {
    #[serde(flatten)]
    pub room: Room,
    pub furniture: Vec<Furniture>,
}
