//! Room entity - A space inside a project that holds furniture

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::value_objects::{
    AuditInfo, FloorMaterial, FloorPoint, OpenDirection, ProjectId, RoomDimensions, RoomId,
    RoomType, UserId, Vector3,
};

pub const DEFAULT_WALL_COLOR: &str = "#FFFFFF";
pub const DEFAULT_FLOOR_COLOR: &str = "#CCCCCC";
pub const DEFAULT_CEILING_COLOR: &str = "#FFFFFF";
pub const DEFAULT_CEILING_HEIGHT: f64 = 2.7;

/// A room in a project
///
/// `project` is fixed at creation. The furniture in a room is found by
/// querying furniture whose `room` reference points here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Room {
    pub id: RoomId,
    pub project: ProjectId,
    pub name: String,
    #[serde(rename = "type")]
    pub room_type: RoomType,
    /// Present exactly when `room_type` is `Custom`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub custom_type: Option<String>,
    pub position: Vector3,
    pub dimensions: RoomDimensions,
    #[serde(default)]
    pub walls: Vec<Wall>,
    pub wall_color: String,
    pub floor: FloorFinish,
    pub ceiling: CeilingFinish,
    #[serde(default)]
    pub notes: String,
    pub audit: AuditInfo,
}

impl Room {
    pub fn new(
        project: ProjectId,
        name: impl Into<String>,
        room_type: RoomType,
        position: Vector3,
        dimensions: RoomDimensions,
        created_by: UserId,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            id: RoomId::new(),
            project,
            name: name.into(),
            room_type,
            custom_type: None,
            position,
            dimensions,
            walls: Vec::new(),
            wall_color: DEFAULT_WALL_COLOR.to_string(),
            floor: FloorFinish::default(),
            ceiling: CeilingFinish::default(),
            notes: String::new(),
            audit: AuditInfo::new(created_by, now),
        }
    }

    pub fn with_custom_type(mut self, custom_type: impl Into<String>) -> Self {
        self.custom_type = Some(custom_type.into());
        self
    }

    pub fn with_wall(mut self, wall: Wall) -> Self {
        self.walls.push(wall);
        self
    }

    /// Human-readable category, preferring the custom label
    pub fn type_label(&self) -> &str {
        self.custom_type
            .as_deref()
            .unwrap_or_else(|| self.room_type.as_str())
    }

    /// Whether `custom_type` agrees with `room_type`
    pub fn has_consistent_type(&self) -> bool {
        self.room_type.is_custom() == self.custom_type.is_some()
    }

    /// A copy of this room placed in another project, with a fresh identity
    pub fn copy_into(&self, project: ProjectId, user: UserId, now: DateTime<Utc>) -> Room {
        Room {
            id: RoomId::new(),
            project,
            audit: AuditInfo::new(user, now),
            ..self.clone()
        }
    }
}

/// A straight wall segment on the floor plane
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Wall {
    pub start: FloorPoint,
    pub end: FloorPoint,
    #[serde(default)]
    pub windows: Vec<WallWindow>,
    #[serde(default)]
    pub doors: Vec<WallDoor>,
    pub color: String,
    #[serde(default)]
    pub texture: String,
}

impl Wall {
    pub fn length(&self) -> f64 {
        let dx = self.end.x - self.start.x;
        let dz = self.end.z - self.start.z;
        (dx * dx + dz * dz).sqrt()
    }
}

/// A window opening; `position` is relative along the wall, in `[0, 1]`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WallWindow {
    pub position: f64,
    pub width: f64,
    pub height: f64,
    pub elevation: f64,
}

/// A door opening; `position` is relative along the wall, in `[0, 1]`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WallDoor {
    pub position: f64,
    pub width: f64,
    pub height: f64,
    pub is_open: bool,
    pub open_direction: OpenDirection,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FloorFinish {
    pub material: FloorMaterial,
    pub color: String,
    #[serde(default)]
    pub texture: String,
}

impl Default for FloorFinish {
    fn default() -> Self {
        Self {
            material: FloorMaterial::Hardwood,
            color: DEFAULT_FLOOR_COLOR.to_string(),
            texture: String::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CeilingFinish {
    pub height: f64,
    pub color: String,
    #[serde(default)]
    pub texture: String,
}

impl Default for CeilingFinish {
    fn default() -> Self {
        Self {
            height: DEFAULT_CEILING_HEIGHT,
            color: DEFAULT_CEILING_COLOR.to_string(),
            texture: String::new(),
        }
    }
}
