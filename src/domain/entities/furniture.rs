//! Furniture entity - A placed 3D model inside a room

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::value_objects::{
    AuditInfo, Dimensions, FurnitureId, FurnitureMaterial, FurnitureType, RoomId, UserId, Vector3,
};

/// A furniture item placed in a room
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Furniture {
    pub id: FurnitureId,
    pub room: RoomId,
    pub name: String,
    #[serde(rename = "type")]
    pub furniture_type: FurnitureType,
    /// Present exactly when `furniture_type` is `Custom`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub custom_type: Option<String>,
    /// Identifier of the 3D asset rendered for this item
    pub model: String,
    pub dimensions: Dimensions,
    pub position: Vector3,
    /// Degrees per axis, each in `[0, 360]`
    pub rotation: Vector3,
    pub scale: Vector3,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub material: Option<FurnitureMaterial>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub manufacturer: Option<String>,
    #[serde(default)]
    pub notes: String,
    pub audit: AuditInfo,
}

impl Furniture {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        room: RoomId,
        name: impl Into<String>,
        furniture_type: FurnitureType,
        model: impl Into<String>,
        dimensions: Dimensions,
        position: Vector3,
        created_by: UserId,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            id: FurnitureId::new(),
            room,
            name: name.into(),
            furniture_type,
            custom_type: None,
            model: model.into(),
            dimensions,
            position,
            rotation: Vector3::ZERO,
            scale: Vector3::ONE,
            color: None,
            material: None,
            price: None,
            manufacturer: None,
            notes: String::new(),
            audit: AuditInfo::new(created_by, now),
        }
    }

    pub fn with_custom_type(mut self, custom_type: impl Into<String>) -> Self {
        self.custom_type = Some(custom_type.into());
        self
    }

    pub fn with_rotation(mut self, rotation: Vector3) -> Self {
        self.rotation = rotation;
        self
    }

    pub fn type_label(&self) -> &str {
        self.custom_type
            .as_deref()
            .unwrap_or_else(|| self.furniture_type.as_str())
    }

    pub fn has_consistent_type(&self) -> bool {
        self.furniture_type.is_custom() == self.custom_type.is_some()
    }

    /// Re-point this item at another room
    pub fn relocate(&mut self, room: RoomId, user: UserId, now: DateTime<Utc>) {
        self.room = room;
        self.audit.touch(user, now);
    }

    /// A copy of this item placed in another room, with a fresh identity
    pub fn copy_into(&self, room: RoomId, user: UserId, now: DateTime<Utc>) -> Furniture {
        Furniture {
            id: FurnitureId::new(),
            room,
            audit: AuditInfo::new(user, now),
            ..self.clone()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sofa() -> Furniture {
        Furniture::new(
            RoomId::new(),
            "sofa",
            FurnitureType::Sofa,
            "64b7f0c2a1b2c3d4e5f60718",
            Dimensions::new(2.0, 1.0, 1.0),
            Vector3::new(1.0, 0.0, 1.0),
            UserId::new(),
            Utc::now(),
        )
    }

    #[test]
    fn new_furniture_has_neutral_transform() {
        let item = sofa();
        assert_eq!(item.rotation, Vector3::ZERO);
        assert_eq!(item.scale, Vector3::ONE);
        assert!(item.has_consistent_type());
    }

    #[test]
    fn relocate_moves_and_restamps() {
        let mut item = sofa();
        let target = RoomId::new();
        let mover = UserId::new();
        item.relocate(target, mover, Utc::now());

        assert_eq!(item.room, target);
        assert_eq!(item.audit.last_modified_by, mover);
        assert_eq!(item.audit.version, 2);
    }
}
