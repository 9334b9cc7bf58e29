//! Spatial value objects - positions, rotations and extents

use serde::{Deserialize, Serialize};

/// A point or direction in scene space
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Vector3 {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Vector3 {
    pub const ZERO: Vector3 = Vector3 { x: 0.0, y: 0.0, z: 0.0 };
    pub const ONE: Vector3 = Vector3 { x: 1.0, y: 1.0, z: 1.0 };

    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }
}

impl Default for Vector3 {
    fn default() -> Self {
        Self::ZERO
    }
}

/// A point on the floor plane
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FloorPoint {
    pub x: f64,
    pub z: f64,
}

/// Outer extent of a project or furniture item
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Dimensions {
    pub width: f64,
    pub length: f64,
    pub height: f64,
}

impl Dimensions {
    pub fn new(width: f64, length: f64, height: f64) -> Self {
        Self {
            width,
            length,
            height,
        }
    }
}

/// Extent of a room
///
/// `height` is optional: a room without one inherits its project's height.
/// Width and length default to zero when a stored document lacks them, which
/// makes such a room contribute nothing to area totals.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RoomDimensions {
    #[serde(default)]
    pub width: f64,
    #[serde(default)]
    pub length: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height: Option<f64>,
}

impl RoomDimensions {
    pub fn new(width: f64, length: f64, height: Option<f64>) -> Self {
        Self {
            width,
            length,
            height,
        }
    }

    /// Floor area; zero unless both width and length are usable measurements
    pub fn floor_area(&self) -> f64 {
        let usable = |v: f64| v.is_finite() && v > 0.0;
        if usable(self.width) && usable(self.length) {
            self.width * self.length
        } else {
            0.0
        }
    }

    /// Height of the room, falling back to the inherited project height
    pub fn effective_height(&self, inherited: f64) -> f64 {
        self.height.unwrap_or(inherited)
    }
}

/// Bounding box of a library asset
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AssetDimensions {
    pub width: f64,
    pub height: f64,
    pub depth: f64,
}

/// Round to two decimal places, the precision used for reported areas
pub fn round_area(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
