//! Value objects - Immutable objects defined by their attributes

mod audit;
mod categories;
mod geometry;
mod ids;

pub use audit::AuditInfo;
pub use categories::{
    AssetType, CollaboratorRole, Currency, FloorMaterial, FurnitureMaterial, FurnitureType,
    OpenDirection, ProjectStatus, RoomType, Theme, Units, UserRole,
};
pub use geometry::{round_area, AssetDimensions, Dimensions, FloorPoint, RoomDimensions, Vector3};
pub use ids::*;
