//! Domain entities - Core business objects with identity

mod asset_library;
mod furniture;
mod project;
mod room;
mod user;

pub use asset_library::{Asset, AssetLibrary};
pub use furniture::Furniture;
pub use project::{Budget, Collaborator, Project, ProjectSettings, DEFAULT_PROJECT_HEIGHT};
pub use room::{
    CeilingFinish, FloorFinish, Room, Wall, WallDoor, WallWindow, DEFAULT_WALL_COLOR,
};
pub use user::{User, UserPreferences};
