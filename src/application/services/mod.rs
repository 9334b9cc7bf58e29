//! Application services - Use case implementations
//!
//! Each service follows hexagonal architecture principles: it depends on
//! outbound port traits, validates incoming DTOs, and returns domain entities
//! or response DTOs.

mod access;
pub mod asset_library_service;
pub mod auth_service;
pub mod export_service;
pub mod furniture_service;
pub mod project_service;
pub mod room_service;

pub use access::AccessGuard;
pub use asset_library_service::{AssetLibraryService, AssetLibraryServiceImpl};
pub use auth_service::{AuthService, AuthServiceImpl};
pub use export_service::{ExportFile, ExportService, ExportServiceImpl};
pub use furniture_service::{FurnitureService, FurnitureServiceImpl};
pub use project_service::{ProjectService, ProjectServiceImpl};
pub use room_service::{RoomService, RoomServiceImpl};
