//! Outbound ports - Interfaces that the application requires from external systems

mod auth_port;
mod clock_port;
mod export_port;
mod repository_port;

pub use auth_port::{IssuedToken, PasswordHasherPort, TokenPort};
pub use clock_port::ClockPort;
pub use export_port::ExportRendererPort;
pub use repository_port::{
    AssetLibraryRepositoryPort, FurnitureRepositoryPort, ProjectRepositoryPort,
    RoomRepositoryPort, UserRepositoryPort,
};

#[cfg(test)]
pub use auth_port::{MockPasswordHasherPort, MockTokenPort};
#[cfg(test)]
pub use clock_port::MockClockPort;
#[cfg(test)]
pub use export_port::MockExportRendererPort;
#[cfg(test)]
pub use repository_port::{
    MockAssetLibraryRepositoryPort, MockFurnitureRepositoryPort, MockProjectRepositoryPort,
    MockRoomRepositoryPort, MockUserRepositoryPort,
};
