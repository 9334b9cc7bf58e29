//! Repository ports - Interfaces for data persistence
//!
//! These traits define the contracts that infrastructure repositories must implement.
//! Application services depend on these traits, not concrete implementations.
//!
//! Updates are compare-and-swap on the stored audit version: they take the
//! version the caller read and return `false` when another writer got there
//! first.

use anyhow::Result;
use async_trait::async_trait;

use crate::application::validation::ProjectListQuery;
use crate::domain::aggregates::{ProjectAggregate, RoomContents};
use crate::domain::entities::{AssetLibrary, Furniture, Project, Room, User};
use crate::domain::value_objects::{
    AssetLibraryId, FurnitureId, ProjectId, RoomId, UserId,
};

// =============================================================================
// Project Repository Port
// =============================================================================

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ProjectRepositoryPort: Send + Sync {
    async fn create(&self, project: &Project) -> Result<()>;

    async fn get(&self, id: ProjectId) -> Result<Option<Project>>;

    /// One page of an owner's projects, ordered as the query asks
    async fn list_by_owner(&self, owner: UserId, query: ProjectListQuery) -> Result<Vec<Project>>;

    async fn count_by_owner(&self, owner: UserId) -> Result<u64>;

    async fn update(&self, project: &Project, expected_version: u32) -> Result<bool>;

    /// Delete a project with all its rooms and their furniture, atomically
    async fn delete_cascade(&self, id: ProjectId) -> Result<()>;

    /// Insert a project together with copied rooms and furniture, atomically
    async fn create_with_contents(&self, project: &Project, rooms: &[RoomContents]) -> Result<()>;

    /// Read the project, its rooms and their furniture from one snapshot
    async fn load_aggregate(&self, id: ProjectId) -> Result<Option<ProjectAggregate>>;
}

// =============================================================================
// Room Repository Port
// =============================================================================

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RoomRepositoryPort: Send + Sync {
    async fn create(&self, room: &Room) -> Result<()>;

    async fn get(&self, id: RoomId) -> Result<Option<Room>>;

    /// Rooms of a project, newest first
    async fn list_by_project(&self, project: ProjectId) -> Result<Vec<Room>>;

    async fn list_ids_by_project(&self, project: ProjectId) -> Result<Vec<RoomId>>;

    async fn update(&self, room: &Room, expected_version: u32) -> Result<bool>;

    /// Delete a room and its furniture, atomically
    async fn delete_cascade(&self, id: RoomId) -> Result<()>;
}

// =============================================================================
// Furniture Repository Port
// =============================================================================

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait FurnitureRepositoryPort: Send + Sync {
    async fn create(&self, furniture: &Furniture) -> Result<()>;

    async fn get(&self, id: FurnitureId) -> Result<Option<Furniture>>;

    /// Furniture of a room, newest first
    async fn list_by_room(&self, room: RoomId) -> Result<Vec<Furniture>>;

    async fn update(&self, furniture: &Furniture, expected_version: u32) -> Result<bool>;

    /// Returns whether a row was deleted
    async fn delete(&self, id: FurnitureId) -> Result<bool>;
}

// =============================================================================
// User Repository Port
// =============================================================================

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepositoryPort: Send + Sync {
    /// Returns `false` when the email is already registered
    async fn create(&self, user: &User) -> Result<bool>;

    async fn get(&self, id: UserId) -> Result<Option<User>>;

    async fn find_by_email(&self, email: &str) -> Result<Option<User>>;

    async fn update(&self, user: &User) -> Result<()>;
}

// =============================================================================
// Asset Library Repository Port
// =============================================================================

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AssetLibraryRepositoryPort: Send + Sync {
    async fn create(&self, library: &AssetLibrary) -> Result<()>;

    async fn get(&self, id: AssetLibraryId) -> Result<Option<AssetLibrary>>;

    /// Libraries owned by `user` plus every public library
    async fn list_visible_to(&self, user: UserId) -> Result<Vec<AssetLibrary>>;

    async fn update(&self, library: &AssetLibrary) -> Result<()>;

    async fn delete(&self, id: AssetLibraryId) -> Result<()>;
}
