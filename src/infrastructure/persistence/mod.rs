//! SQLite persistence adapters
//!
//! This module implements the repository ports over a SQLite document store:
//! every entity is a JSON document in its own table, next to the reference
//! columns used for lookups and foreign keys.

mod asset_library_repository;
mod connection;
mod document;
mod furniture_repository;
mod project_repository;
mod room_repository;
mod user_repository;

pub use asset_library_repository::SqliteAssetLibraryRepository;
pub use connection::{connect, connect_in_memory};
pub use furniture_repository::SqliteFurnitureRepository;
pub use project_repository::SqliteProjectRepository;
pub use room_repository::SqliteRoomRepository;
pub use user_repository::SqliteUserRepository;

use anyhow::Result;
use sqlx::SqlitePool;

/// Combined repository providing access to all domain repositories
#[derive(Clone)]
pub struct SqliteDatabase {
    pool: SqlitePool,
}

impl SqliteDatabase {
    pub async fn new(url: &str, max_connections: u32) -> Result<Self> {
        let pool = connect(url, max_connections).await?;
        Ok(Self { pool })
    }

    pub async fn in_memory() -> Result<Self> {
        let pool = connect_in_memory().await?;
        Ok(Self { pool })
    }

    pub fn users(&self) -> SqliteUserRepository {
        SqliteUserRepository::new(self.pool.clone())
    }

    pub fn projects(&self) -> SqliteProjectRepository {
        SqliteProjectRepository::new(self.pool.clone())
    }

    pub fn rooms(&self) -> SqliteRoomRepository {
        SqliteRoomRepository::new(self.pool.clone())
    }

    pub fn furniture(&self) -> SqliteFurnitureRepository {
        SqliteFurnitureRepository::new(self.pool.clone())
    }

    pub fn asset_libraries(&self) -> SqliteAssetLibraryRepository {
        SqliteAssetLibraryRepository::new(self.pool.clone())
    }
}
