//! Shared application state

use std::sync::Arc;

use anyhow::Result;

use crate::application::ports::outbound::{
    AssetLibraryRepositoryPort, ClockPort, ExportRendererPort, FurnitureRepositoryPort,
    PasswordHasherPort, ProjectRepositoryPort, RoomRepositoryPort, TokenPort, UserRepositoryPort,
};
use crate::application::services::{
    AccessGuard, AssetLibraryServiceImpl, AuthServiceImpl, ExportServiceImpl,
    FurnitureServiceImpl, ProjectServiceImpl, RoomServiceImpl,
};
use crate::infrastructure::auth::{Argon2PasswordHasher, JwtTokenService};
use crate::infrastructure::clock::SystemClock;
use crate::infrastructure::config::AppConfig;
use crate::infrastructure::export::FileExportRenderer;
use crate::infrastructure::persistence::SqliteDatabase;

/// Shared application state
pub struct AppState {
    pub config: AppConfig,
    // Application services
    pub auth_service: AuthServiceImpl,
    pub project_service: ProjectServiceImpl,
    pub room_service: RoomServiceImpl,
    pub furniture_service: FurnitureServiceImpl,
    pub export_service: ExportServiceImpl,
    pub asset_library_service: AssetLibraryServiceImpl,
}

impl AppState {
    pub async fn new(config: AppConfig) -> Result<Self> {
        let database =
            SqliteDatabase::new(&config.database_url, config.database_max_connections).await?;
        Ok(Self::wire(config, database))
    }

    /// State over a fresh in-memory database
    #[cfg(test)]
    pub async fn for_tests() -> Result<Self> {
        let database = SqliteDatabase::in_memory().await?;
        Ok(Self::wire(AppConfig::for_tests(), database))
    }

    fn wire(config: AppConfig, database: SqliteDatabase) -> Self {
        let clock: Arc<dyn ClockPort> = Arc::new(SystemClock);
        let users: Arc<dyn UserRepositoryPort> = Arc::new(database.users());
        let projects: Arc<dyn ProjectRepositoryPort> = Arc::new(database.projects());
        let rooms: Arc<dyn RoomRepositoryPort> = Arc::new(database.rooms());
        let furniture: Arc<dyn FurnitureRepositoryPort> = Arc::new(database.furniture());
        let libraries: Arc<dyn AssetLibraryRepositoryPort> = Arc::new(database.asset_libraries());

        let hasher: Arc<dyn PasswordHasherPort> = Arc::new(Argon2PasswordHasher);
        let tokens: Arc<dyn TokenPort> = Arc::new(JwtTokenService::new(
            &config.jwt_secret,
            config.token_ttl_hours,
        ));
        let renderer: Arc<dyn ExportRendererPort> = Arc::new(FileExportRenderer);

        let access = AccessGuard::new(Arc::clone(&projects), rooms, furniture);

        Self {
            auth_service: AuthServiceImpl::new(users, hasher, tokens, Arc::clone(&clock)),
            project_service: ProjectServiceImpl::new(access.clone(), Arc::clone(&clock)),
            room_service: RoomServiceImpl::new(access.clone(), Arc::clone(&clock)),
            furniture_service: FurnitureServiceImpl::new(access, Arc::clone(&clock)),
            export_service: ExportServiceImpl::new(projects, renderer),
            asset_library_service: AssetLibraryServiceImpl::new(libraries, clock),
            config,
        }
    }
}
