//! Asset Library Service - Catalogues of reusable 3D assets
//!
//! A library is readable by its owner and, when public, by everyone. Only the
//! owner may change it.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, info, instrument};

use crate::application::dto::{CreateAssetLibraryRequestDto, CreateAssetRequestDto};
use crate::application::error::{ServiceError, ServiceResult};
use crate::application::ports::outbound::{AssetLibraryRepositoryPort, ClockPort};
use crate::application::validation::{validate_new_asset, validate_new_asset_library};
use crate::domain::entities::{Asset, AssetLibrary};
use crate::domain::value_objects::{AssetId, AssetLibraryId, UserId};

#[async_trait]
pub trait AssetLibraryService: Send + Sync {
    async fn create_library(
        &self,
        owner: UserId,
        request: CreateAssetLibraryRequestDto,
    ) -> ServiceResult<AssetLibrary>;

    /// The user's own libraries plus every public one
    async fn list_libraries(&self, user: UserId) -> ServiceResult<Vec<AssetLibrary>>;

    async fn get_library(&self, id: AssetLibraryId, user: UserId) -> ServiceResult<AssetLibrary>;

    async fn add_asset(
        &self,
        id: AssetLibraryId,
        owner: UserId,
        request: CreateAssetRequestDto,
    ) -> ServiceResult<AssetLibrary>;

    async fn remove_asset(
        &self,
        id: AssetLibraryId,
        asset_id: AssetId,
        owner: UserId,
    ) -> ServiceResult<AssetLibrary>;

    async fn delete_library(&self, id: AssetLibraryId, owner: UserId) -> ServiceResult<()>;
}

pub struct AssetLibraryServiceImpl {
    libraries: Arc<dyn AssetLibraryRepositoryPort>,
    clock: Arc<dyn ClockPort>,
}

impl AssetLibraryServiceImpl {
    pub fn new(libraries: Arc<dyn AssetLibraryRepositoryPort>, clock: Arc<dyn ClockPort>) -> Self {
        Self { libraries, clock }
    }

    async fn visible(&self, id: AssetLibraryId, user: UserId) -> ServiceResult<AssetLibrary> {
        match self.libraries.get(id).await? {
            Some(library) if library.is_visible_to(user) => Ok(library),
            _ => Err(ServiceError::not_found("Asset library")),
        }
    }

    async fn owned(&self, id: AssetLibraryId, user: UserId) -> ServiceResult<AssetLibrary> {
        let library = self.visible(id, user).await?;
        if library.owner != user {
            return Err(ServiceError::forbidden(
                "Not authorized to modify this asset library",
            ));
        }
        Ok(library)
    }
}

#[async_trait]
impl AssetLibraryService for AssetLibraryServiceImpl {
    #[instrument(skip(self, request))]
    async fn create_library(
        &self,
        owner: UserId,
        request: CreateAssetLibraryRequestDto,
    ) -> ServiceResult<AssetLibrary> {
        let input = validate_new_asset_library(&request)?;
        let library =
            AssetLibrary::new(owner, input.name, self.clock.now()).with_visibility(input.is_public);
        self.libraries.create(&library).await?;
        info!(library_id = %library.id, "Created asset library: {}", library.name);
        Ok(library)
    }

    #[instrument(skip(self))]
    async fn list_libraries(&self, user: UserId) -> ServiceResult<Vec<AssetLibrary>> {
        debug!("Listing asset libraries");
        Ok(self.libraries.list_visible_to(user).await?)
    }

    #[instrument(skip(self))]
    async fn get_library(&self, id: AssetLibraryId, user: UserId) -> ServiceResult<AssetLibrary> {
        self.visible(id, user).await
    }

    #[instrument(skip(self, request))]
    async fn add_asset(
        &self,
        id: AssetLibraryId,
        owner: UserId,
        request: CreateAssetRequestDto,
    ) -> ServiceResult<AssetLibrary> {
        let mut library = self.owned(id, owner).await?;
        let input = validate_new_asset(&request)?;

        let asset = Asset {
            id: AssetId::new(),
            name: input.name,
            asset_type: input.asset_type,
            category: input.category,
            model_url: input.model_url,
            thumbnail_url: input.thumbnail_url,
            dimensions: input.dimensions,
            tags: input.tags,
        };
        let asset_id = asset.id;
        library.add_asset(asset, self.clock.now());
        self.libraries.update(&library).await?;

        info!(library_id = %id, asset_id = %asset_id, "Added asset");
        Ok(library)
    }

    #[instrument(skip(self))]
    async fn remove_asset(
        &self,
        id: AssetLibraryId,
        asset_id: AssetId,
        owner: UserId,
    ) -> ServiceResult<AssetLibrary> {
        let mut library = self.owned(id, owner).await?;
        if library.remove_asset(asset_id, self.clock.now()) {
            self.libraries.update(&library).await?;
            info!(library_id = %id, asset_id = %asset_id, "Removed asset");
        }
        Ok(library)
    }

    #[instrument(skip(self))]
    async fn delete_library(&self, id: AssetLibraryId, owner: UserId) -> ServiceResult<()> {
        self.owned(id, owner).await?;
        self.libraries.delete(id).await?;
        info!(library_id = %id, "Deleted asset library");
        Ok(())
    }
}
