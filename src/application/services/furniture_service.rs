//! Furniture Service - Application service for furniture items

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, info, instrument};

use super::access::AccessGuard;
use crate::application::dto::{CreateFurnitureRequestDto, UpdateFurnitureRequestDto};
use crate::application::error::{ServiceError, ServiceResult};
use crate::application::ports::outbound::ClockPort;
use crate::application::validation::{
    check_furniture_type, validate_furniture_patch, validate_new_furniture,
};
use crate::domain::entities::Furniture;
use crate::domain::value_objects::{FurnitureId, RoomId, UserId};

/// Furniture service trait defining the application use cases
#[async_trait]
pub trait FurnitureService: Send + Sync {
    async fn create_furniture(
        &self,
        room_id: RoomId,
        owner: UserId,
        request: CreateFurnitureRequestDto,
    ) -> ServiceResult<Furniture>;

    async fn list_furniture(&self, room_id: RoomId, owner: UserId)
        -> ServiceResult<Vec<Furniture>>;

    async fn get_furniture(&self, id: FurnitureId, owner: UserId) -> ServiceResult<Furniture>;

    async fn update_furniture(
        &self,
        id: FurnitureId,
        owner: UserId,
        request: UpdateFurnitureRequestDto,
    ) -> ServiceResult<Furniture>;

    async fn delete_furniture(&self, id: FurnitureId, owner: UserId) -> ServiceResult<()>;
}

pub struct FurnitureServiceImpl {
    access: AccessGuard,
    clock: Arc<dyn ClockPort>,
}

impl FurnitureServiceImpl {
    pub fn new(access: AccessGuard, clock: Arc<dyn ClockPort>) -> Self {
        Self { access, clock }
    }
}

#[async_trait]
impl FurnitureService for FurnitureServiceImpl {
    #[instrument(skip(self, request))]
    async fn create_furniture(
        &self,
        room_id: RoomId,
        owner: UserId,
        request: CreateFurnitureRequestDto,
    ) -> ServiceResult<Furniture> {
        self.access.room(room_id, owner).await?;
        let input = validate_new_furniture(&request)?;

        let item = input.into_furniture(room_id, owner, self.clock.now());
        self.access.furniture.create(&item).await?;

        info!(furniture_id = %item.id, room_id = %room_id, "Created furniture: {}", item.name);
        Ok(item)
    }

    #[instrument(skip(self))]
    async fn list_furniture(
        &self,
        room_id: RoomId,
        owner: UserId,
    ) -> ServiceResult<Vec<Furniture>> {
        self.access.room(room_id, owner).await?;
        debug!(room_id = %room_id, "Listing furniture");
        Ok(self.access.furniture.list_by_room(room_id).await?)
    }

    #[instrument(skip(self))]
    async fn get_furniture(&self, id: FurnitureId, owner: UserId) -> ServiceResult<Furniture> {
        let (item, _) = self.access.furniture(id, owner).await?;
        Ok(item)
    }

    #[instrument(skip(self, request), fields(furniture_id = %id))]
    async fn update_furniture(
        &self,
        id: FurnitureId,
        owner: UserId,
        request: UpdateFurnitureRequestDto,
    ) -> ServiceResult<Furniture> {
        let (mut item, _) = self.access.furniture(id, owner).await?;
        let patch = validate_furniture_patch(&request)?;

        let read_version = item.audit.version;
        if patch.expected_version.is_some_and(|v| v != read_version) {
            return Err(ServiceError::conflict(
                "Furniture has been modified since it was read",
            ));
        }

        patch.apply(&mut item);
        check_furniture_type(&item)?;
        item.audit.touch(owner, self.clock.now());

        if !self.access.furniture.update(&item, read_version).await? {
            return Err(ServiceError::conflict("Furniture was modified concurrently"));
        }

        info!(furniture_id = %id, version = item.audit.version, "Updated furniture");
        Ok(item)
    }

    #[instrument(skip(self))]
    async fn delete_furniture(&self, id: FurnitureId, owner: UserId) -> ServiceResult<()> {
        self.access.furniture(id, owner).await?;
        self.access.furniture.delete(id).await?;
        info!(furniture_id = %id, "Deleted furniture");
        Ok(())
    }
}
