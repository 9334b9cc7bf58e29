//! Room Service - Application service for rooms and their furniture set
//!
//! A room's furniture is whatever furniture references it, so attaching an
//! item moves it and detaching an item deletes it.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, info, instrument};

use super::access::AccessGuard;
use crate::application::dto::{CreateRoomRequestDto, RoomWithFurnitureDto, UpdateRoomRequestDto};
use crate::application::error::{ServiceError, ServiceResult};
use crate::application::ports::outbound::ClockPort;
use crate::application::validation::{check_room_type, validate_new_room, validate_room_patch};
use crate::domain::entities::Room;
use crate::domain::value_objects::{FurnitureId, ProjectId, RoomId, UserId};

/// Room service trait defining the application use cases
#[async_trait]
pub trait RoomService: Send + Sync {
    async fn create_room(
        &self,
        project_id: ProjectId,
        owner: UserId,
        request: CreateRoomRequestDto,
    ) -> ServiceResult<Room>;

    /// Rooms of a project, newest first
    async fn list_rooms(&self, project_id: ProjectId, owner: UserId) -> ServiceResult<Vec<Room>>;

    async fn get_room(&self, id: RoomId, owner: UserId) -> ServiceResult<RoomWithFurnitureDto>;

    async fn update_room(
        &self,
        id: RoomId,
        owner: UserId,
        request: UpdateRoomRequestDto,
    ) -> ServiceResult<Room>;

    /// Delete a room together with its furniture
    async fn delete_room(&self, id: RoomId, owner: UserId) -> ServiceResult<()>;

    /// Attach an item to the room, moving it from its current room if needed
    async fn add_furniture_to_room(
        &self,
        id: RoomId,
        furniture_id: FurnitureId,
        owner: UserId,
    ) -> ServiceResult<RoomWithFurnitureDto>;

    /// Detach an item from the room; an item elsewhere is left alone
    async fn remove_furniture_from_room(
        &self,
        id: RoomId,
        furniture_id: FurnitureId,
        owner: UserId,
    ) -> ServiceResult<RoomWithFurnitureDto>;
}

pub struct RoomServiceImpl {
    access: AccessGuard,
    clock: Arc<dyn ClockPort>,
}

impl RoomServiceImpl {
    pub fn new(access: AccessGuard, clock: Arc<dyn ClockPort>) -> Self {
        Self { access, clock }
    }

    /// Re-stamp a room whose furniture set changed
    async fn restamp(&self, room: &mut Room, owner: UserId) -> ServiceResult<()> {
        let read_version = room.audit.version;
        room.audit.touch(owner, self.clock.now());
        if !self.access.rooms.update(room, read_version).await? {
            return Err(ServiceError::conflict("Room was modified concurrently"));
        }
        Ok(())
    }

    async fn with_furniture(&self, room: Room) -> ServiceResult<RoomWithFurnitureDto> {
        let furniture = self.access.furniture.list_by_room(room.id).await?;
        Ok(RoomWithFurnitureDto { room, furniture })
    }
}

#[async_trait]
impl RoomService for RoomServiceImpl {
    #[instrument(skip(self, request))]
    async fn create_room(
        &self,
        project_id: ProjectId,
        owner: UserId,
        request: CreateRoomRequestDto,
    ) -> ServiceResult<Room> {
        self.access.owned_project(project_id, owner).await?;
        let input = validate_new_room(&request)?;

        let room = input.into_room(project_id, owner, self.clock.now());
        self.access.rooms.create(&room).await?;

        info!(room_id = %room.id, project_id = %project_id, "Created room: {}", room.name);
        Ok(room)
    }

    #[instrument(skip(self))]
    async fn list_rooms(&self, project_id: ProjectId, owner: UserId) -> ServiceResult<Vec<Room>> {
        self.access.owned_project(project_id, owner).await?;
        debug!(project_id = %project_id, "Listing rooms");
        Ok(self.access.rooms.list_by_project(project_id).await?)
    }

    #[instrument(skip(self))]
    async fn get_room(&self, id: RoomId, owner: UserId) -> ServiceResult<RoomWithFurnitureDto> {
        let (room, _) = self.access.room(id, owner).await?;
        debug!(room_id = %id, "Fetched room");
        self.with_furniture(room).await
    }

    #[instrument(skip(self, request), fields(room_id = %id))]
    async fn update_room(
        &self,
        id: RoomId,
        owner: UserId,
        request: UpdateRoomRequestDto,
    ) -> ServiceResult<Room> {
        let (mut room, _) = self.access.room(id, owner).await?;
        let patch = validate_room_patch(&request)?;

        let read_version = room.audit.version;
        if patch.expected_version.is_some_and(|v| v != read_version) {
            return Err(ServiceError::conflict("Room has been modified since it was read"));
        }

        patch.apply(&mut room);
        check_room_type(&room)?;
        room.audit.touch(owner, self.clock.now());

        if !self.access.rooms.update(&room, read_version).await? {
            return Err(ServiceError::conflict("Room was modified concurrently"));
        }

        info!(room_id = %id, version = room.audit.version, "Updated room");
        Ok(room)
    }

    #[instrument(skip(self))]
    async fn delete_room(&self, id: RoomId, owner: UserId) -> ServiceResult<()> {
        self.access.room(id, owner).await?;
        self.access.rooms.delete_cascade(id).await?;
        info!(room_id = %id, "Deleted room with its furniture");
        Ok(())
    }

    #[instrument(skip(self))]
    async fn add_furniture_to_room(
        &self,
        id: RoomId,
        furniture_id: FurnitureId,
        owner: UserId,
    ) -> ServiceResult<RoomWithFurnitureDto> {
        let (mut room, _) = self.access.room(id, owner).await?;
        let (mut item, mut current_room) = self.access.furniture(furniture_id, owner).await?;

        if current_room.id != room.id {
            let read_version = item.audit.version;
            item.relocate(room.id, owner, self.clock.now());
            if !self.access.furniture.update(&item, read_version).await? {
                return Err(ServiceError::conflict("Furniture was modified concurrently"));
            }
            self.restamp(&mut current_room, owner).await?;
            self.restamp(&mut room, owner).await?;
            info!(
                furniture_id = %furniture_id,
                from = %current_room.id,
                to = %room.id,
                "Moved furniture between rooms"
            );
        } else {
            debug!(furniture_id = %furniture_id, "Furniture already in room");
        }

        self.with_furniture(room).await
    }

    #[instrument(skip(self))]
    async fn remove_furniture_from_room(
        &self,
        id: RoomId,
        furniture_id: FurnitureId,
        owner: UserId,
    ) -> ServiceResult<RoomWithFurnitureDto> {
        let (mut room, _) = self.access.room(id, owner).await?;

        match self.access.furniture.get(furniture_id).await? {
            Some(item) if item.room == room.id => {
                self.access.furniture.delete(furniture_id).await?;
                self.restamp(&mut room, owner).await?;
                info!(furniture_id = %furniture_id, room_id = %id, "Removed furniture from room");
            }
            _ => debug!(furniture_id = %furniture_id, "Furniture not in room, nothing to remove"),
        }

        self.with_furniture(room).await
    }
}
