//! Ownership checks shared by the aggregate services
//!
//! A project is visible only to its owner; anyone else gets `NotFound`, so
//! project ids do not leak. Rooms and furniture are addressed directly, and
//! there a foreign owner gets `Forbidden`.

use std::sync::Arc;

use crate::application::error::{ServiceError, ServiceResult};
use crate::application::ports::outbound::{
    FurnitureRepositoryPort, ProjectRepositoryPort, RoomRepositoryPort,
};
use crate::domain::entities::{Furniture, Project, Room};
use crate::domain::value_objects::{FurnitureId, ProjectId, RoomId, UserId};

#[derive(Clone)]
pub struct AccessGuard {
    pub(crate) projects: Arc<dyn ProjectRepositoryPort>,
    pub(crate) rooms: Arc<dyn RoomRepositoryPort>,
    pub(crate) furniture: Arc<dyn FurnitureRepositoryPort>,
}

impl AccessGuard {
    pub fn new(
        projects: Arc<dyn ProjectRepositoryPort>,
        rooms: Arc<dyn RoomRepositoryPort>,
        furniture: Arc<dyn FurnitureRepositoryPort>,
    ) -> Self {
        Self {
            projects,
            rooms,
            furniture,
        }
    }

    pub async fn owned_project(&self, id: ProjectId, user: UserId) -> ServiceResult<Project> {
        match self.projects.get(id).await? {
            Some(project) if project.is_owned_by(user) => Ok(project),
            _ => Err(ServiceError::not_found("Project")),
        }
    }

    /// The room and its project, when `user` owns the project
    pub async fn room(&self, id: RoomId, user: UserId) -> ServiceResult<(Room, Project)> {
        let room = self
            .rooms
            .get(id)
            .await?
            .ok_or_else(|| ServiceError::not_found("Room"))?;
        let project = self
            .projects
            .get(room.project)
            .await?
            .ok_or_else(|| ServiceError::not_found("Room"))?;
        if !project.is_owned_by(user) {
            return Err(ServiceError::forbidden("Not authorized to access this room"));
        }
        Ok((room, project))
    }

    /// The furniture item and its room, when `user` owns the enclosing project
    pub async fn furniture(&self, id: FurnitureId, user: UserId) -> ServiceResult<(Furniture, Room)> {
        let item = self
            .furniture
            .get(id)
            .await?
            .ok_or_else(|| ServiceError::not_found("Furniture"))?;
        let (room, _) = self.room(item.room, user).await.map_err(|e| match e {
            ServiceError::Forbidden(_) => {
                ServiceError::forbidden("Not authorized to access this furniture")
            }
            ServiceError::NotFound { .. } => ServiceError::not_found("Furniture"),
            other => other,
        })?;
        Ok((item, room))
    }
}
