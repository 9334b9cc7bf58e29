//! Project Service - Application service for project management
//!
//! Projects are private to their owner. Deleting one removes its rooms and
//! their furniture in the same transaction; duplicating one can copy them too.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, info, instrument};

use super::access::AccessGuard;
use crate::application::dto::{
    CreateProjectRequestDto, ListQueryDto, PaginationDto, ProjectDetailsDto, ProjectPageDto,
    UpdateProjectRequestDto,
};
use crate::application::error::{ServiceError, ServiceResult};
use crate::application::ports::outbound::ClockPort;
use crate::application::validation::{
    validate_list_query, validate_new_project, validate_project_patch,
};
use crate::domain::aggregates::RoomContents;
use crate::domain::entities::Project;
use crate::domain::value_objects::{ProjectId, UserId};

/// Project service trait defining the application use cases
#[async_trait]
pub trait ProjectService: Send + Sync {
    async fn create_project(
        &self,
        owner: UserId,
        request: CreateProjectRequestDto,
    ) -> ServiceResult<Project>;

    async fn list_projects(&self, owner: UserId, query: ListQueryDto)
        -> ServiceResult<ProjectPageDto>;

    /// The project with the ids of its rooms
    async fn get_project(&self, id: ProjectId, owner: UserId) -> ServiceResult<ProjectDetailsDto>;

    async fn update_project(
        &self,
        id: ProjectId,
        owner: UserId,
        request: UpdateProjectRequestDto,
    ) -> ServiceResult<Project>;

    async fn delete_project(&self, id: ProjectId, owner: UserId) -> ServiceResult<()>;

    /// Copy a project; `deep` also copies its rooms and furniture
    async fn duplicate_project(
        &self,
        id: ProjectId,
        owner: UserId,
        deep: bool,
    ) -> ServiceResult<Project>;
}

pub struct ProjectServiceImpl {
    access: AccessGuard,
    clock: Arc<dyn ClockPort>,
}

impl ProjectServiceImpl {
    pub fn new(access: AccessGuard, clock: Arc<dyn ClockPort>) -> Self {
        Self { access, clock }
    }
}

#[async_trait]
impl ProjectService for ProjectServiceImpl {
    #[instrument(skip(self, request))]
    async fn create_project(
        &self,
        owner: UserId,
        request: CreateProjectRequestDto,
    ) -> ServiceResult<Project> {
        let input = validate_new_project(&request)?;

        let mut project = Project::new(owner, input.name, input.dimensions, self.clock.now())
            .with_description(input.description)
            .with_settings(input.settings)
            .with_styles(input.styles);
        project.status = input.status;
        project.tags = input.tags;
        project.thumbnail = input.thumbnail;
        project.is_public = input.is_public;
        project.budget = input.budget;
        project.collaborators = input.collaborators;

        self.access.projects.create(&project).await?;

        info!(project_id = %project.id, "Created project: {}", project.name);
        Ok(project)
    }

    #[instrument(skip(self, query))]
    async fn list_projects(
        &self,
        owner: UserId,
        query: ListQueryDto,
    ) -> ServiceResult<ProjectPageDto> {
        let query = validate_list_query(&query)?;
        debug!(page = query.page, limit = query.limit, "Listing projects");

        let projects = self.access.projects.list_by_owner(owner, query).await?;
        let total = self.access.projects.count_by_owner(owner).await?;
        let pages = total.div_ceil(u64::from(query.limit));

        Ok(ProjectPageDto {
            projects,
            pagination: PaginationDto {
                total,
                page: query.page,
                pages,
            },
        })
    }

    #[instrument(skip(self))]
    async fn get_project(&self, id: ProjectId, owner: UserId) -> ServiceResult<ProjectDetailsDto> {
        debug!(project_id = %id, "Fetching project");
        let project = self.access.owned_project(id, owner).await?;
        let rooms = self.access.rooms.list_ids_by_project(id).await?;
        Ok(ProjectDetailsDto { project, rooms })
    }

    #[instrument(skip(self, request), fields(project_id = %id))]
    async fn update_project(
        &self,
        id: ProjectId,
        owner: UserId,
        request: UpdateProjectRequestDto,
    ) -> ServiceResult<Project> {
        let mut project = self.access.owned_project(id, owner).await?;
        let patch = validate_project_patch(&request)?;

        let read_version = project.audit.version;
        if patch.expected_version.is_some_and(|v| v != read_version) {
            return Err(ServiceError::conflict(
                "Project has been modified since it was read",
            ));
        }

        patch.apply(&mut project);
        project.audit.touch(owner, self.clock.now());

        if !self.access.projects.update(&project, read_version).await? {
            return Err(ServiceError::conflict("Project was modified concurrently"));
        }

        info!(project_id = %id, version = project.audit.version, "Updated project");
        Ok(project)
    }

    #[instrument(skip(self))]
    async fn delete_project(&self, id: ProjectId, owner: UserId) -> ServiceResult<()> {
        self.access.owned_project(id, owner).await?;
        self.access.projects.delete_cascade(id).await?;
        info!(project_id = %id, "Deleted project with its rooms and furniture");
        Ok(())
    }

    #[instrument(skip(self))]
    async fn duplicate_project(
        &self,
        id: ProjectId,
        owner: UserId,
        deep: bool,
    ) -> ServiceResult<Project> {
        let now = self.clock.now();

        if !deep {
            let original = self.access.owned_project(id, owner).await?;
            let copy = original.duplicate(owner, now);
            self.access.projects.create(&copy).await?;
            info!(source = %id, project_id = %copy.id, "Duplicated project");
            return Ok(copy);
        }

        let aggregate = match self.access.projects.load_aggregate(id).await? {
            Some(aggregate) if aggregate.project().is_owned_by(owner) => aggregate,
            _ => return Err(ServiceError::not_found("Project")),
        };

        let copy = aggregate.project().duplicate(owner, now);
        let rooms: Vec<RoomContents> = aggregate
            .rooms()
            .iter()
            .map(|contents| {
                let room = contents.room.copy_into(copy.id, owner, now);
                let furniture = contents
                    .furniture
                    .iter()
                    .map(|item| item.copy_into(room.id, owner, now))
                    .collect();
                RoomContents { room, furniture }
            })
            .collect();

        self.access
            .projects
            .create_with_contents(&copy, &rooms)
            .await?;

        info!(
            source = %id,
            project_id = %copy.id,
            rooms = rooms.len(),
            "Duplicated project with contents"
        );
        Ok(copy)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::dto::DimensionsDto;
    use crate::application::ports::outbound::{
        MockClockPort, MockFurnitureRepositoryPort, MockProjectRepositoryPort,
        MockRoomRepositoryPort,
    };
    use crate::domain::aggregates::ProjectAggregate;
    use crate::domain::entities::{Furniture, Room};
    use crate::domain::value_objects::{
        Dimensions, FurnitureType, ProjectStatus, RoomDimensions, RoomType, Vector3,
    };
    use chrono::{DateTime, TimeZone, Utc};

    fn fixed_now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 3, 1, 12, 0, 0).unwrap()
    }

    fn clock() -> Arc<dyn ClockPort> {
        let mut clock = MockClockPort::new();
        clock.expect_now().returning(fixed_now);
        Arc::new(clock)
    }

    fn service(projects: MockProjectRepositoryPort, rooms: MockRoomRepositoryPort) -> ProjectServiceImpl {
        ProjectServiceImpl::new(
            AccessGuard::new(
                Arc::new(projects),
                Arc::new(rooms),
                Arc::new(MockFurnitureRepositoryPort::new()),
            ),
            clock(),
        )
    }

    fn stored_project(owner: UserId) -> Project {
        Project::new(
            owner,
            "Loft",
            Dimensions::new(10.0, 8.0, 3.0),
            Utc.with_ymd_and_hms(2026, 1, 1, 0, 0, 0).unwrap(),
        )
    }

    #[tokio::test]
    async fn create_stamps_owner_and_version() {
        let owner = UserId::new();
        let mut projects = MockProjectRepositoryPort::new();
        projects.expect_create().times(1).returning(|_| Ok(()));

        let project = service(projects, MockRoomRepositoryPort::new())
            .create_project(
                owner,
                CreateProjectRequestDto {
                    name: Some("Loft".to_string()),
                    dimensions: Some(DimensionsDto {
                        width: Some(10.0),
                        length: Some(8.0),
                        height: Some(3.0),
                    }),
                    ..Default::default()
                },
            )
            .await
            .expect("created");

        assert_eq!(project.owner, owner);
        assert_eq!(project.audit.created_at, fixed_now());
        assert_eq!(project.audit.last_modified_at, fixed_now());
        assert_eq!(project.audit.version, 1);
        assert_eq!(project.status, ProjectStatus::Draft);
    }

    #[tokio::test]
    async fn invalid_create_never_reaches_storage() {
        let mut projects = MockProjectRepositoryPort::new();
        projects.expect_create().never();

        let result = service(projects, MockRoomRepositoryPort::new())
            .create_project(UserId::new(), CreateProjectRequestDto::default())
            .await;
        assert!(matches!(result, Err(ServiceError::InvalidInput(_))));
    }

    #[tokio::test]
    async fn list_reports_page_count() {
        let owner = UserId::new();
        let mut projects = MockProjectRepositoryPort::new();
        projects
            .expect_list_by_owner()
            .returning(move |_, _| Ok(vec![stored_project(owner)]));
        projects.expect_count_by_owner().returning(|_| Ok(21));

        let page = service(projects, MockRoomRepositoryPort::new())
            .list_projects(owner, ListQueryDto::default())
            .await
            .expect("listed");
        assert_eq!(page.pagination.total, 21);
        assert_eq!(page.pagination.pages, 3);
        assert_eq!(page.pagination.page, 1);
    }

    #[tokio::test]
    async fn update_restamps_and_uses_read_version() {
        let owner = UserId::new();
        let stored = stored_project(owner);
        let id = stored.id;
        let created_at = stored.audit.created_at;

        let mut projects = MockProjectRepositoryPort::new();
        projects
            .expect_get()
            .returning(move |_| Ok(Some(stored.clone())));
        projects
            .expect_update()
            .withf(|p, expected| *expected == 1 && p.audit.version == 2)
            .times(1)
            .returning(|_, _| Ok(true));

        let updated = service(projects, MockRoomRepositoryPort::new())
            .update_project(
                id,
                owner,
                UpdateProjectRequestDto {
                    name: Some("Penthouse".to_string()),
                    ..Default::default()
                },
            )
            .await
            .expect("updated");

        assert_eq!(updated.name, "Penthouse");
        assert_eq!(updated.audit.created_at, created_at);
        assert_eq!(updated.audit.last_modified_at, fixed_now());
        assert!(updated.audit.last_modified_at > updated.audit.created_at);
    }

    #[tokio::test]
    async fn stale_version_is_a_conflict() {
        let owner = UserId::new();
        let stored = stored_project(owner);
        let id = stored.id;

        let mut projects = MockProjectRepositoryPort::new();
        projects
            .expect_get()
            .returning(move |_| Ok(Some(stored.clone())));
        projects.expect_update().never();

        let result = service(projects, MockRoomRepositoryPort::new())
            .update_project(
                id,
                owner,
                UpdateProjectRequestDto {
                    name: Some("Penthouse".to_string()),
                    version: Some(7),
                    ..Default::default()
                },
            )
            .await;
        assert!(matches!(result, Err(ServiceError::Conflict(_))));
    }

    #[tokio::test]
    async fn lost_compare_and_swap_is_a_conflict() {
        let owner = UserId::new();
        let stored = stored_project(owner);
        let id = stored.id;

        let mut projects = MockProjectRepositoryPort::new();
        projects
            .expect_get()
            .returning(move |_| Ok(Some(stored.clone())));
        projects.expect_update().returning(|_, _| Ok(false));

        let result = service(projects, MockRoomRepositoryPort::new())
            .update_project(
                id,
                owner,
                UpdateProjectRequestDto {
                    is_public: Some(true),
                    ..Default::default()
                },
            )
            .await;
        assert!(matches!(result, Err(ServiceError::Conflict(_))));
    }

    #[tokio::test]
    async fn delete_by_stranger_is_not_found_and_keeps_data() {
        let stored = stored_project(UserId::new());
        let id = stored.id;

        let mut projects = MockProjectRepositoryPort::new();
        projects
            .expect_get()
            .returning(move |_| Ok(Some(stored.clone())));
        projects.expect_delete_cascade().never();

        let result = service(projects, MockRoomRepositoryPort::new())
            .delete_project(id, UserId::new())
            .await;
        assert!(matches!(result, Err(ServiceError::NotFound { .. })));
    }

    #[tokio::test]
    async fn shallow_duplicate_copies_only_the_project() {
        let owner = UserId::new();
        let stored = stored_project(owner);
        let id = stored.id;

        let mut projects = MockProjectRepositoryPort::new();
        projects
            .expect_get()
            .returning(move |_| Ok(Some(stored.clone())));
        projects.expect_create().times(1).returning(|_| Ok(()));
        projects.expect_create_with_contents().never();

        let copy = service(projects, MockRoomRepositoryPort::new())
            .duplicate_project(id, owner, false)
            .await
            .expect("duplicated");
        assert_ne!(copy.id, id);
        assert_eq!(copy.name, "Loft (Copy)");
        assert_eq!(copy.audit.created_at, fixed_now());
    }

    #[tokio::test]
    async fn deep_duplicate_reparents_every_copy() {
        let owner = UserId::new();
        let stored = stored_project(owner);
        let id = stored.id;
        let room = Room::new(
            id,
            "Living",
            RoomType::LivingRoom,
            Vector3::ZERO,
            RoomDimensions::new(6.0, 5.0, Some(3.0)),
            owner,
            Utc::now(),
        );
        let sofa = Furniture::new(
            room.id,
            "Sofa",
            FurnitureType::Sofa,
            "64b7f0c2a1b2c3d4e5f60718",
            Dimensions::new(2.0, 1.0, 1.0),
            Vector3::new(1.0, 0.0, 1.0),
            owner,
            Utc::now(),
        );
        let original_room_id = room.id;
        let aggregate = ProjectAggregate::new(stored).with_rooms(vec![RoomContents {
            room,
            furniture: vec![sofa],
        }]);

        let mut projects = MockProjectRepositoryPort::new();
        projects
            .expect_load_aggregate()
            .returning(move |_| Ok(Some(aggregate.clone())));
        projects
            .expect_create_with_contents()
            .withf(move |copy, rooms| {
                rooms.len() == 1
                    && rooms[0].room.project == copy.id
                    && rooms[0].room.id != original_room_id
                    && rooms[0].furniture.len() == 1
                    && rooms[0].furniture[0].room == rooms[0].room.id
            })
            .times(1)
            .returning(|_, _| Ok(()));

        let copy = service(projects, MockRoomRepositoryPort::new())
            .duplicate_project(id, owner, true)
            .await
            .expect("duplicated");
        assert_eq!(copy.name, "Loft (Copy)");
    }
}
