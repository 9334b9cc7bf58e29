//! Project repository - SQLite document store for projects
//!
//! Also owns the multi-table operations on a whole project: cascading
//! delete, copying a project with its contents, and loading the aggregate.

use std::collections::HashMap;

use anyhow::{Context, Result};
use async_trait::async_trait;
use sqlx::{Row, Sqlite, SqlitePool};

use super::document::{decode, encode, timestamp};
use super::furniture_repository::insert_furniture;
use super::room_repository::insert_room;
use crate::application::ports::outbound::ProjectRepositoryPort;
use crate::application::validation::{ProjectListQuery, ProjectSortKey, SortOrder};
use crate::domain::aggregates::{ProjectAggregate, RoomContents};
use crate::domain::entities::{Furniture, Project, Room};
use crate::domain::value_objects::{ProjectId, RoomId, UserId};

#[derive(Clone)]
pub struct SqliteProjectRepository {
    pool: SqlitePool,
}

impl SqliteProjectRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

async fn insert_project<'e, E>(executor: E, project: &Project) -> Result<()>
where
    E: sqlx::Executor<'e, Database = Sqlite>,
{
    sqlx::query(
        r#"
        INSERT INTO projects (id, owner_id, name, version, document, created_at, last_modified_at)
        VALUES (?, ?, ?, ?, ?, ?, ?)
        "#,
    )
    .bind(project.id.to_string())
    .bind(project.owner.to_string())
    .bind(&project.name)
    .bind(i64::from(project.audit.version))
    .bind(encode(project)?)
    .bind(timestamp(project.audit.created_at))
    .bind(timestamp(project.audit.last_modified_at))
    .execute(executor)
    .await
    .context("Failed to insert project")?;
    Ok(())
}

fn order_clause(query: &ProjectListQuery) -> &'static str {
    match (query.sort_by, query.order) {
        (ProjectSortKey::Name, SortOrder::Asc) => "name ASC, rowid ASC",
        (ProjectSortKey::Name, SortOrder::Desc) => "name DESC, rowid DESC",
        (ProjectSortKey::CreatedAt, SortOrder::Asc) => "created_at ASC, rowid ASC",
        (ProjectSortKey::CreatedAt, SortOrder::Desc) => "created_at DESC, rowid DESC",
        (ProjectSortKey::LastModifiedAt, SortOrder::Asc) => "last_modified_at ASC, rowid ASC",
        (ProjectSortKey::LastModifiedAt, SortOrder::Desc) => "last_modified_at DESC, rowid DESC",
    }
}

#[async_trait]
impl ProjectRepositoryPort for SqliteProjectRepository {
    async fn create(&self, project: &Project) -> Result<()> {
        insert_project(&self.pool, project).await
    }

    async fn get(&self, id: ProjectId) -> Result<Option<Project>> {
        let row = sqlx::query("SELECT document FROM projects WHERE id = ?")
            .bind(id.to_string())
            .fetch_optional(&self.pool)
            .await
            .context("Failed to load project")?;

        row.map(|r| decode(r.get::<&str, _>("document"))).transpose()
    }

    async fn list_by_owner(&self, owner: UserId, query: ProjectListQuery) -> Result<Vec<Project>> {
        let sql = format!(
            "SELECT document FROM projects WHERE owner_id = ? ORDER BY {} LIMIT ? OFFSET ?",
            order_clause(&query)
        );
        let rows = sqlx::query(&sql)
            .bind(owner.to_string())
            .bind(i64::from(query.limit))
            .bind(i64::try_from(query.offset()).context("Page offset out of range")?)
            .fetch_all(&self.pool)
            .await
            .context("Failed to list projects")?;

        rows.iter()
            .map(|r| decode(r.get::<&str, _>("document")))
            .collect()
    }

    async fn count_by_owner(&self, owner: UserId) -> Result<u64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM projects WHERE owner_id = ?")
            .bind(owner.to_string())
            .fetch_one(&self.pool)
            .await
            .context("Failed to count projects")?;
        Ok(u64::try_from(count).unwrap_or_default())
    }

    async fn update(&self, project: &Project, expected_version: u32) -> Result<bool> {
        let result = sqlx::query(
            r#"
            UPDATE projects
            SET name = ?, version = ?, document = ?, last_modified_at = ?
            WHERE id = ? AND version = ?
            "#,
        )
        .bind(&project.name)
        .bind(i64::from(project.audit.version))
        .bind(encode(project)?)
        .bind(timestamp(project.audit.last_modified_at))
        .bind(project.id.to_string())
        .bind(i64::from(expected_version))
        .execute(&self.pool)
        .await
        .context("Failed to update project")?;

        Ok(result.rows_affected() == 1)
    }

    async fn delete_cascade(&self, id: ProjectId) -> Result<()> {
        // Rooms and furniture go with it through ON DELETE CASCADE
        sqlx::query("DELETE FROM projects WHERE id = ?")
            .bind(id.to_string())
            .execute(&self.pool)
            .await
            .context("Failed to delete project")?;
        Ok(())
    }

    async fn create_with_contents(&self, project: &Project, rooms: &[RoomContents]) -> Result<()> {
        let mut tx = self.pool.begin().await.context("Failed to begin transaction")?;

        insert_project(&mut *tx, project).await?;
        for contents in rooms {
            insert_room(&mut *tx, &contents.room).await?;
            for item in &contents.furniture {
                insert_furniture(&mut *tx, item).await?;
            }
        }

        tx.commit().await.context("Failed to commit project copy")?;
        Ok(())
    }

    async fn load_aggregate(&self, id: ProjectId) -> Result<Option<ProjectAggregate>> {
        let mut tx = self.pool.begin().await.context("Failed to begin transaction")?;

        let Some(row) = sqlx::query("SELECT document FROM projects WHERE id = ?")
            .bind(id.to_string())
            .fetch_optional(&mut *tx)
            .await
            .context("Failed to load project")?
        else {
            return Ok(None);
        };
        let project: Project = decode(row.get::<&str, _>("document"))?;

        let room_rows = sqlx::query(
            "SELECT document FROM rooms WHERE project_id = ? ORDER BY created_at ASC, rowid ASC",
        )
        .bind(id.to_string())
        .fetch_all(&mut *tx)
        .await
        .context("Failed to load rooms")?;

        let furniture_rows = sqlx::query(
            r#"
            SELECT f.document AS document FROM furniture f
            JOIN rooms r ON f.room_id = r.id
            WHERE r.project_id = ?
            ORDER BY f.created_at ASC, f.rowid ASC
            "#,
        )
        .bind(id.to_string())
        .fetch_all(&mut *tx)
        .await
        .context("Failed to load furniture")?;

        tx.commit().await.context("Failed to finish read transaction")?;

        let mut furniture_by_room: HashMap<RoomId, Vec<Furniture>> = HashMap::new();
        for row in &furniture_rows {
            let item: Furniture = decode(row.get::<&str, _>("document"))?;
            furniture_by_room.entry(item.room).or_default().push(item);
        }

        let rooms = room_rows
            .iter()
            .map(|row| {
                let room: Room = decode(row.get::<&str, _>("document"))?;
                let furniture = furniture_by_room.remove(&room.id).unwrap_or_default();
                Ok(RoomContents { room, furniture })
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Some(ProjectAggregate::new(project).with_rooms(rooms)))
    }
}
