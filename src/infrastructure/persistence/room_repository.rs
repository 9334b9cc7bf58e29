//! Room repository - SQLite document store for rooms

use anyhow::{Context, Result};
use async_trait::async_trait;
use sqlx::{Row, Sqlite, SqlitePool};

use super::document::{decode, encode, timestamp};
use crate::application::ports::outbound::RoomRepositoryPort;
use crate::domain::entities::Room;
use crate::domain::value_objects::{ProjectId, RoomId};

#[derive(Clone)]
pub struct SqliteRoomRepository {
    pool: SqlitePool,
}

impl SqliteRoomRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

pub(super) async fn insert_room<'e, E>(executor: E, room: &Room) -> Result<()>
where
    E: sqlx::Executor<'e, Database = Sqlite>,
{
    sqlx::query(
        "INSERT INTO rooms (id, project_id, version, document, created_at) VALUES (?, ?, ?, ?, ?)",
    )
    .bind(room.id.to_string())
    .bind(room.project.to_string())
    .bind(i64::from(room.audit.version))
    .bind(encode(room)?)
    .bind(timestamp(room.audit.created_at))
    .execute(executor)
    .await
    .context("Failed to insert room")?;
    Ok(())
}

#[async_trait]
impl RoomRepositoryPort for SqliteRoomRepository {
    async fn create(&self, room: &Room) -> Result<()> {
        insert_room(&self.pool, room).await
    }

    async fn get(&self, id: RoomId) -> Result<Option<Room>> {
        let row = sqlx::query("SELECT document FROM rooms WHERE id = ?")
            .bind(id.to_string())
            .fetch_optional(&self.pool)
            .await
            .context("Failed to load room")?;

        row.map(|r| decode(r.get::<&str, _>("document"))).transpose()
    }

    async fn list_by_project(&self, project: ProjectId) -> Result<Vec<Room>> {
        let rows = sqlx::query(
            "SELECT document FROM rooms WHERE project_id = ? ORDER BY created_at DESC, rowid DESC",
        )
        .bind(project.to_string())
        .fetch_all(&self.pool)
        .await
        .context("Failed to list rooms")?;

        rows.iter()
            .map(|r| decode(r.get::<&str, _>("document")))
            .collect()
    }

    async fn list_ids_by_project(&self, project: ProjectId) -> Result<Vec<RoomId>> {
        let ids: Vec<String> = sqlx::query_scalar(
            "SELECT id FROM rooms WHERE project_id = ? ORDER BY created_at ASC, rowid ASC",
        )
        .bind(project.to_string())
        .fetch_all(&self.pool)
        .await
        .context("Failed to list room ids")?;

        ids.iter()
            .map(|id| id.parse().context("Stored room id is not a UUID"))
            .collect()
    }

    async fn update(&self, room: &Room, expected_version: u32) -> Result<bool> {
        let result = sqlx::query(
            "UPDATE rooms SET version = ?, document = ? WHERE id = ? AND version = ?",
        )
        .bind(i64::from(room.audit.version))
        .bind(encode(room)?)
        .bind(room.id.to_string())
        .bind(i64::from(expected_version))
        .execute(&self.pool)
        .await
        .context("Failed to update room")?;

        Ok(result.rows_affected() == 1)
    }

    async fn delete_cascade(&self, id: RoomId) -> Result<()> {
        sqlx::query("DELETE FROM rooms WHERE id = ?")
            .bind(id.to_string())
            .execute(&self.pool)
            .await
            .context("Failed to delete room")?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::ports::outbound::{FurnitureRepositoryPort, ProjectRepositoryPort};
    use crate::domain::entities::{Furniture, Project};
    use crate::domain::value_objects::{
        Dimensions, FurnitureType, RoomDimensions, RoomType, UserId, Vector3,
    };
    use crate::infrastructure::persistence::{
        connect_in_memory, SqliteFurnitureRepository, SqliteProjectRepository,
    };
    use chrono::{Duration, Utc};

    async fn setup() -> (SqliteRoomRepository, SqliteFurnitureRepository, Project) {
        let pool = connect_in_memory().await.expect("in-memory database");
        let project = Project::new(
            UserId::new(),
            "Loft",
            Dimensions::new(10.0, 8.0, 3.0),
            Utc::now(),
        );
        SqliteProjectRepository::new(pool.clone())
            .create(&project)
            .await
            .expect("create project");
        (
            SqliteRoomRepository::new(pool.clone()),
            SqliteFurnitureRepository::new(pool),
            project,
        )
    }

    fn room(project: &Project, name: &str, minutes_ago: i64) -> Room {
        Room::new(
            project.id,
            name,
            RoomType::Bedroom,
            Vector3::ZERO,
            RoomDimensions::new(4.0, 3.0, None),
            project.owner,
            Utc::now() - Duration::minutes(minutes_ago),
        )
    }

    #[tokio::test]
    async fn rooms_list_newest_first_and_ids_in_creation_order() {
        let (rooms, _, project) = setup().await;
        let older = room(&project, "Guest", 10);
        let newer = room(&project, "Master", 1);
        rooms.create(&older).await.expect("create");
        rooms.create(&newer).await.expect("create");

        let listed = rooms.list_by_project(project.id).await.expect("list");
        let names: Vec<_> = listed.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, ["Master", "Guest"]);

        let ids = rooms.list_ids_by_project(project.id).await.expect("ids");
        assert_eq!(ids, vec![older.id, newer.id]);
    }

    #[tokio::test]
    async fn stale_room_update_is_refused() {
        let (rooms, _, project) = setup().await;
        let mut stored = room(&project, "Guest", 0);
        rooms.create(&stored).await.expect("create");

        stored.notes = "north facing".to_string();
        stored.audit.touch(project.owner, Utc::now());
        assert!(rooms.update(&stored, 1).await.expect("update"));
        assert!(!rooms.update(&stored, 1).await.expect("stale"));
    }

    #[tokio::test]
    async fn deleting_a_room_removes_its_furniture() {
        let (rooms, furniture, project) = setup().await;
        let bedroom = room(&project, "Guest", 0);
        rooms.create(&bedroom).await.expect("create");
        let bed = Furniture::new(
            bedroom.id,
            "Bed",
            FurnitureType::Bed,
            "64b7f0c2a1b2c3d4e5f60718",
            Dimensions::new(1.6, 2.0, 0.5),
            Vector3::ZERO,
            project.owner,
            Utc::now(),
        );
        furniture.create(&bed).await.expect("create bed");

        rooms.delete_cascade(bedroom.id).await.expect("delete");
        assert_eq!(furniture.get(bed.id).await.expect("get"), None);
        assert!(rooms.list_by_project(project.id).await.expect("list").is_empty());
    }
}
