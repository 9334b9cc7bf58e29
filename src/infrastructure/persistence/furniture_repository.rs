//! Furniture repository - SQLite document store for furniture items

use anyhow::{Context, Result};
use async_trait::async_trait;
use sqlx::{Row, Sqlite, SqlitePool};

use super::document::{decode, encode, timestamp};
use crate::application::ports::outbound::FurnitureRepositoryPort;
use crate::domain::entities::Furniture;
use crate::domain::value_objects::{FurnitureId, RoomId};

#[derive(Clone)]
pub struct SqliteFurnitureRepository {
    pool: SqlitePool,
}

impl SqliteFurnitureRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

pub(super) async fn insert_furniture<'e, E>(executor: E, item: &Furniture) -> Result<()>
where
    E: sqlx::Executor<'e, Database = Sqlite>,
{
    sqlx::query(
        "INSERT INTO furniture (id, room_id, version, document, created_at) VALUES (?, ?, ?, ?, ?)",
    )
    .bind(item.id.to_string())
    .bind(item.room.to_string())
    .bind(i64::from(item.audit.version))
    .bind(encode(item)?)
    .bind(timestamp(item.audit.created_at))
    .execute(executor)
    .await
    .context("Failed to insert furniture")?;
    Ok(())
}

#[async_trait]
impl FurnitureRepositoryPort for SqliteFurnitureRepository {
    async fn create(&self, furniture: &Furniture) -> Result<()> {
        insert_furniture(&self.pool, furniture).await
    }

    async fn get(&self, id: FurnitureId) -> Result<Option<Furniture>> {
        let row = sqlx::query("SELECT document FROM furniture WHERE id = ?")
            .bind(id.to_string())
            .fetch_optional(&self.pool)
            .await
            .context("Failed to load furniture")?;

        row.map(|r| decode(r.get::<&str, _>("document"))).transpose()
    }

    async fn list_by_room(&self, room: RoomId) -> Result<Vec<Furniture>> {
        let rows = sqlx::query(
            "SELECT document FROM furniture WHERE room_id = ? ORDER BY created_at DESC, rowid DESC",
        )
        .bind(room.to_string())
        .fetch_all(&self.pool)
        .await
        .context("Failed to list furniture")?;

        rows.iter()
            .map(|r| decode(r.get::<&str, _>("document")))
            .collect()
    }

    async fn update(&self, furniture: &Furniture, expected_version: u32) -> Result<bool> {
        // room_id follows the document so a moved item is found under its new room
        let result = sqlx::query(
            "UPDATE furniture SET room_id = ?, version = ?, document = ? WHERE id = ? AND version = ?",
        )
        .bind(furniture.room.to_string())
        .bind(i64::from(furniture.audit.version))
        .bind(encode(furniture)?)
        .bind(furniture.id.to_string())
        .bind(i64::from(expected_version))
        .execute(&self.pool)
        .await
        .context("Failed to update furniture")?;

        Ok(result.rows_affected() == 1)
    }

    async fn delete(&self, id: FurnitureId) -> Result<bool> {
        let result = sqlx::query("DELETE FROM furniture WHERE id = ?")
            .bind(id.to_string())
            .execute(&self.pool)
            .await
            .context("Failed to delete furniture")?;
        Ok(result.rows_affected() == 1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::ports::outbound::{ProjectRepositoryPort, RoomRepositoryPort};
    use crate::domain::entities::{Project, Room};
    use crate::domain::value_objects::{
        Dimensions, FurnitureType, RoomDimensions, RoomType, UserId, Vector3,
    };
    use crate::infrastructure::persistence::{
        connect_in_memory, SqliteProjectRepository, SqliteRoomRepository,
    };
    use chrono::Utc;

    async fn two_rooms() -> (SqliteFurnitureRepository, Room, Room) {
        let pool = connect_in_memory().await.expect("in-memory database");
        let owner = UserId::new();
        let project = Project::new(owner, "Loft", Dimensions::new(10.0, 8.0, 3.0), Utc::now());
        SqliteProjectRepository::new(pool.clone())
            .create(&project)
            .await
            .expect("create project");

        let rooms = SqliteRoomRepository::new(pool.clone());
        let make = |name: &str| {
            Room::new(
                project.id,
                name,
                RoomType::Office,
                Vector3::ZERO,
                RoomDimensions::new(3.0, 3.0, None),
                owner,
                Utc::now(),
            )
        };
        let (a, b) = (make("Study"), make("Den"));
        rooms.create(&a).await.expect("create room");
        rooms.create(&b).await.expect("create room");
        (SqliteFurnitureRepository::new(pool), a, b)
    }

    fn desk(room: &Room) -> Furniture {
        Furniture::new(
            room.id,
            "Desk",
            FurnitureType::Desk,
            "6f1c2d3e-4a5b-4c6d-8e7f-901234567890",
            Dimensions::new(1.4, 0.7, 0.75),
            Vector3::new(0.5, 0.0, 0.5),
            room.audit.created_by,
            Utc::now(),
        )
    }

    #[tokio::test]
    async fn relocated_item_moves_between_room_listings() {
        let (furniture, study, den) = two_rooms().await;
        let mut item = desk(&study);
        furniture.create(&item).await.expect("create");

        item.relocate(den.id, den.audit.created_by, Utc::now());
        assert!(furniture.update(&item, 1).await.expect("update"));

        assert!(furniture.list_by_room(study.id).await.expect("list").is_empty());
        let in_den = furniture.list_by_room(den.id).await.expect("list");
        assert_eq!(in_den.len(), 1);
        assert_eq!(in_den[0].id, item.id);
    }

    #[tokio::test]
    async fn delete_reports_whether_a_row_went_away() {
        let (furniture, study, _) = two_rooms().await;
        let item = desk(&study);
        furniture.create(&item).await.expect("create");

        assert!(furniture.delete(item.id).await.expect("delete"));
        assert!(!furniture.delete(item.id).await.expect("delete again"));
    }
}
