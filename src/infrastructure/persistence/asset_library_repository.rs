use anyhow::{Context, Result};
use async_trait::async_trait;
use sqlx::{Row, SqlitePool};

use super::document::{decode, encode, timestamp};
use crate::application::ports::outbound::AssetLibraryRepositoryPort;
use crate::domain::entities::AssetLibrary;
use crate::domain::value_objects::{AssetLibraryId, UserId};

#[derive(Clone)]
pub struct SqliteAssetLibraryRepository {
    pool: SqlitePool,
}

impl SqliteAssetLibraryRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl AssetLibraryRepositoryPort for SqliteAssetLibraryRepository {
    async fn create(&self, library: &AssetLibrary) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO asset_libraries (id, owner_id, is_public, document, created_at)
            VALUES (?, ?, ?, ?, ?)
            "#,
        )
        .bind(library.id.to_string())
        .bind(library.owner.to_string())
        .bind(library.is_public)
        .bind(encode(library)?)
        .bind(timestamp(library.created_at))
        .execute(&self.pool)
        .await
        .context("Failed to insert asset library")?;
        Ok(())
    }

    async fn get(&self, id: AssetLibraryId) -> Result<Option<AssetLibrary>> {
        let row = sqlx::query("SELECT document FROM asset_libraries WHERE id = ?")
            .bind(id.to_string())
            .fetch_optional(&self.pool)
            .await
            .context("Failed to load asset library")?;

        row.map(|r| decode(r.get::<&str, _>("document"))).transpose()
    }

    async fn list_visible_to(&self, user: UserId) -> Result<Vec<AssetLibrary>> {
        let rows = sqlx::query(
            r#"
            SELECT document FROM asset_libraries
            WHERE owner_id = ? OR is_public = 1
            ORDER BY created_at DESC, rowid DESC
            "#,
        )
        .bind(user.to_string())
        .fetch_all(&self.pool)
        .await
        .context("Failed to list asset libraries")?;

        rows.iter()
            .map(|r| decode(r.get::<&str, _>("document")))
            .collect()
    }

    async fn update(&self, library: &AssetLibrary) -> Result<()> {
        sqlx::query("UPDATE asset_libraries SET is_public = ?, document = ? WHERE id = ?")
            .bind(library.is_public)
            .bind(encode(library)?)
            .bind(library.id.to_string())
            .execute(&self.pool)
            .await
            .context("Failed to update asset library")?;
        Ok(())
    }

    async fn delete(&self, id: AssetLibraryId) -> Result<()> {
        sqlx::query("DELETE FROM asset_libraries WHERE id = ?")
            .bind(id.to_string())
            .execute(&self.pool)
            .await
            .context("Failed to delete asset library")?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::persistence::connect_in_memory;
    use chrono::Utc;

    #[tokio::test]
    async fn listing_shows_own_and_public_libraries() {
        let libraries =
            SqliteAssetLibraryRepository::new(connect_in_memory().await.expect("in-memory database"));
        let me = UserId::new();
        let other = UserId::new();

        let mine = AssetLibrary::new(me, "Mine", Utc::now());
        let shared = AssetLibrary::new(other, "Shared", Utc::now()).with_visibility(true);
        let hidden = AssetLibrary::new(other, "Hidden", Utc::now());
        for library in [&mine, &shared, &hidden] {
            libraries.create(library).await.expect("create");
        }

        let visible = libraries.list_visible_to(me).await.expect("list");
        let mut names: Vec<_> = visible.iter().map(|l| l.name.as_str()).collect();
        names.sort_unstable();
        assert_eq!(names, ["Mine", "Shared"]);
    }

    #[tokio::test]
    async fn deleted_library_is_gone() {
        let libraries =
            SqliteAssetLibraryRepository::new(connect_in_memory().await.expect("in-memory database"));
        let library = AssetLibrary::new(UserId::new(), "Mine", Utc::now());
        libraries.create(&library).await.expect("create");
        libraries.delete(library.id).await.expect("delete");
        assert_eq!(libraries.get(library.id).await.expect("get"), None);
    }
}
