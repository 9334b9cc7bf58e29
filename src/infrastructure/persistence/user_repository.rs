use anyhow::{Context, Result};
use async_trait::async_trait;
use sqlx::{Row, SqlitePool};

use super::document::{decode, encode, timestamp};
use crate::application::ports::outbound::UserRepositoryPort;
use crate::domain::entities::User;
use crate::domain::value_objects::UserId;

/// Users keyed by id, with a unique index on the lower-cased email
#[derive(Clone)]
pub struct SqliteUserRepository {
    pool: SqlitePool,
}

impl SqliteUserRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserRepositoryPort for SqliteUserRepository {
    async fn create(&self, user: &User) -> Result<bool> {
        let result = sqlx::query(
            r#"
            INSERT INTO users (id, email, document, created_at)
            VALUES (?, ?, ?, ?)
            ON CONFLICT(email) DO NOTHING
            "#,
        )
        .bind(user.id.to_string())
        .bind(&user.email)
        .bind(encode(user)?)
        .bind(timestamp(user.created_at))
        .execute(&self.pool)
        .await
        .context("Failed to insert user")?;

        Ok(result.rows_affected() == 1)
    }

    async fn get(&self, id: UserId) -> Result<Option<User>> {
        let row = sqlx::query("SELECT document FROM users WHERE id = ?")
            .bind(id.to_string())
            .fetch_optional(&self.pool)
            .await
            .context("Failed to load user")?;

        row.map(|r| decode(r.get::<&str, _>("document"))).transpose()
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>> {
        let row = sqlx::query("SELECT document FROM users WHERE email = ?")
            .bind(email)
            .fetch_optional(&self.pool)
            .await
            .context("Failed to look up user by email")?;

        row.map(|r| decode(r.get::<&str, _>("document"))).transpose()
    }

    async fn update(&self, user: &User) -> Result<()> {
        sqlx::query("UPDATE users SET document = ? WHERE id = ?")
            .bind(encode(user)?)
            .bind(user.id.to_string())
            .execute(&self.pool)
            .await
            .context("Failed to update user")?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::value_objects::Theme;
    use crate::infrastructure::persistence::connect_in_memory;
    use chrono::Utc;

    async fn repo() -> SqliteUserRepository {
        SqliteUserRepository::new(connect_in_memory().await.expect("in-memory database"))
    }

    #[tokio::test]
    async fn second_account_with_same_email_is_refused() {
        let users = repo().await;
        let first = User::new("ada@example.com", "$argon2id$x", "Ada", Utc::now());
        let second = User::new("ada@example.com", "$argon2id$y", "Imposter", Utc::now());

        assert!(users.create(&first).await.expect("create"));
        assert!(!users.create(&second).await.expect("create duplicate"));

        let found = users
            .find_by_email("ada@example.com")
            .await
            .expect("find")
            .expect("exists");
        assert_eq!(found.id, first.id);
        assert_eq!(found.password_hash, "$argon2id$x");
    }

    #[tokio::test]
    async fn updated_preferences_persist() {
        let users = repo().await;
        let mut user = User::new("ada@example.com", "$argon2id$x", "Ada", Utc::now());
        users.create(&user).await.expect("create");

        let mut prefs = user.preferences.clone();
        prefs.theme = Theme::Dark;
        user.update_preferences(prefs, Utc::now());
        users.update(&user).await.expect("update");

        let stored = users.get(user.id).await.expect("get").expect("exists");
        assert_eq!(stored.preferences.theme, Theme::Dark);
    }
}
