use chrono::Utc;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
    pub username: Option<String>,
    pub first_name: Option<String>,
    pub created_at: String,
}

impl User {
    /// Registers a user on first contact. Re-running for a known user
    /// refreshes the username without touching created_at.
    pub async fn upsert(
        pool: &sqlx::SqlitePool,
        id: i64,
        username: Option<String>,
        first_name: Option<String>,
    ) -> Result<Self, sqlx::Error> {
        let created_at = Utc::now().to_rfc3339();

        sqlx::query(
            "INSERT INTO users (id, username, first_name, created_at) VALUES (?, ?, ?, ?)
             ON CONFLICT(id) DO UPDATE SET username = excluded.username, first_name = excluded.first_name",
        )
        .bind(id)
        .bind(&username)
        .bind(&first_name)
        .bind(&created_at)
        .execute(pool)
        .await?;

        Self::find_by_id(pool, id)
            .await?
            .ok_or(sqlx::Error::RowNotFound)
    }

    pub async fn find_by_id(
        pool: &sqlx::SqlitePool,
        id: i64,
    ) -> Result<Option<Self>, sqlx::Error> {
        sqlx::query_as::<_, User>(
            "SELECT id, username, first_name, created_at FROM users WHERE id = ?",
        )
        .bind(id)
        .fetch_optional(pool)
        .await
    }
}
