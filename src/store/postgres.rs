use async_trait::async_trait;
use sqlx::postgres::PgPoolOptions;
use sqlx::{PgPool, Row};
use uuid::Uuid;

use super::models::{Post, Profile, User};
use super::{Store, StoreError};

// Profiles and posts are stored one row per aggregate, with the embedded
// experience/education/like/comment lists kept verbatim inside a JSONB
// column so the persisted field names and nested shapes match the wire
// format exactly.
const CREATE_USERS: &str = "\
CREATE TABLE IF NOT EXISTS users (
    id UUID PRIMARY KEY,
    name TEXT NOT NULL,
    email TEXT NOT NULL UNIQUE,
    avatar TEXT NOT NULL,
    password TEXT NOT NULL,
    date TIMESTAMPTZ NOT NULL
)";

const CREATE_PROFILES: &str = "\
CREATE TABLE IF NOT EXISTS profiles (
    user_id UUID PRIMARY KEY,
    data JSONB NOT NULL
)";

const CREATE_POSTS: &str = "\
CREATE TABLE IF NOT EXISTS posts (
    id UUID PRIMARY KEY,
    user_id UUID NOT NULL,
    date TIMESTAMPTZ NOT NULL,
    data JSONB NOT NULL
)";

/// Postgres-backed aggregate store.
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    /// Build a store over a lazily-connected pool; the first query opens
    /// the actual connection.
    pub fn connect_lazy(url: &str, max_connections: u32) -> Result<Self, StoreError> {
        let pool = PgPoolOptions::new()
            .max_connections(max_connections)
            .connect_lazy(url)?;
        Ok(Self { pool })
    }

    pub fn from_pool(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Create the three aggregate tables if they do not exist yet. This is
    /// startup bootstrap, not a migration system.
    pub async fn ensure_schema(&self) -> Result<(), StoreError> {
        sqlx::query(CREATE_USERS).execute(&self.pool).await?;
        sqlx::query(CREATE_PROFILES).execute(&self.pool).await?;
        sqlx::query(CREATE_POSTS).execute(&self.pool).await?;
        Ok(())
    }
}

#[async_trait]
impl Store for PgStore {
    async fn insert_user(&self, user: User) -> Result<(), StoreError> {
        sqlx::query(
            "INSERT INTO users (id, name, email, avatar, password, date) \
             VALUES ($1, $2, $3, $4, $5, $6)",
        )
        .bind(user.id)
        .bind(&user.name)
        .bind(&user.email)
        .bind(&user.avatar)
        .bind(&user.password)
        .bind(user.date)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn user_by_id(&self, id: Uuid) -> Result<Option<User>, StoreError> {
        let user = sqlx::query_as::<_, User>(
            "SELECT id, name, email, avatar, password, date FROM users WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(user)
    }

    async fn user_by_email(&self, email: &str) -> Result<Option<User>, StoreError> {
        let user = sqlx::query_as::<_, User>(
            "SELECT id, name, email, avatar, password, date FROM users WHERE email = $1",
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await?;
        Ok(user)
    }

    async fn delete_user(&self, id: Uuid) -> Result<(), StoreError> {
        sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    async fn profile_by_user(&self, user: Uuid) -> Result<Option<Profile>, StoreError> {
        let row = sqlx::query("SELECT data FROM profiles WHERE user_id = $1")
            .bind(user)
            .fetch_optional(&self.pool)
            .await?;

        match row {
            Some(row) => {
                let data: serde_json::Value = row.try_get("data")?;
                Ok(Some(serde_json::from_value(data)?))
            }
            None => Ok(None),
        }
    }

    async fn list_profiles(&self) -> Result<Vec<Profile>, StoreError> {
        let rows = sqlx::query("SELECT data FROM profiles")
            .fetch_all(&self.pool)
            .await?;

        let mut profiles = Vec::with_capacity(rows.len());
        for row in rows {
            let data: serde_json::Value = row.try_get("data")?;
            profiles.push(serde_json::from_value(data)?);
        }
        Ok(profiles)
    }

    async fn put_profile(&self, profile: Profile) -> Result<(), StoreError> {
        let data = serde_json::to_value(&profile)?;
        sqlx::query(
            "INSERT INTO profiles (user_id, data) VALUES ($1, $2) \
             ON CONFLICT (user_id) DO UPDATE SET data = EXCLUDED.data",
        )
        .bind(profile.user)
        .bind(data)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn delete_profile(&self, user: Uuid) -> Result<(), StoreError> {
        sqlx::query("DELETE FROM profiles WHERE user_id = $1")
            .bind(user)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    async fn post_by_id(&self, id: Uuid) -> Result<Option<Post>, StoreError> {
        let row = sqlx::query("SELECT data FROM posts WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        match row {
            Some(row) => {
                let data: serde_json::Value = row.try_get("data")?;
                Ok(Some(serde_json::from_value(data)?))
            }
            None => Ok(None),
        }
    }

    async fn list_posts(&self) -> Result<Vec<Post>, StoreError> {
        let rows = sqlx::query("SELECT data FROM posts ORDER BY date DESC")
            .fetch_all(&self.pool)
            .await?;

        let mut posts = Vec::with_capacity(rows.len());
        for row in rows {
            let data: serde_json::Value = row.try_get("data")?;
            posts.push(serde_json::from_value(data)?);
        }
        Ok(posts)
    }

    async fn put_post(&self, post: Post) -> Result<(), StoreError> {
        let data = serde_json::to_value(&post)?;
        sqlx::query(
            "INSERT INTO posts (id, user_id, date, data) VALUES ($1, $2, $3, $4) \
             ON CONFLICT (id) DO UPDATE SET date = EXCLUDED.date, data = EXCLUDED.data",
        )
        .bind(post.id)
        .bind(post.user)
        .bind(post.date)
        .bind(data)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn delete_post(&self, id: Uuid) -> Result<(), StoreError> {
        sqlx::query("DELETE FROM posts WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(())
    }
}
