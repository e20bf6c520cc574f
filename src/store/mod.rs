use async_trait::async_trait;
use thiserror::Error;
use uuid::Uuid;

pub mod memory;
pub mod models;
pub mod postgres;

pub use memory::MemoryStore;
pub use models::{Post, Profile, User};
pub use postgres::PgStore;

/// Errors from the aggregate store.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("not found: {0}")]
    NotFound(String),

    #[error("malformed id: {0}")]
    MalformedId(String),

    #[error("storage backend error: {0}")]
    Backend(String),
}

impl From<sqlx::Error> for StoreError {
    fn from(err: sqlx::Error) -> Self {
        StoreError::Backend(err.to_string())
    }
}

impl From<serde_json::Error> for StoreError {
    fn from(err: serde_json::Error) -> Self {
        StoreError::Backend(format!("aggregate (de)serialization failed: {}", err))
    }
}

/// Persistence boundary for the User/Profile/Post aggregates.
///
/// All mutations follow read-modify-write: callers load an aggregate, edit
/// it, and put it back whole. No concurrency control is applied; concurrent
/// writers to the same aggregate are last-write-wins.
#[async_trait]
pub trait Store: Send + Sync {
    // Users
    async fn insert_user(&self, user: User) -> Result<(), StoreError>;
    async fn user_by_id(&self, id: Uuid) -> Result<Option<User>, StoreError>;
    async fn user_by_email(&self, email: &str) -> Result<Option<User>, StoreError>;
    async fn delete_user(&self, id: Uuid) -> Result<(), StoreError>;

    // Profiles (keyed by owning user; at most one per user)
    async fn profile_by_user(&self, user: Uuid) -> Result<Option<Profile>, StoreError>;
    async fn list_profiles(&self) -> Result<Vec<Profile>, StoreError>;
    async fn put_profile(&self, profile: Profile) -> Result<(), StoreError>;
    async fn delete_profile(&self, user: Uuid) -> Result<(), StoreError>;

    // Posts
    async fn post_by_id(&self, id: Uuid) -> Result<Option<Post>, StoreError>;
    /// All posts, newest first.
    async fn list_posts(&self) -> Result<Vec<Post>, StoreError>;
    async fn put_post(&self, post: Post) -> Result<(), StoreError>;
    async fn delete_post(&self, id: Uuid) -> Result<(), StoreError>;
}
