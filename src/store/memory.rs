use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

use super::models::{Post, Profile, User};
use super::{Store, StoreError};

#[derive(Default)]
struct Inner {
    users: HashMap<Uuid, User>,
    profiles: HashMap<Uuid, Profile>,
    posts: HashMap<Uuid, Post>,
}

/// In-memory aggregate store backed by a single `RwLock`. Used by unit and
/// router tests; mirrors the Postgres store's semantics exactly.
#[derive(Clone, Default)]
pub struct MemoryStore {
    inner: Arc<RwLock<Inner>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl Store for MemoryStore {
    async fn insert_user(&self, user: User) -> Result<(), StoreError> {
        self.inner.write().await.users.insert(user.id, user);
        Ok(())
    }

    async fn user_by_id(&self, id: Uuid) -> Result<Option<User>, StoreError> {
        Ok(self.inner.read().await.users.get(&id).cloned())
    }

    async fn user_by_email(&self, email: &str) -> Result<Option<User>, StoreError> {
        // Case-sensitive exact match, same as the persistent store
        let inner = self.inner.read().await;
        Ok(inner.users.values().find(|u| u.email == email).cloned())
    }

    async fn delete_user(&self, id: Uuid) -> Result<(), StoreError> {
        self.inner.write().await.users.remove(&id);
        Ok(())
    }

    async fn profile_by_user(&self, user: Uuid) -> Result<Option<Profile>, StoreError> {
        Ok(self.inner.read().await.profiles.get(&user).cloned())
    }

    async fn list_profiles(&self) -> Result<Vec<Profile>, StoreError> {
        Ok(self.inner.read().await.profiles.values().cloned().collect())
    }

    async fn put_profile(&self, profile: Profile) -> Result<(), StoreError> {
        self.inner.write().await.profiles.insert(profile.user, profile);
        Ok(())
    }

    async fn delete_profile(&self, user: Uuid) -> Result<(), StoreError> {
        self.inner.write().await.profiles.remove(&user);
        Ok(())
    }

    async fn post_by_id(&self, id: Uuid) -> Result<Option<Post>, StoreError> {
        Ok(self.inner.read().await.posts.get(&id).cloned())
    }

    async fn list_posts(&self) -> Result<Vec<Post>, StoreError> {
        let mut posts: Vec<Post> = self.inner.read().await.posts.values().cloned().collect();
        posts.sort_by(|a, b| b.date.cmp(&a.date));
        Ok(posts)
    }

    async fn put_post(&self, post: Post) -> Result<(), StoreError> {
        self.inner.write().await.posts.insert(post.id, post);
        Ok(())
    }

    async fn delete_post(&self, id: Uuid) -> Result<(), StoreError> {
        self.inner.write().await.posts.remove(&id);
        Ok(())
    }
}
