use uuid::Uuid;

use crate::error::ApiError;
use crate::store::{
    models::{Comment, Like, Post},
    Store,
};

/// Create a post, snapshotting the author's name and avatar at creation
/// time. The snapshot is never updated afterwards.
pub async fn create_post(store: &dyn Store, user_id: Uuid, text: String) -> Result<Post, ApiError> {
    let user = store
        .user_by_id(user_id)
        .await?
        .ok_or_else(|| ApiError::bad_request("User not found."))?;

    let post = Post::new(user_id, text, user.name, user.avatar);
    store.put_post(post.clone()).await?;
    Ok(post)
}

/// All posts, newest first.
pub async fn list_posts(store: &dyn Store) -> Result<Vec<Post>, ApiError> {
    Ok(store.list_posts().await?)
}

pub async fn get_post(store: &dyn Store, post_id: Uuid) -> Result<Post, ApiError> {
    store
        .post_by_id(post_id)
        .await?
        .ok_or_else(|| ApiError::not_found("No post found by that ID."))
}

/// Delete a post after an ownership check.
pub async fn delete_post(store: &dyn Store, post_id: Uuid, user_id: Uuid) -> Result<(), ApiError> {
    let post = store
        .post_by_id(post_id)
        .await?
        .ok_or_else(|| ApiError::not_found("No post by that ID was found."))?;

    if post.user != user_id {
        return Err(ApiError::forbidden("User is not authorized to delete this post."));
    }

    store.delete_post(post_id).await?;
    Ok(())
}

/// Toggle the caller's like on a post and return the resulting like list.
///
/// A second like from the same user removes the first one. Removal clears
/// every matching entry, so a duplicate state left by a concurrent toggle
/// still collapses to zero.
pub async fn toggle_like(
    store: &dyn Store,
    post_id: Uuid,
    user_id: Uuid,
) -> Result<Vec<Like>, ApiError> {
    let mut post = store
        .post_by_id(post_id)
        .await?
        .ok_or_else(|| ApiError::not_found("No post found."))?;

    let already_liked = post.likes.iter().any(|like| like.user == user_id);
    if already_liked {
        post.likes.retain(|like| like.user != user_id);
    } else {
        post.likes.insert(0, Like { user: user_id });
    }

    let likes = post.likes.clone();
    store.put_post(post).await?;
    Ok(likes)
}

/// Prepend a comment carrying a name/avatar snapshot of its author.
pub async fn add_comment(
    store: &dyn Store,
    post_id: Uuid,
    user_id: Uuid,
    text: String,
) -> Result<Vec<Comment>, ApiError> {
    let user = store
        .user_by_id(user_id)
        .await?
        .ok_or_else(|| ApiError::not_found("User not found."))?;

    let mut post = store
        .post_by_id(post_id)
        .await?
        .ok_or_else(|| ApiError::not_found("No Post found by that ID."))?;

    let comment = Comment::new(user_id, text, user.name, user.avatar);
    post.comments.insert(0, comment);

    let comments = post.comments.clone();
    store.put_post(post).await?;
    Ok(comments)
}

/// Remove a comment by id, with an ownership check on the comment author.
pub async fn delete_comment(
    store: &dyn Store,
    post_id: Uuid,
    comment_id: Uuid,
    user_id: Uuid,
) -> Result<Vec<Comment>, ApiError> {
    let mut post = store
        .post_by_id(post_id)
        .await?
        .ok_or_else(|| ApiError::not_found("Post not found."))?;

    let comment = post
        .comments
        .iter()
        .find(|c| c.id == comment_id)
        .ok_or_else(|| ApiError::not_found("Comment not found."))?;

    if comment.user != user_id {
        return Err(ApiError::forbidden("You are not authorized to delete this comment."));
    }

    post.comments.retain(|c| c.id != comment_id);

    let comments = post.comments.clone();
    store.put_post(post).await?;
    Ok(comments)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::models::User;
    use crate::store::MemoryStore;

    async fn seed_user(store: &MemoryStore, name: &str, email: &str) -> User {
        let user = User::new(name.into(), email.into(), "avatar-url".into(), "hash".into());
        store.insert_user(user.clone()).await.unwrap();
        user
    }

    #[tokio::test]
    async fn create_post_snapshots_author() {
        let store = MemoryStore::new();
        let user = seed_user(&store, "Alice", "a@x.com").await;

        let post = create_post(&store, user.id, "hello".into()).await.unwrap();
        assert_eq!(post.name, "Alice");
        assert_eq!(post.avatar, "avatar-url");
        assert_eq!(post.user, user.id);
        assert!(post.likes.is_empty());
    }

    #[tokio::test]
    async fn create_post_requires_existing_user() {
        let store = MemoryStore::new();
        let err = create_post(&store, Uuid::new_v4(), "hello".into()).await.unwrap_err();
        assert_eq!(err.status_code().as_u16(), 400);
    }

    #[tokio::test]
    async fn double_like_toggles_back_to_zero() {
        let store = MemoryStore::new();
        let user = seed_user(&store, "Alice", "a@x.com").await;
        let post = create_post(&store, user.id, "hello".into()).await.unwrap();

        let likes = toggle_like(&store, post.id, user.id).await.unwrap();
        assert_eq!(likes.len(), 1);

        let likes = toggle_like(&store, post.id, user.id).await.unwrap();
        assert!(likes.is_empty());
    }

    #[tokio::test]
    async fn unlike_clears_duplicate_entries() {
        let store = MemoryStore::new();
        let user = seed_user(&store, "Alice", "a@x.com").await;
        let mut post = create_post(&store, user.id, "hello".into()).await.unwrap();

        // Simulate a duplicate state left behind by racing toggles
        post.likes.push(Like { user: user.id });
        post.likes.push(Like { user: user.id });
        store.put_post(post.clone()).await.unwrap();

        let likes = toggle_like(&store, post.id, user.id).await.unwrap();
        assert!(likes.is_empty());
    }

    #[tokio::test]
    async fn likes_from_distinct_users_coexist() {
        let store = MemoryStore::new();
        let alice = seed_user(&store, "Alice", "a@x.com").await;
        let bob = seed_user(&store, "Bob", "b@x.com").await;
        let post = create_post(&store, alice.id, "hello".into()).await.unwrap();

        toggle_like(&store, post.id, alice.id).await.unwrap();
        let likes = toggle_like(&store, post.id, bob.id).await.unwrap();
        assert_eq!(likes.len(), 2);
        // Newest like is prepended
        assert_eq!(likes[0].user, bob.id);
    }

    #[tokio::test]
    async fn delete_post_enforces_ownership() {
        let store = MemoryStore::new();
        let alice = seed_user(&store, "Alice", "a@x.com").await;
        let bob = seed_user(&store, "Bob", "b@x.com").await;
        let post = create_post(&store, alice.id, "hello".into()).await.unwrap();

        let err = delete_post(&store, post.id, bob.id).await.unwrap_err();
        assert!(matches!(err, ApiError::Forbidden(_)));
        assert_eq!(err.status_code().as_u16(), 401);

        delete_post(&store, post.id, alice.id).await.unwrap();
        assert!(store.post_by_id(post.id).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn comments_prepend_and_delete_by_id() {
        let store = MemoryStore::new();
        let alice = seed_user(&store, "Alice", "a@x.com").await;
        let post = create_post(&store, alice.id, "hello".into()).await.unwrap();

        add_comment(&store, post.id, alice.id, "first".into()).await.unwrap();
        let comments = add_comment(&store, post.id, alice.id, "second".into()).await.unwrap();
        assert_eq!(comments.len(), 2);
        assert_eq!(comments[0].text, "second");

        let target = comments[1].id;
        let comments = delete_comment(&store, post.id, target, alice.id).await.unwrap();
        assert_eq!(comments.len(), 1);
        assert_eq!(comments[0].text, "second");
    }

    #[tokio::test]
    async fn delete_comment_enforces_ownership() {
        let store = MemoryStore::new();
        let alice = seed_user(&store, "Alice", "a@x.com").await;
        let bob = seed_user(&store, "Bob", "b@x.com").await;
        let post = create_post(&store, alice.id, "hello".into()).await.unwrap();

        let comments = add_comment(&store, post.id, alice.id, "mine".into()).await.unwrap();
        let err = delete_comment(&store, post.id, comments[0].id, bob.id).await.unwrap_err();
        assert!(matches!(err, ApiError::Forbidden(_)));
    }

    #[tokio::test]
    async fn delete_missing_comment_is_not_found() {
        let store = MemoryStore::new();
        let alice = seed_user(&store, "Alice", "a@x.com").await;
        let post = create_post(&store, alice.id, "hello".into()).await.unwrap();

        let err = delete_comment(&store, post.id, Uuid::new_v4(), alice.id).await.unwrap_err();
        assert_eq!(err.status_code().as_u16(), 404);
        assert_eq!(err.body()["msg"], "Comment not found.");
    }
}
