use axum::{
    extract::{Path, State},
    Extension, Json,
};
use serde::Deserialize;
use serde_json::{json, Value};
use uuid::Uuid;

use crate::error::{ApiError, FieldError};
use crate::middleware::AuthUser;
use crate::services::posts;
use crate::state::AppState;
use crate::store::models::{Comment, Like, Post};

#[derive(Debug, Deserialize)]
pub struct PostBody {
    pub text: Option<String>,
}

fn parse_post_id(raw: &str) -> Result<Uuid, ApiError> {
    Uuid::parse_str(raw).map_err(|_| ApiError::bad_request("Post id provided is not valid."))
}

fn require_text(body: &PostBody, msg: &str) -> Result<String, ApiError> {
    match body.text.as_deref().map(str::trim) {
        Some(text) if !text.is_empty() => Ok(text.to_string()),
        _ => Err(ApiError::validation(vec![FieldError::for_param("text", msg)])),
    }
}

/// POST /api/posts - create a post.
pub async fn create(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
    Json(body): Json<PostBody>,
) -> Result<Json<Post>, ApiError> {
    let text = require_text(&body, "Text is required.")?;
    let post = posts::create_post(state.store.as_ref(), auth.id, text).await?;
    Ok(Json(post))
}

/// GET /api/posts - all posts, newest first.
pub async fn list(State(state): State<AppState>) -> Result<Json<Vec<Post>>, ApiError> {
    let posts = posts::list_posts(state.store.as_ref()).await?;
    Ok(Json(posts))
}

/// GET /api/posts/:id
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Post>, ApiError> {
    let post_id = parse_post_id(&id)?;
    let post = posts::get_post(state.store.as_ref(), post_id).await?;
    Ok(Json(post))
}

/// DELETE /api/posts/:id - delete own post.
pub async fn delete(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
    Path(id): Path<String>,
) -> Result<Json<Value>, ApiError> {
    let post_id = parse_post_id(&id)?;
    posts::delete_post(state.store.as_ref(), post_id, auth.id).await?;
    Ok(Json(json!({ "msg": "Post has been deleted." })))
}

/// PUT /api/posts/like/:id - toggle a like, returning the like list.
pub async fn like(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
    Path(id): Path<String>,
) -> Result<Json<Vec<Like>>, ApiError> {
    let post_id = parse_post_id(&id)?;
    let likes = posts::toggle_like(state.store.as_ref(), post_id, auth.id).await?;
    Ok(Json(likes))
}

/// POST /api/posts/comment/:post_id - add a comment, returning the comment list.
pub async fn comment(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
    Path(post_id): Path<String>,
    Json(body): Json<PostBody>,
) -> Result<Json<Vec<Comment>>, ApiError> {
    let post_id = parse_post_id(&post_id)?;
    let text = require_text(&body, "Text field cannot be empty.")?;
    let comments = posts::add_comment(state.store.as_ref(), post_id, auth.id, text).await?;
    Ok(Json(comments))
}

/// DELETE /api/posts/comment/:post_id/:comment_id - delete own comment.
pub async fn delete_comment(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
    Path((post_id, comment_id)): Path<(String, String)>,
) -> Result<Json<Vec<Comment>>, ApiError> {
    let post_id = parse_post_id(&post_id)?;
    let comment_id = Uuid::parse_str(&comment_id)
        .map_err(|_| ApiError::bad_request("Comment id provided is not valid."))?;
    let comments =
        posts::delete_comment(state.store.as_ref(), post_id, comment_id, auth.id).await?;
    Ok(Json(comments))
}
