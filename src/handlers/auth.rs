use axum::{extract::State, Extension, Json};
use serde::Deserialize;
use serde_json::{json, Value};

use crate::error::{ApiError, FieldError};
use crate::middleware::AuthUser;
use crate::services::accounts;
use crate::state::AppState;
use crate::store::models::User;

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: Option<String>,
    pub password: Option<String>,
}

/// POST /api/auth - authenticate and receive a token.
pub async fn login(
    State(state): State<AppState>,
    Json(body): Json<LoginRequest>,
) -> Result<Json<Value>, ApiError> {
    let email = body.email.as_deref().map(str::trim).unwrap_or("");
    let password = body.password.as_deref().unwrap_or("");

    let mut errors = Vec::new();
    if !super::is_email(email) {
        errors.push(FieldError::for_param("email", "Please provide a valid email."));
    }
    if password.is_empty() {
        errors.push(FieldError::for_param("password", "Password is required."));
    }
    if !errors.is_empty() {
        return Err(ApiError::validation(errors));
    }

    let token = accounts::authenticate(state.store.as_ref(), &state.tokens, email, password).await?;
    Ok(Json(json!({ "token": token })))
}

/// GET /api/auth - the authenticated user, password omitted.
pub async fn me(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
) -> Result<Json<User>, ApiError> {
    let user = accounts::get_self(state.store.as_ref(), auth.id).await?;
    Ok(Json(user))
}
