use axum::{extract::State, Json};
use serde::Deserialize;
use serde_json::{json, Value};

use crate::error::{ApiError, FieldError};
use crate::services::accounts::{self, NewAccount};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    pub name: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
}

/// POST /api/users - register a new account and receive a token.
pub async fn register(
    State(state): State<AppState>,
    Json(body): Json<RegisterRequest>,
) -> Result<Json<Value>, ApiError> {
    let name = body.name.as_deref().map(str::trim).unwrap_or("");
    let email = body.email.as_deref().map(str::trim).unwrap_or("");
    let password = body.password.as_deref().unwrap_or("");

    let mut errors = Vec::new();
    if name.is_empty() {
        errors.push(FieldError::for_param("name", "Name is required."));
    }
    if !super::is_email(email) {
        errors.push(FieldError::for_param("email", "Please provide a valid email."));
    }
    if password.chars().count() < 6 {
        errors.push(FieldError::for_param(
            "password",
            "Please enter a password with 6 or more characters.",
        ));
    }
    if !errors.is_empty() {
        return Err(ApiError::validation(errors));
    }

    let token = accounts::register(
        state.store.as_ref(),
        &state.tokens,
        NewAccount {
            name: name.to_string(),
            email: email.to_string(),
            password: password.to_string(),
        },
    )
    .await?;

    Ok(Json(json!({ "token": token })))
}
