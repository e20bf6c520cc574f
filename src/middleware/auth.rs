use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};
use uuid::Uuid;

use crate::error::ApiError;
use crate::state::AppState;

/// The header carrying the raw signed token (no "Bearer " scheme).
pub const TOKEN_HEADER: &str = "x-auth-token";

/// Authenticated user context extracted from a verified token.
#[derive(Clone, Debug)]
pub struct AuthUser {
    pub id: Uuid,
}

/// Token authentication middleware.
///
/// Reads the `x-auth-token` header, verifies it against the token service,
/// and injects the resolved identity into the request's extensions. This is
/// a pure gatekeeper: it trusts the claim in the token and never touches
/// the store. Missing and invalid tokens both map to 401, with distinct
/// messages for observability.
pub async fn token_auth(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let token = request
        .headers()
        .get(TOKEN_HEADER)
        .and_then(|value| value.to_str().ok())
        .map(str::to_owned)
        .ok_or_else(|| ApiError::unauthorized("No token received, authorization is denied."))?;

    let user_id = state
        .tokens
        .verify(&token)
        .map_err(|_| ApiError::unauthorized("Token is invalid."))?;

    request.extensions_mut().insert(AuthUser { id: user_id });
    Ok(next.run(request).await)
}
