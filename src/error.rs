// HTTP API Error Types
use axum::{http::StatusCode, response::IntoResponse, Json};
use serde::Serialize;
use serde_json::{json, Value};

use crate::store::StoreError;

/// A single validation failure, rendered as `{"msg": ..., "param": ...}`
/// inside the `errors` array of a 400 response.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct FieldError {
    pub msg: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub param: Option<String>,
}

impl FieldError {
    pub fn new(msg: impl Into<String>) -> Self {
        Self { msg: msg.into(), param: None }
    }

    pub fn for_param(param: impl Into<String>, msg: impl Into<String>) -> Self {
        Self { msg: msg.into(), param: Some(param.into()) }
    }
}

/// HTTP API error with appropriate status codes and client-friendly messages.
///
/// Two wire shapes exist: validation-style failures (including duplicate
/// email and bad credentials) render as `{"errors": [{"msg": ...}]}`, all
/// others as `{"msg": ...}`. `Forbidden` deliberately maps to 401 rather
/// than 403 to keep the external contract unchanged.
#[derive(Debug)]
pub enum ApiError {
    // 400 Bad Request
    BadRequest(String),
    Validation(Vec<FieldError>),

    // 401 Unauthorized
    Unauthorized(String),
    Forbidden(String),

    // 404 Not Found
    NotFound(String),

    // 500 Internal Server Error; internals are logged, never leaked
    Internal,
}

impl ApiError {
    pub fn bad_request(msg: impl Into<String>) -> Self {
        ApiError::BadRequest(msg.into())
    }

    pub fn validation(errors: Vec<FieldError>) -> Self {
        ApiError::Validation(errors)
    }

    /// Single-message variant of the `errors` array shape, used for
    /// duplicate-email and invalid-credentials responses.
    pub fn single_error(msg: impl Into<String>) -> Self {
        ApiError::Validation(vec![FieldError::new(msg)])
    }

    pub fn unauthorized(msg: impl Into<String>) -> Self {
        ApiError::Unauthorized(msg.into())
    }

    pub fn forbidden(msg: impl Into<String>) -> Self {
        ApiError::Forbidden(msg.into())
    }

    pub fn not_found(msg: impl Into<String>) -> Self {
        ApiError::NotFound(msg.into())
    }

    /// Get HTTP status code
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Validation(_) => StatusCode::BAD_REQUEST,
            ApiError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            // Not 403: ownership failures have always been reported as 401
            ApiError::Forbidden(_) => StatusCode::UNAUTHORIZED,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Convert to JSON response body
    pub fn body(&self) -> Value {
        match self {
            ApiError::Validation(errors) => json!({ "errors": errors }),
            ApiError::BadRequest(msg)
            | ApiError::Unauthorized(msg)
            | ApiError::Forbidden(msg)
            | ApiError::NotFound(msg) => json!({ "msg": msg }),
            ApiError::Internal => json!({ "msg": "Server Error." }),
        }
    }
}

impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::NotFound(msg) => ApiError::NotFound(msg),
            StoreError::MalformedId(id) => {
                ApiError::bad_request(format!("Id provided is not valid: {}", id))
            }
            StoreError::Backend(msg) => {
                // Log the real error but return a generic message
                tracing::error!("store backend error: {}", msg);
                ApiError::Internal
            }
        }
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ApiError::BadRequest(msg)
            | ApiError::Unauthorized(msg)
            | ApiError::Forbidden(msg)
            | ApiError::NotFound(msg) => write!(f, "{}", msg),
            ApiError::Validation(errors) => {
                let msgs: Vec<&str> = errors.iter().map(|e| e.msg.as_str()).collect();
                write!(f, "{}", msgs.join(", "))
            }
            ApiError::Internal => write!(f, "Server Error."),
        }
    }
}

impl std::error::Error for ApiError {}

// Automatic HTTP response conversion for Axum
impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        (self.status_code(), Json(self.body())).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_renders_errors_array() {
        let err = ApiError::validation(vec![
            FieldError::for_param("name", "Name is required."),
            FieldError::new("User already exists."),
        ]);
        assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
        let body = err.body();
        let errors = body.get("errors").and_then(Value::as_array).unwrap();
        assert_eq!(errors.len(), 2);
        assert_eq!(errors[0]["msg"], "Name is required.");
        assert_eq!(errors[0]["param"], "name");
        assert!(errors[1].get("param").is_none());
    }

    #[test]
    fn forbidden_maps_to_401() {
        let err = ApiError::forbidden("You are not authorized to delete this comment.");
        assert_eq!(err.status_code(), StatusCode::UNAUTHORIZED);
    }

    #[test]
    fn internal_never_leaks_details() {
        let err: ApiError = StoreError::Backend("connection refused on 10.0.0.5".into()).into();
        assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(err.body(), json!({ "msg": "Server Error." }));
    }
}
