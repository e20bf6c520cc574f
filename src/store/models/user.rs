use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Registered account. The password field only ever holds a bcrypt hash and
/// is excluded from every serialized response.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct User {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub avatar: String,
    #[serde(skip_serializing, default)]
    pub password: String,
    pub date: DateTime<Utc>,
}

impl User {
    pub fn new(name: String, email: String, avatar: String, password_hash: String) -> Self {
        Self {
            id: Uuid::new_v4(),
            name,
            email,
            avatar,
            password: password_hash,
            date: Utc::now(),
        }
    }
}
