use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Post aggregate with embedded likes and comments.
///
/// `name` and `avatar` are snapshots of the author at creation time. They
/// are never recomputed when the author later edits their account.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Post {
    pub id: Uuid,
    pub user: Uuid,
    pub text: String,
    pub name: String,
    pub avatar: String,
    pub date: DateTime<Utc>,
    pub likes: Vec<Like>,
    pub comments: Vec<Comment>,
}

impl Post {
    pub fn new(user: Uuid, text: String, name: String, avatar: String) -> Self {
        Self {
            id: Uuid::new_v4(),
            user,
            text,
            name,
            avatar,
            date: Utc::now(),
            likes: Vec::new(),
            comments: Vec::new(),
        }
    }
}

/// At most one like per distinct user; enforced by the toggle operation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Like {
    pub user: Uuid,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Comment {
    pub id: Uuid,
    pub user: Uuid,
    pub text: String,
    pub name: String,
    pub avatar: String,
    pub date: DateTime<Utc>,
}

impl Comment {
    pub fn new(user: Uuid, text: String, name: String, avatar: String) -> Self {
        Self {
            id: Uuid::new_v4(),
            user,
            text,
            name,
            avatar,
            date: Utc::now(),
        }
    }
}
