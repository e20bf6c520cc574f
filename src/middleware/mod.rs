pub mod auth;

pub use auth::{token_auth, AuthUser};
