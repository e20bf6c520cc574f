use uuid::Uuid;

use crate::auth::TokenService;
use crate::avatar::gravatar_url;
use crate::config;
use crate::error::ApiError;
use crate::store::{models::User, Store};

pub struct NewAccount {
    pub name: String,
    pub email: String,
    pub password: String,
}

fn invalid_credentials() -> ApiError {
    // Identical shape for unknown email and wrong password, so the
    // response cannot be used to enumerate accounts.
    ApiError::single_error("Invalid credentials.")
}

fn issue_token(tokens: &TokenService, user_id: Uuid) -> Result<String, ApiError> {
    tokens.issue(user_id).map_err(|e| {
        tracing::error!("token issuance failed: {}", e);
        ApiError::Internal
    })
}

/// Create an account and return a freshly issued token.
///
/// The email match is case-sensitive and exact; no normalization is
/// performed. The avatar URL is derived deterministically from the email.
pub async fn register(
    store: &dyn Store,
    tokens: &TokenService,
    account: NewAccount,
) -> Result<String, ApiError> {
    if store.user_by_email(&account.email).await?.is_some() {
        return Err(ApiError::single_error("User already exists."));
    }

    let avatar = gravatar_url(&account.email);
    let cost = config::config().security.bcrypt_cost;
    let hash = bcrypt::hash(&account.password, cost).map_err(|e| {
        tracing::error!("password hashing failed: {}", e);
        ApiError::Internal
    })?;

    let user = User::new(account.name, account.email, avatar, hash);
    let user_id = user.id;
    store.insert_user(user).await?;

    issue_token(tokens, user_id)
}

/// Verify credentials and return a token.
pub async fn authenticate(
    store: &dyn Store,
    tokens: &TokenService,
    email: &str,
    password: &str,
) -> Result<String, ApiError> {
    let user = store
        .user_by_email(email)
        .await?
        .ok_or_else(invalid_credentials)?;

    // A malformed stored hash also counts as a mismatch
    let matches = bcrypt::verify(password, &user.password).unwrap_or(false);
    if !matches {
        return Err(invalid_credentials());
    }

    issue_token(tokens, user.id)
}

/// The "who am I" lookup behind the auth gate. The password hash is
/// excluded by the model's serialization rules.
pub async fn get_self(store: &dyn Store, user_id: Uuid) -> Result<User, ApiError> {
    store
        .user_by_id(user_id)
        .await?
        .ok_or_else(|| ApiError::not_found("User not found."))
}

/// Remove the profile and user records. The user's posts are intentionally
/// left in place; see DESIGN.md.
pub async fn delete_account(store: &dyn Store, user_id: Uuid) -> Result<(), ApiError> {
    store.delete_profile(user_id).await?;
    store.delete_user(user_id).await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;

    fn tokens() -> TokenService {
        TokenService::new("accounts-test-secret", 360_000)
    }

    fn alice() -> NewAccount {
        NewAccount {
            name: "Alice".into(),
            email: "a@x.com".into(),
            password: "secret1".into(),
        }
    }

    #[tokio::test]
    async fn register_issues_token_for_new_user() {
        let store = MemoryStore::new();
        let tokens = tokens();

        let token = register(&store, &tokens, alice()).await.unwrap();
        let user = store.user_by_email("a@x.com").await.unwrap().unwrap();

        assert_eq!(tokens.verify(&token).unwrap(), user.id);
        assert_ne!(user.password, "secret1");
        assert!(user.avatar.starts_with("https://www.gravatar.com/avatar/"));
    }

    #[tokio::test]
    async fn register_rejects_duplicate_email() {
        let store = MemoryStore::new();
        let tokens = tokens();

        register(&store, &tokens, alice()).await.unwrap();
        let err = register(&store, &tokens, alice()).await.unwrap_err();

        assert_eq!(err.status_code().as_u16(), 400);
        assert_eq!(
            err.body(),
            serde_json::json!({ "errors": [{ "msg": "User already exists." }] })
        );
    }

    #[tokio::test]
    async fn authenticate_succeeds_with_registered_password() {
        let store = MemoryStore::new();
        let tokens = tokens();
        register(&store, &tokens, alice()).await.unwrap();

        let token = authenticate(&store, &tokens, "a@x.com", "secret1").await.unwrap();
        let user = store.user_by_email("a@x.com").await.unwrap().unwrap();
        assert_eq!(tokens.verify(&token).unwrap(), user.id);
    }

    #[tokio::test]
    async fn wrong_password_and_unknown_email_are_indistinguishable() {
        let store = MemoryStore::new();
        let tokens = tokens();
        register(&store, &tokens, alice()).await.unwrap();

        let wrong_password = authenticate(&store, &tokens, "a@x.com", "nope").await.unwrap_err();
        let unknown_email = authenticate(&store, &tokens, "b@x.com", "secret1").await.unwrap_err();

        assert_eq!(wrong_password.status_code(), unknown_email.status_code());
        assert_eq!(wrong_password.body(), unknown_email.body());
    }

    #[tokio::test]
    async fn delete_account_leaves_posts_behind() {
        let store = MemoryStore::new();
        let tokens = tokens();
        register(&store, &tokens, alice()).await.unwrap();
        let user = store.user_by_email("a@x.com").await.unwrap().unwrap();

        let post = crate::store::models::Post::new(
            user.id,
            "hello".into(),
            user.name.clone(),
            user.avatar.clone(),
        );
        store.put_post(post.clone()).await.unwrap();

        delete_account(&store, user.id).await.unwrap();

        assert!(store.user_by_id(user.id).await.unwrap().is_none());
        assert!(store.profile_by_user(user.id).await.unwrap().is_none());
        assert!(store.post_by_id(post.id).await.unwrap().is_some());
    }
}
