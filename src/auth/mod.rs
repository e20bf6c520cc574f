use chrono::Utc;
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Identity claim embedded in every token: `{"user": {"id": "..."}}`.
#[derive(Debug, Serialize, Deserialize)]
pub struct UserClaim {
    pub id: Uuid,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub user: UserClaim,
    pub exp: i64,
    pub iat: i64,
}

#[derive(Debug)]
pub enum TokenError {
    Signing(String),
    InvalidSecret,
    /// Signature, expiry, and malformation failures are deliberately
    /// collapsed so callers cannot tell them apart.
    Invalid,
}

impl std::fmt::Display for TokenError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TokenError::Signing(msg) => write!(f, "token signing error: {}", msg),
            TokenError::InvalidSecret => write!(f, "invalid token secret"),
            TokenError::Invalid => write!(f, "token is invalid"),
        }
    }
}

impl std::error::Error for TokenError {}

/// Issues and verifies signed bearer tokens carrying a user identity claim.
///
/// The signing secret is injected at construction and lives for the life of
/// the process. Tokens are stateless; there is no revocation list.
#[derive(Clone)]
pub struct TokenService {
    secret: String,
    lifetime_secs: i64,
}

impl TokenService {
    pub fn new(secret: impl Into<String>, lifetime_secs: i64) -> Self {
        Self { secret: secret.into(), lifetime_secs }
    }

    /// Sign a token for the given user id, expiring `lifetime_secs` from now.
    pub fn issue(&self, user_id: Uuid) -> Result<String, TokenError> {
        if self.secret.is_empty() {
            return Err(TokenError::InvalidSecret);
        }

        let now = Utc::now().timestamp();
        let claims = Claims {
            user: UserClaim { id: user_id },
            exp: now + self.lifetime_secs,
            iat: now,
        };

        let encoding_key = EncodingKey::from_secret(self.secret.as_bytes());
        encode(&Header::default(), &claims, &encoding_key)
            .map_err(|e| TokenError::Signing(e.to_string()))
    }

    /// Check signature and expiration, returning the embedded user id.
    /// A token is valid iff its signature verifies AND now < exp.
    pub fn verify(&self, token: &str) -> Result<Uuid, TokenError> {
        if self.secret.is_empty() {
            return Err(TokenError::InvalidSecret);
        }

        let decoding_key = DecodingKey::from_secret(self.secret.as_bytes());
        let mut validation = Validation::default();
        validation.leeway = 0;

        match decode::<Claims>(token, &decoding_key, &validation) {
            Ok(data) => Ok(data.claims.user.id),
            Err(e) => {
                tracing::debug!("token verification failed: {}", e);
                Err(TokenError::Invalid)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn service() -> TokenService {
        TokenService::new("unit-test-secret", 360_000)
    }

    #[test]
    fn verify_recovers_issued_user_id() {
        let tokens = service();
        let user_id = Uuid::new_v4();
        let token = tokens.issue(user_id).unwrap();
        assert_eq!(tokens.verify(&token).unwrap(), user_id);
    }

    #[test]
    fn expired_token_is_invalid() {
        let tokens = service();
        // Encode a claim set whose expiry is already in the past, using the
        // same secret the service verifies with.
        let now = Utc::now().timestamp();
        let claims = Claims {
            user: UserClaim { id: Uuid::new_v4() },
            exp: now - 3600,
            iat: now - 7200,
        };
        let token = encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(b"unit-test-secret"),
        )
        .unwrap();

        assert!(matches!(tokens.verify(&token), Err(TokenError::Invalid)));
    }

    #[test]
    fn token_signed_with_other_secret_is_invalid() {
        let tokens = service();
        let other = TokenService::new("some-other-secret", 360_000);
        let token = other.issue(Uuid::new_v4()).unwrap();
        assert!(matches!(tokens.verify(&token), Err(TokenError::Invalid)));
    }

    #[test]
    fn garbage_token_is_invalid() {
        let tokens = service();
        assert!(matches!(tokens.verify("not-a-token"), Err(TokenError::Invalid)));
    }

    #[test]
    fn empty_secret_refuses_to_sign() {
        let tokens = TokenService::new("", 360_000);
        assert!(matches!(tokens.issue(Uuid::new_v4()), Err(TokenError::InvalidSecret)));
    }
}
