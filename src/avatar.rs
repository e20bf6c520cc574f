use md5::{Digest, Md5};

/// Gravatar URL derived deterministically from an email address:
/// 200px, PG-rated, with the "mystery man" fallback image.
pub fn gravatar_url(email: &str) -> String {
    let normalized = email.trim().to_lowercase();
    let mut hasher = Md5::new();
    hasher.update(normalized.as_bytes());
    let digest = hasher.finalize();
    format!("https://www.gravatar.com/avatar/{:x}?s=200&r=pg&d=mm", digest)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn url_is_stable_under_case_and_whitespace() {
        assert_eq!(gravatar_url(" Alice@Example.COM "), gravatar_url("alice@example.com"));
    }

    #[test]
    fn empty_email_hashes_to_known_digest() {
        // md5("") is the well-known empty digest
        assert_eq!(
            gravatar_url(""),
            "https://www.gravatar.com/avatar/d41d8cd98f00b204e9800998ecf8427e?s=200&r=pg&d=mm"
        );
    }
}
