pub mod auth;
pub mod posts;
pub mod profile;
pub mod users;

/// Just enough of an email check to mirror the upstream validator: a
/// non-empty local part and a dotted domain.
pub(crate) fn is_email(value: &str) -> bool {
    let Some((local, domain)) = value.split_once('@') else {
        return false;
    };
    !local.is_empty()
        && !domain.is_empty()
        && domain.contains('.')
        && !domain.starts_with('.')
        && !domain.ends_with('.')
}

#[cfg(test)]
mod tests {
    use super::is_email;

    #[test]
    fn accepts_plain_addresses() {
        assert!(is_email("a@x.com"));
        assert!(is_email("first.last@sub.example.org"));
    }

    #[test]
    fn rejects_malformed_addresses() {
        assert!(!is_email(""));
        assert!(!is_email("not-an-email"));
        assert!(!is_email("@x.com"));
        assert!(!is_email("a@"));
        assert!(!is_email("a@nodot"));
        assert!(!is_email("a@.com"));
    }
}
