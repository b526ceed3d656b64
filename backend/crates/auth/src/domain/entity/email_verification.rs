//! Email Verification Entity

use chrono::{DateTime, Duration, Utc};
use platform::crypto::{random_token_hex, sha256_hex};

use crate::domain::value_object::email::Email;

/// Random bytes behind a verification link token (128 bits)
pub const LINK_TOKEN_BYTES: usize = 16;

/// A pending email verification
///
/// Only the SHA-256 of the link token is kept; the raw token lives in the
/// link sent to the recipient.
#[derive(Debug, Clone)]
pub struct EmailVerification {
    pub token_hash: String,
    pub email: Email,
    pub created_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
}

impl EmailVerification {
    /// Create a pending verification; returns the raw link token with it
    pub fn issue(email: Email, ttl: Duration, now: DateTime<Utc>) -> (String, Self) {
        let token = random_token_hex(LINK_TOKEN_BYTES);
        let verification = Self {
            token_hash: Self::hash_token(&token),
            email,
            created_at: now,
            expires_at: now + ttl,
        };
        (token, verification)
    }

    /// Storage key for a raw link token
    pub fn hash_token(token: &str) -> String {
        sha256_hex(token.as_bytes())
    }

    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        now > self.expires_at
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_issue_stores_hash_only() {
        let now = Utc::now();
        let email = Email::new("user@example.com").unwrap();
        let (token, verification) = EmailVerification::issue(email, Duration::hours(24), now);

        assert_eq!(token.len(), LINK_TOKEN_BYTES * 2);
        assert_ne!(verification.token_hash, token);
        assert_eq!(verification.token_hash, EmailVerification::hash_token(&token));
        assert_eq!(verification.expires_at - verification.created_at, Duration::hours(24));
    }

    #[test]
    fn test_expiry() {
        let now = Utc::now();
        let email = Email::new("user@example.com").unwrap();
        let (_, verification) = EmailVerification::issue(email, Duration::minutes(5), now);

        assert!(!verification.is_expired_at(now));
        assert!(!verification.is_expired_at(now + Duration::minutes(5)));
        assert!(verification.is_expired_at(now + Duration::minutes(6)));
    }
}
