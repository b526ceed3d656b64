//! Application Configuration
//!
//! Configuration for the Auth application layer.

use std::time::Duration;

use platform::crypto::random_bytes;
use platform::token::{DEFAULT_TOKEN_TTL, TokenCodec};

use crate::error::AuthResult;

/// Length of a generated token secret
pub const TOKEN_SECRET_LEN: usize = 32;

/// Auth application configuration
#[derive(Clone)]
pub struct AuthConfig {
    /// HS256 signing secret
    pub token_secret: Vec<u8>,
    /// Bearer token lifetime (24 hours)
    pub token_ttl: Duration,
    /// Email verification link lifetime (24 hours)
    pub email_verification_ttl: Duration,
    /// Externally reachable base URL, used to build verification links
    pub public_base_url: String,
}

impl std::fmt::Debug for AuthConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthConfig")
            .field("token_secret", &"<redacted>")
            .field("token_ttl", &self.token_ttl)
            .field("email_verification_ttl", &self.email_verification_ttl)
            .field("public_base_url", &self.public_base_url)
            .finish()
    }
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            token_secret: Vec::new(),
            token_ttl: DEFAULT_TOKEN_TTL,
            email_verification_ttl: Duration::from_secs(24 * 3600), // 24 hours
            public_base_url: "http://localhost:8087".to_string(),
        }
    }
}

impl AuthConfig {
    /// Create config with a random token secret
    pub fn with_random_secret() -> Self {
        Self {
            token_secret: random_bytes(TOKEN_SECRET_LEN),
            ..Default::default()
        }
    }

    /// Create config for development
    pub fn development() -> Self {
        Self::with_random_secret()
    }

    /// Build the token codec for this configuration
    pub fn token_codec(&self) -> AuthResult<TokenCodec> {
        Ok(TokenCodec::new(&self.token_secret, self.token_ttl)?)
    }

    /// Link delivered to the recipient of an email verification
    pub fn verification_link(&self, token: &str) -> String {
        format!("{}/verify/{}", self.public_base_url.trim_end_matches('/'), token)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AuthError;
    use platform::token::TokenError;

    #[test]
    fn test_default_has_no_usable_secret() {
        let err = AuthConfig::default().token_codec().unwrap_err();
        assert!(matches!(err, AuthError::Token(TokenError::Signing(_))));
    }

    #[test]
    fn test_development_config_signs() {
        let config = AuthConfig::development();
        assert_eq!(config.token_secret.len(), TOKEN_SECRET_LEN);
        assert!(config.token_codec().is_ok());
    }

    #[test]
    fn test_verification_link() {
        let config = AuthConfig {
            public_base_url: "https://shop.example.com/".to_string(),
            ..AuthConfig::development()
        };
        assert_eq!(
            config.verification_link("abc123"),
            "https://shop.example.com/verify/abc123"
        );
    }
}
