//! Email Verification Use Cases
//!
//! Send a single-use link to an address, then confirm ownership when the
//! link is opened before it expires.

use std::sync::Arc;

use chrono::Utc;

use crate::application::config::AuthConfig;
use crate::application::notifier::Notifier;
use crate::domain::entity::email_verification::EmailVerification;
use crate::domain::repository::EmailVerificationRepository;
use crate::domain::value_object::email::Email;
use crate::error::{AuthError, AuthResult};

/// Send verification link use case
pub struct SendEmailVerificationUseCase<R>
where
    R: EmailVerificationRepository,
{
    repo: Arc<R>,
    config: Arc<AuthConfig>,
    notifier: Arc<dyn Notifier>,
}

impl<R> SendEmailVerificationUseCase<R>
where
    R: EmailVerificationRepository,
{
    pub fn new(repo: Arc<R>, config: Arc<AuthConfig>, notifier: Arc<dyn Notifier>) -> Self {
        Self {
            repo,
            config,
            notifier,
        }
    }

    pub async fn execute(&self, email: Email) -> AuthResult<()> {
        let ttl = chrono::Duration::from_std(self.config.email_verification_ttl)
            .map_err(|e| AuthError::Internal(format!("Invalid verification TTL: {}", e)))?;

        let (token, verification) = EmailVerification::issue(email, ttl, Utc::now());
        self.repo.insert(&verification).await?;

        let link = self.config.verification_link(&token);
        self.notifier
            .send_email_verification(&verification.email, &link);

        tracing::info!(expires_at = %verification.expires_at, "Verification link issued");

        Ok(())
    }
}

/// Confirm verification link use case
pub struct VerifyEmailUseCase<R>
where
    R: EmailVerificationRepository,
{
    repo: Arc<R>,
}

impl<R> VerifyEmailUseCase<R>
where
    R: EmailVerificationRepository,
{
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    /// Consume the link token, returning the verified address
    pub async fn execute(&self, token: &str) -> AuthResult<Email> {
        let token_hash = EmailVerification::hash_token(token);

        let verification = self
            .repo
            .take(&token_hash, Utc::now())
            .await?
            .ok_or(AuthError::VerificationNotFound)?;

        tracing::info!(email = %verification.email, "Email verified");

        Ok(verification.email)
    }
}
