//! Verify Login Use Case
//!
//! Exchanges a pending session id and its code for a bearer token. Any
//! attempt, right or wrong, ends the pending session.

use std::sync::Arc;

use platform::token::{IssuedToken, TokenCodec};

use crate::domain::repository::IdentityRepository;
use crate::domain::value_object::session_id::SessionId;
use crate::error::{AuthError, AuthResult};

/// Verify login use case
pub struct VerifyLoginUseCase<R>
where
    R: IdentityRepository,
{
    repo: Arc<R>,
    codec: Arc<TokenCodec>,
}

impl<R> VerifyLoginUseCase<R>
where
    R: IdentityRepository,
{
    pub fn new(repo: Arc<R>, codec: Arc<TokenCodec>) -> Self {
        Self { repo, codec }
    }

    pub async fn execute(&self, session_id: &SessionId, code: i64) -> AuthResult<IssuedToken> {
        let mut identity = self
            .repo
            .find_by_pending_session_id(session_id)
            .await?
            .ok_or(AuthError::SessionNotFound)?;

        let pending = identity
            .clear_pending()
            .ok_or(AuthError::SessionNotFound)?;

        if !pending.code.matches(code) {
            match self.repo.save(&mut identity).await {
                // Stale means the session was already replaced or consumed
                Ok(()) | Err(AuthError::StaleIdentity) => {}
                Err(e) => return Err(e),
            }
            tracing::warn!(identity_id = %identity.id, "Login code mismatch, session cleared");
            return Err(AuthError::InvalidCode);
        }

        match self.repo.save(&mut identity).await {
            Ok(()) => {}
            Err(AuthError::StaleIdentity) => return Err(AuthError::SessionNotFound),
            Err(e) => return Err(e),
        }

        let issued = self.codec.issue(identity.phone.as_str())?;
        tracing::info!(identity_id = %identity.id, "Login verified, token issued");

        Ok(issued)
    }
}
