//! Repository Traits
//!
//! Interfaces for data persistence. Implementation is in infrastructure layer.

use chrono::{DateTime, Utc};

use crate::domain::entity::{email_verification::EmailVerification, identity::Identity};
use crate::domain::value_object::{phone::Phone, session_id::SessionId};
use crate::error::AuthResult;

/// Identity repository trait
#[trait_variant::make(IdentityRepository: Send)]
pub trait LocalIdentityRepository {
    /// Find identity by phone
    async fn find_by_phone(&self, phone: &Phone) -> AuthResult<Option<Identity>>;

    /// Find the identity whose pending login carries `session_id`
    async fn find_by_pending_session_id(
        &self,
        session_id: &SessionId,
    ) -> AuthResult<Option<Identity>>;

    /// Create an identity for an unseen phone
    ///
    /// Fails with `AuthError::PhoneTaken` if the phone already exists.
    async fn create(&self, phone: &Phone) -> AuthResult<Identity>;

    /// Persist the pending login of `identity`
    ///
    /// Succeeds only if the stored version still equals `identity.version`,
    /// which is then incremented. Otherwise fails with
    /// `AuthError::StaleIdentity` and nothing is written.
    async fn save(&self, identity: &mut Identity) -> AuthResult<()>;
}

/// Email verification repository trait
#[trait_variant::make(EmailVerificationRepository: Send)]
pub trait LocalEmailVerificationRepository {
    /// Store a pending verification
    async fn insert(&self, verification: &EmailVerification) -> AuthResult<()>;

    /// Remove and return the entry for `token_hash`
    ///
    /// An expired entry is removed too, but reported as absent.
    async fn take(
        &self,
        token_hash: &str,
        now: DateTime<Utc>,
    ) -> AuthResult<Option<EmailVerification>>;

    /// Delete every entry expired at `now`
    async fn cleanup_expired(&self, now: DateTime<Utc>) -> AuthResult<u64>;
}
