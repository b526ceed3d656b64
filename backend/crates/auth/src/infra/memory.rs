//! In-process Repository Implementations
//!
//! Mutex-guarded tables with the same semantics as the PostgreSQL store.
//! Used by tests; valid as a single-process store.

use std::collections::HashMap;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use kernel::id::IdentityId;
use tokio::sync::Mutex;

use crate::domain::entity::{email_verification::EmailVerification, identity::Identity};
use crate::domain::repository::{EmailVerificationRepository, IdentityRepository};
use crate::domain::value_object::{phone::Phone, session_id::SessionId};
use crate::error::{AuthError, AuthResult};

#[derive(Default)]
struct MemoryAuthState {
    last_id: i64,
    identities: HashMap<IdentityId, Identity>,
    verifications: HashMap<String, EmailVerification>,
}

impl MemoryAuthState {
    fn remove_expired(&mut self, now: DateTime<Utc>) -> u64 {
        let before = self.verifications.len();
        self.verifications.retain(|_, v| !v.is_expired_at(now));
        (before - self.verifications.len()) as u64
    }
}

/// In-memory auth repository
#[derive(Clone, Default)]
pub struct MemoryAuthRepository {
    state: Arc<Mutex<MemoryAuthState>>,
}

impl MemoryAuthRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of pending email verifications, expired ones included
    pub async fn pending_verifications(&self) -> usize {
        self.state.lock().await.verifications.len()
    }
}

impl IdentityRepository for MemoryAuthRepository {
    async fn find_by_phone(&self, phone: &Phone) -> AuthResult<Option<Identity>> {
        let state = self.state.lock().await;
        Ok(state
            .identities
            .values()
            .find(|identity| &identity.phone == phone)
            .cloned())
    }

    async fn find_by_pending_session_id(
        &self,
        session_id: &SessionId,
    ) -> AuthResult<Option<Identity>> {
        let state = self.state.lock().await;
        Ok(state
            .identities
            .values()
            .find(|identity| identity.pending_session_id() == Some(session_id))
            .cloned())
    }

    async fn create(&self, phone: &Phone) -> AuthResult<Identity> {
        let mut state = self.state.lock().await;

        if state.identities.values().any(|identity| &identity.phone == phone) {
            return Err(AuthError::PhoneTaken);
        }

        state.last_id += 1;
        let identity = Identity {
            id: IdentityId::new(state.last_id),
            phone: phone.clone(),
            display_name: None,
            pending: None,
            created_at: Utc::now(),
            version: 0,
        };
        state.identities.insert(identity.id, identity.clone());

        Ok(identity)
    }

    async fn save(&self, identity: &mut Identity) -> AuthResult<()> {
        let mut state = self.state.lock().await;

        let stored = state
            .identities
            .get_mut(&identity.id)
            .filter(|stored| stored.version == identity.version)
            .ok_or(AuthError::StaleIdentity)?;

        stored.pending = identity.pending.clone();
        stored.version += 1;
        identity.version = stored.version;

        Ok(())
    }
}

impl EmailVerificationRepository for MemoryAuthRepository {
    async fn insert(&self, verification: &EmailVerification) -> AuthResult<()> {
        let mut state = self.state.lock().await;
        state.remove_expired(Utc::now());
        state
            .verifications
            .insert(verification.token_hash.clone(), verification.clone());
        Ok(())
    }

    async fn take(
        &self,
        token_hash: &str,
        now: DateTime<Utc>,
    ) -> AuthResult<Option<EmailVerification>> {
        let mut state = self.state.lock().await;
        Ok(state
            .verifications
            .remove(token_hash)
            .filter(|v| !v.is_expired_at(now)))
    }

    async fn cleanup_expired(&self, now: DateTime<Utc>) -> AuthResult<u64> {
        let deleted = self.state.lock().await.remove_expired(now);
        tracing::debug!(verifications_deleted = deleted, "Cleaned up expired email verifications");
        Ok(deleted)
    }
}
