//! Request Login Use Case
//!
//! Starts a login for a phone: stores a fresh pending session and code,
//! hands the code to the notifier and returns only the session id.

use std::sync::Arc;

use crate::application::notifier::Notifier;
use crate::application::secrets::LoginSecretSource;
use crate::domain::entity::identity::Identity;
use crate::domain::repository::IdentityRepository;
use crate::domain::value_object::{phone::Phone, session_id::SessionId};
use crate::error::{AuthError, AuthResult};

/// Request login use case
pub struct RequestLoginUseCase<R>
where
    R: IdentityRepository,
{
    repo: Arc<R>,
    notifier: Arc<dyn Notifier>,
    secrets: Arc<dyn LoginSecretSource>,
}

impl<R> RequestLoginUseCase<R>
where
    R: IdentityRepository,
{
    pub fn new(
        repo: Arc<R>,
        notifier: Arc<dyn Notifier>,
        secrets: Arc<dyn LoginSecretSource>,
    ) -> Self {
        Self {
            repo,
            notifier,
            secrets,
        }
    }

    pub async fn execute(&self, phone: Phone) -> AuthResult<SessionId> {
        let mut identity = self.find_or_create(&phone).await?;

        let pending = self.secrets.next_pending();
        let session_id = pending.session_id.clone();
        let code = pending.code;

        identity.begin_login(pending);
        // A concurrent request for the same phone wins; StaleIdentity is a 409
        self.repo.save(&mut identity).await?;

        self.notifier.send_login_code(&identity.phone, code);
        tracing::info!(identity_id = %identity.id, "Login code issued");

        Ok(session_id)
    }

    async fn find_or_create(&self, phone: &Phone) -> AuthResult<Identity> {
        if let Some(identity) = self.repo.find_by_phone(phone).await? {
            return Ok(identity);
        }

        match self.repo.create(phone).await {
            Ok(identity) => {
                tracing::info!(identity_id = %identity.id, "Identity created");
                Ok(identity)
            }
            // Lost the race against another first login for this phone
            Err(AuthError::PhoneTaken) => self.repo.find_by_phone(phone).await?.ok_or_else(|| {
                AuthError::Internal("identity missing after phone conflict".to_string())
            }),
            Err(e) => Err(e),
        }
    }
}
