//! Resolve the identity behind an authenticated token subject

use std::sync::Arc;

use auth::domain::repository::IdentityRepository;
use auth::domain::value_object::phone::Phone;
use kernel::id::IdentityId;

use crate::error::{CommerceError, CommerceResult};

/// Resolve Identity Use Case
pub struct ResolveIdentityUseCase<A>
where
    A: IdentityRepository,
{
    identity_repo: Arc<A>,
}

impl<A> ResolveIdentityUseCase<A>
where
    A: IdentityRepository,
{
    pub fn new(identity_repo: Arc<A>) -> Self {
        Self { identity_repo }
    }

    /// Identity id for a token subject; unknown subjects are unauthorized
    pub async fn execute(&self, subject: &str) -> CommerceResult<IdentityId> {
        let phone = Phone::new(subject).map_err(|_| CommerceError::Unauthorized)?;

        let identity = self
            .identity_repo
            .find_by_phone(&phone)
            .await?
            .ok_or(CommerceError::Unauthorized)?;

        Ok(identity.id)
    }
}
