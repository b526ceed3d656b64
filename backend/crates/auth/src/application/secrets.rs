//! Source of pending login secrets

use crate::domain::entity::identity::PendingLogin;

/// Produces the session id and code for each new login
pub trait LoginSecretSource: Send + Sync {
    fn next_pending(&self) -> PendingLogin;
}

/// OS CSPRNG backed source
#[derive(Debug, Clone, Copy, Default)]
pub struct OsSecretSource;

impl LoginSecretSource for OsSecretSource {
    fn next_pending(&self) -> PendingLogin {
        PendingLogin::generate()
    }
}
