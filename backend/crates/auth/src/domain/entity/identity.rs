//! Identity Entity
//!
//! A person known by phone number, optionally mid-login.

use chrono::{DateTime, Utc};
use kernel::id::IdentityId;

use crate::domain::value_object::{otp_code::OtpCode, phone::Phone, session_id::SessionId};

/// An issued but not yet verified login
///
/// Session id and code only ever exist together.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingLogin {
    pub session_id: SessionId,
    pub code: OtpCode,
}

impl PendingLogin {
    /// Fresh session id and code, both from the OS CSPRNG
    pub fn generate() -> Self {
        Self {
            session_id: SessionId::generate(),
            code: OtpCode::generate(),
        }
    }
}

/// Identity entity
#[derive(Debug, Clone)]
pub struct Identity {
    pub id: IdentityId,
    /// Unique natural key
    pub phone: Phone,
    pub display_name: Option<String>,
    pub pending: Option<PendingLogin>,
    pub created_at: DateTime<Utc>,
    /// Optimistic concurrency counter, bumped by every successful save
    pub version: i64,
}

impl Identity {
    /// Replace any pending login with `pending`
    pub fn begin_login(&mut self, pending: PendingLogin) {
        self.pending = Some(pending);
    }

    /// Drop the pending login, returning it
    pub fn clear_pending(&mut self) -> Option<PendingLogin> {
        self.pending.take()
    }

    pub fn pending_session_id(&self) -> Option<&SessionId> {
        self.pending.as_ref().map(|p| &p.session_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn identity() -> Identity {
        Identity {
            id: IdentityId::new(1),
            phone: Phone::new("79851174203").unwrap(),
            display_name: None,
            pending: None,
            created_at: Utc::now(),
            version: 0,
        }
    }

    #[test]
    fn test_begin_and_clear_login() {
        let mut identity = identity();
        assert!(identity.pending_session_id().is_none());

        let pending = PendingLogin::generate();
        identity.begin_login(pending.clone());
        assert_eq!(identity.pending_session_id(), Some(&pending.session_id));

        assert_eq!(identity.clear_pending(), Some(pending));
        assert!(identity.pending.is_none());
        assert_eq!(identity.clear_pending(), None);
    }

    #[test]
    fn test_begin_login_replaces_previous() {
        let mut identity = identity();
        let first = PendingLogin::generate();
        let second = PendingLogin::generate();
        identity.begin_login(first);
        identity.begin_login(second.clone());
        assert_eq!(identity.pending, Some(second));
    }
}
