//! Login Session Id Value Object

use derive_more::Display;
use platform::crypto::random_token_hex;

/// Random bytes behind a session id (128 bits)
pub const SESSION_ID_BYTES: usize = 16;

/// Opaque identifier of a pending login
#[derive(Debug, Clone, PartialEq, Eq, Hash, Display)]
#[display("{_0}")]
pub struct SessionId(String);

impl SessionId {
    /// Fresh 128-bit id from the OS CSPRNG, hex encoded
    pub fn generate() -> Self {
        Self(random_token_hex(SESSION_ID_BYTES))
    }

    /// Wrap a value received from a client or the database
    pub fn from_raw(session_id: impl Into<String>) -> Self {
        Self(session_id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_is_128_bit_hex() {
        let id = SessionId::generate();
        assert_eq!(id.as_str().len(), SESSION_ID_BYTES * 2);
        assert!(id.as_str().bytes().all(|b| b.is_ascii_hexdigit()));
        assert_ne!(id, SessionId::generate());
    }
}
