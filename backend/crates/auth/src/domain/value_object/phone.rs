//! Phone Value Object
//!
//! The natural key of an identity.

use derive_more::Display;
use serde::Serialize;
use std::str::FromStr;

use crate::error::{AuthError, AuthResult};

/// Number of digits in an accepted phone number
pub const PHONE_DIGITS: usize = 11;

/// Validated phone number: 11 ASCII digits starting with 7 or 8
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Display)]
#[display("{_0}")]
pub struct Phone(String);

impl Phone {
    /// Create a new phone with validation; surrounding whitespace is ignored
    pub fn new(phone: impl AsRef<str>) -> AuthResult<Self> {
        let phone = phone.as_ref().trim();

        if phone.is_empty() {
            return Err(AuthError::InvalidPhone("phone is required".to_string()));
        }

        if phone.len() != PHONE_DIGITS || !phone.bytes().all(|b| b.is_ascii_digit()) {
            return Err(AuthError::InvalidPhone(format!(
                "phone must be {} digits",
                PHONE_DIGITS
            )));
        }

        if !phone.starts_with(['7', '8']) {
            return Err(AuthError::InvalidPhone(
                "phone must start with 7 or 8".to_string(),
            ));
        }

        Ok(Self(phone.to_string()))
    }

    /// Create from database value (assumed already validated)
    pub fn from_db(phone: impl Into<String>) -> Self {
        Self(phone.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl FromStr for Phone {
    type Err = AuthError;

    fn from_str(s: &str) -> AuthResult<Self> {
        Phone::new(s)
    }
}

impl AsRef<str> for Phone {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_phone_valid() {
        assert_eq!(Phone::new("79851174203").unwrap().as_str(), "79851174203");
        assert_eq!(Phone::new("89991234567").unwrap().as_str(), "89991234567");
        assert_eq!(Phone::new("  79991234567\n").unwrap().as_str(), "79991234567");
    }

    #[test]
    fn test_phone_invalid() {
        for bad in [
            "",
            "   ",
            "7985117420",
            "798511742031",
            "69851174203",
            "+7985117420",
            "7985117420a",
            "7985 117420",
            "７9851174203",
        ] {
            assert!(
                matches!(Phone::new(bad), Err(AuthError::InvalidPhone(_))),
                "{bad:?} should be rejected"
            );
        }
    }

    #[test]
    fn test_phone_display() {
        let phone = Phone::new("79851174203").unwrap();
        assert_eq!(phone.to_string(), "79851174203");
    }
}
