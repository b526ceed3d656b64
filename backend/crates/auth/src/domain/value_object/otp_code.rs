//! One-time Code Value Object

use derive_more::Display;
use platform::crypto::random_code;

/// Largest code value; codes are drawn uniformly from `0..=OTP_CODE_MAX`
pub const OTP_CODE_MAX: u16 = 9999;

/// Four-digit one-time login code
///
/// Compared numerically and always rendered zero-padded (`0042`), so the
/// representation sent to the user is unambiguous.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
#[display("{_0:04}")]
pub struct OtpCode(u16);

impl OtpCode {
    /// Draw a fresh code from the OS CSPRNG
    pub fn generate() -> Self {
        Self(random_code(OTP_CODE_MAX))
    }

    /// Wrap a known value; `None` when out of range
    pub fn new(value: u16) -> Option<Self> {
        (value <= OTP_CODE_MAX).then_some(Self(value))
    }

    /// Create from database value
    pub fn from_db(value: i16) -> Option<Self> {
        u16::try_from(value).ok().and_then(Self::new)
    }

    pub fn get(&self) -> u16 {
        self.0
    }

    /// Whether a code submitted by a client equals this one
    pub fn matches(&self, submitted: i64) -> bool {
        i64::from(self.0) == submitted
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_in_range() {
        for _ in 0..500 {
            assert!(OtpCode::generate().get() <= OTP_CODE_MAX);
        }
    }

    #[test]
    fn test_zero_padded_display() {
        assert_eq!(OtpCode::new(42).unwrap().to_string(), "0042");
        assert_eq!(OtpCode::new(0).unwrap().to_string(), "0000");
        assert_eq!(OtpCode::new(4821).unwrap().to_string(), "4821");
    }

    #[test]
    fn test_range() {
        assert!(OtpCode::new(9999).is_some());
        assert!(OtpCode::new(10000).is_none());
        assert!(OtpCode::from_db(-1).is_none());
        assert_eq!(OtpCode::from_db(17).map(|c| c.get()), Some(17));
    }

    #[test]
    fn test_matches_numerically() {
        let code = OtpCode::new(42).unwrap();
        assert!(code.matches(42));
        assert!(!code.matches(4200));
        assert!(!code.matches(-42));
        assert!(!code.matches(42 + 65536));
    }
}
