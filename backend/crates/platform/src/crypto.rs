//! Cryptographic Utilities
//!
//! Every random value in the service comes from the operating system CSPRNG.

use base64::{Engine, engine::general_purpose};
use rand::{Rng, RngCore, rngs::OsRng};
use sha2::{Digest, Sha256};

/// Generate cryptographically secure random bytes
pub fn random_bytes(len: usize) -> Vec<u8> {
    let mut bytes = vec![0u8; len];
    OsRng.fill_bytes(&mut bytes);
    bytes
}

/// Random opaque token: `len` CSPRNG bytes, lowercase hex encoded
pub fn random_token_hex(len: usize) -> String {
    hex::encode(random_bytes(len))
}

/// Uniform CSPRNG integer in `0..=max`
pub fn random_code(max: u16) -> u16 {
    OsRng.gen_range(0..=max)
}

/// Compute SHA-256 hash
pub fn sha256(data: &[u8]) -> [u8; 32] {
    let mut hasher = Sha256::new();
    hasher.update(data);
    hasher.finalize().into()
}

/// SHA-256, lowercase hex encoded
pub fn sha256_hex(data: &[u8]) -> String {
    hex::encode(sha256(data))
}

/// Decode a standard base64 secret, ignoring surrounding whitespace
pub fn from_base64(s: &str) -> Result<Vec<u8>, base64::DecodeError> {
    general_purpose::STANDARD.decode(s.trim())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sha256_known_values() {
        // SHA-256 of empty string
        assert_eq!(
            sha256_hex(b""),
            "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855"
        );
        // SHA-256 of "hello"
        assert_eq!(
            sha256_hex(b"hello"),
            "2cf24dba5fb0a30e26e83b2ac5b9e29e1b161e5c1fa7425e73043362938b9824"
        );
    }

    #[test]
    fn test_random_bytes() {
        let bytes = random_bytes(32);
        assert_eq!(bytes.len(), 32);
        // Should not be all zeros (statistically)
        assert!(bytes.iter().any(|&b| b != 0));
    }

    #[test]
    fn test_random_token_hex() {
        let a = random_token_hex(16);
        let b = random_token_hex(16);
        assert_eq!(a.len(), 32);
        assert!(a.chars().all(|c| c.is_ascii_hexdigit()));
        assert_ne!(a, b);
    }

    #[test]
    fn test_random_code_range() {
        for _ in 0..1000 {
            assert!(random_code(9999) <= 9999);
        }
        assert_eq!(random_code(0), 0);
    }

    #[test]
    fn test_from_base64() {
        assert_eq!(from_base64(" aGVsbG8gd29ybGQ=\n").unwrap(), b"hello world");
        assert!(from_base64("not base64!").is_err());
    }
}
