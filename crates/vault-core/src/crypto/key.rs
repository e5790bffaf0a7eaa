//! Key derivation using PBKDF2-HMAC-SHA-256.
//!
//! This module stretches a low-entropy multi-word passphrase into a
//! fixed-length symmetric key. The iteration count makes each guess
//! expensive, which is the entire defense for a word-list passphrase.

use pbkdf2::pbkdf2_hmac;
use sha2::Sha256;
use zeroize::ZeroizeOnDrop;

/// PBKDF2 iteration count. Fixed: every envelope ever written was
/// derived with this value and there is no version field to signal a
/// change (see `envelope` module docs).
pub const PBKDF2_ITERATIONS: u32 = 600_000;

/// Length of the derived key in bytes (256 bits for AES-256).
pub const KEY_LENGTH: usize = 32;

/// Length of the key-derivation salt in bytes.
pub const SALT_LENGTH: usize = 16;

/// A symmetric key derived from a passphrase.
///
/// Key material is zeroized from memory when dropped, reducing the
/// window of exposure.
#[derive(Clone, ZeroizeOnDrop)]
pub struct DerivedKey {
    /// The raw key bytes (zeroized on drop)
    key: [u8; KEY_LENGTH],
}

impl DerivedKey {
    pub(crate) fn from_bytes(bytes: [u8; KEY_LENGTH]) -> Self {
        Self { key: bytes }
    }

    /// Get a reference to the raw key bytes.
    ///
    /// # Security
    ///
    /// Avoid storing or logging this value. Use only for an immediate
    /// cipher operation.
    pub fn as_bytes(&self) -> &[u8; KEY_LENGTH] {
        &self.key
    }
}

impl std::fmt::Debug for DerivedKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DerivedKey")
            .field("key", &"[REDACTED]")
            .finish()
    }
}

/// Derive an encryption key from passphrase bytes and a salt.
///
/// Deterministic: the same (passphrase, salt) pair always yields the
/// same key. The salt is random per encryption, so keys are effectively
/// unique per envelope. There is no failure path; both inputs have
/// fixed, valid shapes by construction.
pub fn derive_key(passphrase: &[u8], salt: &[u8; SALT_LENGTH]) -> DerivedKey {
    let mut key_bytes = [0u8; KEY_LENGTH];
    pbkdf2_hmac::<Sha256>(passphrase, salt, PBKDF2_ITERATIONS, &mut key_bytes);
    DerivedKey::from_bytes(key_bytes)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SALT: [u8; SALT_LENGTH] = *b"0123456789abcdef";

    #[test]
    fn test_key_derivation_deterministic() {
        let key1 = derive_key(b"alpha beta gamma", &SALT);
        let key2 = derive_key(b"alpha beta gamma", &SALT);

        assert_eq!(key1.as_bytes(), key2.as_bytes());
        assert_eq!(key1.as_bytes().len(), KEY_LENGTH);
    }

    #[test]
    fn test_different_salt_different_key() {
        let other_salt: [u8; SALT_LENGTH] = *b"fedcba9876543210";

        let key1 = derive_key(b"alpha beta gamma", &SALT);
        let key2 = derive_key(b"alpha beta gamma", &other_salt);

        assert_ne!(key1.as_bytes(), key2.as_bytes());
    }

    #[test]
    fn test_different_passphrase_different_key() {
        let key1 = derive_key(b"alpha beta gamma", &SALT);
        let key2 = derive_key(b"alpha beta delta", &SALT);

        assert_ne!(key1.as_bytes(), key2.as_bytes());
    }

    #[test]
    fn test_derived_key_debug_redacts() {
        let key = derive_key(b"alpha beta gamma", &SALT);

        let debug_output = format!("{:?}", key);
        assert!(debug_output.contains("REDACTED"));

        let key_hex = hex::encode(&key.as_bytes()[..4]);
        assert!(!debug_output.contains(&key_hex));
    }
}
