//! Passphrase assembly and validation.
//!
//! A passphrase is an ordered list of words. The key-derivation input is
//! the words joined by single ASCII spaces, in user-entered order. The
//! joined bytes live in a zeroizing buffer and are wiped on drop.

use zeroize::Zeroizing;

use crate::error::{Result, VaultError};

/// Default number of recovery-phrase words.
pub const DEFAULT_WORD_COUNT: usize = 12;

/// The user's multi-word secret, held as the exact byte sequence fed to
/// key derivation. Never persisted; zeroized on drop.
pub struct Passphrase {
    bytes: Zeroizing<Vec<u8>>,
}

impl Passphrase {
    /// Build a passphrase from individual words.
    ///
    /// Each word is trimmed; an empty word (after trimming) is rejected.
    /// The caller still owns its word buffers and should zeroize them.
    pub fn from_words(words: &[String]) -> Result<Self> {
        if words.is_empty() {
            return Err(VaultError::InvalidInput(
                "Passphrase must contain at least one word".to_string(),
            ));
        }

        let mut bytes = Zeroizing::new(Vec::new());
        for (index, word) in words.iter().enumerate() {
            let trimmed = word.trim();
            if trimmed.is_empty() {
                return Err(VaultError::InvalidInput(format!(
                    "Passphrase word {} is empty",
                    index + 1
                )));
            }
            if index > 0 {
                bytes.push(b' ');
            }
            bytes.extend_from_slice(trimmed.as_bytes());
        }

        Ok(Self { bytes })
    }

    /// Build a passphrase from a whitespace-joined phrase, e.g. the
    /// value of an environment variable.
    pub fn from_phrase(phrase: &str) -> Result<Self> {
        let words: Vec<String> = phrase.split_whitespace().map(str::to_string).collect();
        Self::from_words(&words)
    }

    /// The key-derivation input: words joined by single spaces.
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }
}

impl std::fmt::Debug for Passphrase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Passphrase")
            .field("bytes", &"[REDACTED]")
            .finish()
    }
}
