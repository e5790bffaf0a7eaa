//! The encrypted vault envelope.
//!
//! One vault snapshot is a single opaque blob:
//!
//! ```text
//! salt (16) ‖ nonce (12) ‖ auth tag (16) ‖ ciphertext (plaintext-length)
//! ```
//!
//! base64-encoded for storage as text. There are no length prefixes;
//! the fixed regions are implicit and the ciphertext runs to the end of
//! the decoded buffer. The key is derived per operation with
//! PBKDF2-HMAC-SHA-256 (see [`crate::crypto::key`]) and the payload is
//! sealed with AES-256-GCM using no associated data.
//!
//! The layout and parameters are a wire contract: any conforming
//! implementation of this format (whatever the runtime) must produce and
//! accept exactly these bytes. There is no version or algorithm
//! identifier, so the constants here can never change without orphaning
//! every existing vault file. Known format gap; left unfixed for
//! compatibility.

use aes_gcm::aead::{Aead, KeyInit};
use aes_gcm::{Aes256Gcm, Key, Nonce};
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use zeroize::Zeroizing;

use crate::crypto::key::{derive_key, SALT_LENGTH};
use crate::error::{Result, VaultError};

/// Byte length of the key-derivation salt.
pub const SALT_LEN: usize = SALT_LENGTH;

/// Byte length of the AES-GCM nonce (96 bits, the standard size).
pub const NONCE_LEN: usize = 12;

/// Byte length of the GCM authentication tag.
pub const TAG_LEN: usize = 16;

/// Structural floor: an envelope with fewer decoded bytes than the
/// fixed regions cannot be valid and is rejected before any key
/// derivation.
pub const MIN_ENVELOPE_LEN: usize = SALT_LEN + NONCE_LEN + TAG_LEN;

/// Encrypt a plaintext under a passphrase into a base64 envelope.
///
/// A fresh random salt and nonce are drawn from the OS CSPRNG on every
/// call, so encrypting identical plaintext twice yields different
/// envelopes. The salt keys are effectively unique per envelope, which
/// is what keeps (key, nonce) pairs from ever repeating.
///
/// # Errors
///
/// Returns [`VaultError::Crypto`] only on primitive-level failure,
/// which would mean a broken internal invariant.
pub fn encrypt(plaintext: &[u8], passphrase: &[u8]) -> Result<String> {
    let mut salt = [0u8; SALT_LEN];
    getrandom::getrandom(&mut salt)
        .map_err(|e| VaultError::Crypto(format!("CSPRNG failure: {}", e)))?;
    let mut nonce_bytes = [0u8; NONCE_LEN];
    getrandom::getrandom(&mut nonce_bytes)
        .map_err(|e| VaultError::Crypto(format!("CSPRNG failure: {}", e)))?;

    let key = derive_key(passphrase, &salt);
    let cipher = Aes256Gcm::new(Key::<Aes256Gcm>::from_slice(key.as_bytes()));

    // The aead crate returns ciphertext ‖ tag; the envelope stores the
    // tag in front of the ciphertext.
    let sealed = cipher
        .encrypt(Nonce::from_slice(&nonce_bytes), plaintext)
        .map_err(|_| VaultError::Crypto("AES-GCM encryption failed".to_string()))?;
    let (ciphertext, tag) = sealed.split_at(sealed.len() - TAG_LEN);

    let mut frame = Vec::with_capacity(MIN_ENVELOPE_LEN + ciphertext.len());
    frame.extend_from_slice(&salt);
    frame.extend_from_slice(&nonce_bytes);
    frame.extend_from_slice(tag);
    frame.extend_from_slice(ciphertext);

    Ok(STANDARD.encode(&frame))
}

/// Decrypt a base64 envelope under a passphrase.
///
/// The returned plaintext buffer is zeroized when dropped.
///
/// # Errors
///
/// - [`VaultError::MalformedEnvelope`] if the string is not valid
///   base64 or decodes to fewer than [`MIN_ENVELOPE_LEN`] bytes. No
///   cryptographic work happens in this case.
/// - [`VaultError::AuthenticationFailure`] if tag verification fails.
///   Wrong passphrase and tampered data are indistinguishable here, on
///   purpose; no partial plaintext is ever returned.
pub fn decrypt(envelope: &str, passphrase: &[u8]) -> Result<Zeroizing<Vec<u8>>> {
    let frame = STANDARD
        .decode(envelope)
        .map_err(|_| VaultError::MalformedEnvelope)?;
    if frame.len() < MIN_ENVELOPE_LEN {
        return Err(VaultError::MalformedEnvelope);
    }

    let mut salt = [0u8; SALT_LEN];
    salt.copy_from_slice(&frame[..SALT_LEN]);
    let nonce_bytes = &frame[SALT_LEN..SALT_LEN + NONCE_LEN];
    let tag = &frame[SALT_LEN + NONCE_LEN..MIN_ENVELOPE_LEN];
    let ciphertext = &frame[MIN_ENVELOPE_LEN..];

    let key = derive_key(passphrase, &salt);
    let cipher = Aes256Gcm::new(Key::<Aes256Gcm>::from_slice(key.as_bytes()));

    // Reassemble ciphertext ‖ tag for the aead crate.
    let mut sealed = Vec::with_capacity(ciphertext.len() + TAG_LEN);
    sealed.extend_from_slice(ciphertext);
    sealed.extend_from_slice(tag);

    let plaintext = cipher
        .decrypt(Nonce::from_slice(nonce_bytes), sealed.as_slice())
        .map_err(|_| VaultError::AuthenticationFailure)?;

    Ok(Zeroizing::new(plaintext))
}
