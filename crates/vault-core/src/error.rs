//! Error types for vault core operations.
//!
//! This module defines the error hierarchy for all core operations.
//! Errors are descriptive at the core level; the CLI layer maps these
//! to user-friendly messages and exit codes.

use thiserror::Error;

/// Result type alias for vault operations.
pub type Result<T> = std::result::Result<T, VaultError>;

/// Core error type for vault operations.
#[derive(Debug, Error)]
pub enum VaultError {
    /// The envelope is structurally invalid: base64 decoding failed or
    /// the decoded frame is shorter than the fixed header regions.
    /// Detected before any cryptographic work is attempted.
    #[error("Malformed vault envelope")]
    MalformedEnvelope,

    /// Authentication tag verification failed. Covers both a wrong
    /// passphrase and tampered/corrupted ciphertext; the two causes are
    /// deliberately indistinguishable.
    #[error("Failed to decrypt vault: wrong passphrase or corrupted data")]
    AuthenticationFailure,

    /// Vault file does not exist at the given path.
    #[error("Vault not found: {0}")]
    NotFound(String),

    /// Invalid user input (empty word, duplicate entry name, etc.)
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Vault document failed to parse or serialize.
    #[error("Document error: {0}")]
    Document(String),

    /// Storage I/O error while reading or writing the vault file.
    #[error("Storage error: {0}")]
    Storage(String),

    /// Primitive-level cryptographic failure. Indicates a broken
    /// internal invariant (bad key/nonce length), not a user error.
    #[error("Encryption error: {0}")]
    Crypto(String),
}

impl From<std::io::Error> for VaultError {
    fn from(err: std::io::Error) -> Self {
        VaultError::Storage(err.to_string())
    }
}

impl From<serde_json::Error> for VaultError {
    fn from(err: serde_json::Error) -> Self {
        VaultError::Document(err.to_string())
    }
}
