//! Cryptographic building blocks for the vault.
//!
//! - **PBKDF2-HMAC-SHA-256**: passphrase stretching (600k iterations)
//! - **Zeroization**: key material and passphrase bytes are wiped on drop
//!
//! ## Security Model
//!
//! - Passphrase-based encryption; all key material derives from the
//!   user's recovery phrase and a per-encryption random salt
//! - Derived keys are ephemeral: recomputed per operation, never stored
//! - No plaintext passphrases persisted anywhere
//!
//! ## Threat Model
//!
//! We defend against:
//! - Theft of the encrypted vault file
//! - Offline brute-force attacks on the passphrase
//!
//! We do NOT defend against:
//! - Compromised OS / keylogger
//! - Access to an unlocked session / memory
//!
//! The PBKDF2 parameters and envelope layout are a compatibility
//! contract shared with any other implementation of this vault format.
//! Changing them breaks every previously written vault file.

pub mod key;
pub mod passphrase;

pub use key::{derive_key, DerivedKey};
pub use passphrase::Passphrase;
