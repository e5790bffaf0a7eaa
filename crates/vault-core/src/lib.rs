//! # Vault Core
//!
//! Core library for pswrd-vault - a single-file encrypted password vault
//! unlocked by a multi-word recovery phrase.
//!
//! This crate provides the encrypted envelope codec, the vault document
//! model, and file helpers independent of the CLI interface.
//!
//! ## Architecture
//!
//! - **crypto**: Passphrase handling and PBKDF2 key derivation
//! - **envelope**: Binary framing + AES-256-GCM encrypt/decrypt
//! - **document**: Vault entries and items (the plaintext JSON schema)
//! - **fs**: Atomic vault file reads/writes

pub mod crypto;
pub mod document;
pub mod envelope;
pub mod error;
pub mod fs;

pub use crypto::{derive_key, DerivedKey, Passphrase};
pub use document::{Entry, Item, ItemKind, VaultDocument};
pub use error::{Result, VaultError};

/// Core version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
