//! The unlocked vault session.
//!
//! A `Session` owns the decrypted document, the passphrase, and a dirty
//! flag, and is passed explicitly through the menu flows. Nothing about
//! the unlocked vault lives in module-global state. Dropping the
//! session zeroizes the passphrase via the `Passphrase` type.

use std::path::{Path, PathBuf};

use zeroize::Zeroizing;

use vault_core::{envelope, fs, Passphrase, VaultDocument, VaultError};

use crate::errors::CliError;
use crate::helpers::{acquire_passphrase, is_interactive};

pub struct Session {
    pub document: VaultDocument,
    passphrase: Passphrase,
    path: PathBuf,
    pub dirty: bool,
}

impl Session {
    /// Start a session over a brand-new empty vault. The file does not
    /// exist until the first `save`.
    pub fn create(path: PathBuf, passphrase: Passphrase) -> Self {
        Self {
            document: VaultDocument::new(),
            passphrase,
            path,
            dirty: true,
        }
    }

    /// Read, decrypt, and parse the vault file.
    pub fn unlock(path: PathBuf, passphrase: Passphrase) -> vault_core::Result<Self> {
        let envelope_text = fs::read_vault(&path)?;
        let plaintext = envelope::decrypt(&envelope_text, passphrase.as_bytes())?;
        let document = VaultDocument::from_json(&plaintext)?;
        Ok(Self {
            document,
            passphrase,
            path,
            dirty: false,
        })
    }

    /// Serialize, encrypt, and atomically write the vault file.
    pub fn save(&mut self) -> vault_core::Result<()> {
        let plaintext = Zeroizing::new(self.document.to_json()?);
        let envelope_text = envelope::encrypt(plaintext.as_bytes(), self.passphrase.as_bytes())?;
        fs::write_vault_atomic(&self.path, &envelope_text)?;
        self.dirty = false;
        Ok(())
    }

    /// Envelope a secret item value under the session passphrase.
    pub fn seal_secret(&self, value: &str) -> vault_core::Result<String> {
        envelope::encrypt(value.as_bytes(), self.passphrase.as_bytes())
    }

    /// Decrypt a secret item value on demand.
    pub fn reveal_secret(&self, sealed: &str) -> vault_core::Result<Zeroizing<String>> {
        let plaintext = envelope::decrypt(sealed, self.passphrase.as_bytes())?;
        let text = std::str::from_utf8(&plaintext)
            .map_err(|_| VaultError::Document("Secret value is not valid UTF-8".to_string()))?;
        Ok(Zeroizing::new(text.to_string()))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

/// Unlock a vault with passphrase retry logic: 3 attempts when prompts
/// are possible, exactly one otherwise. Exits the process with the
/// appropriate code on auth failure, missing vault, or a structurally
/// invalid vault file.
pub fn unlock_with_retry(path: &Path, word_count: usize) -> anyhow::Result<Session> {
    let interactive = is_interactive();
    let max_attempts: u32 = if interactive { 3 } else { 1 };
    let mut attempts: u32 = 0;

    loop {
        attempts += 1;
        let passphrase = acquire_passphrase(word_count)?;
        match Session::unlock(path.to_path_buf(), passphrase) {
            Ok(session) => return Ok(session),
            Err(VaultError::AuthenticationFailure) => {
                let remaining = max_attempts.saturating_sub(attempts);
                if remaining == 0 {
                    if interactive {
                        CliError::auth_failed_with_hint(
                            "Too many failed passphrase attempts.",
                            "Hint: If you forgot your recovery phrase, the vault cannot be recovered.",
                        )
                        .exit()
                    }
                    CliError::auth_failed(
                        "Failed to decrypt vault: wrong passphrase or corrupted data.",
                    )
                    .exit()
                }
                eprintln!(
                    "Could not decrypt the vault (wrong passphrase or corrupted data). {} attempt{} remaining.",
                    remaining,
                    if remaining == 1 { "" } else { "s" }
                );
                continue;
            }
            Err(VaultError::MalformedEnvelope) => CliError::invalid_input(format!(
                "{} is not a valid vault file.",
                path.display()
            ))
            .exit(),
            Err(VaultError::NotFound(_)) => CliError::not_found(
                format!("Vault not found: {}", path.display()),
                "Hint: Run `vault init` to create one, or pass the right --vault path.",
            )
            .exit(),
            Err(err) => return Err(err.into()),
        }
    }
}
