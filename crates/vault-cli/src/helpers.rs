//! Passphrase acquisition and vault path resolution.

use std::io::IsTerminal;
use std::path::PathBuf;

use dialoguer::{theme::ColorfulTheme, Password};
use zeroize::Zeroize;

use vault_core::crypto::passphrase::DEFAULT_WORD_COUNT;
use vault_core::Passphrase;

use crate::cli::Cli;
use crate::config::{self, VaultConfig};

/// Resolve the vault path for commands that operate on an existing
/// vault: positional argument > `--vault`/`VAULT_PATH` > config file.
pub fn resolve_vault_path(cli: &Cli, positional: Option<&String>) -> anyhow::Result<PathBuf> {
    if let Some(path) = positional {
        return Ok(PathBuf::from(path));
    }
    if let Some(path) = &cli.vault {
        return Ok(PathBuf::from(path));
    }
    if let Some(config) = config::load_config()? {
        return Ok(PathBuf::from(config.vault.path));
    }
    Err(anyhow::anyhow!(
        "No vault path provided. Pass a path, use --vault, or run `vault init` first."
    ))
}

/// Resolve the target path for `init`, falling back to the XDG data
/// directory when nothing is given.
pub fn resolve_init_path(cli: &Cli, positional: Option<&String>) -> anyhow::Result<PathBuf> {
    if let Some(path) = positional {
        return Ok(PathBuf::from(path));
    }
    if let Some(path) = &cli.vault {
        return Ok(PathBuf::from(path));
    }
    config::default_vault_path()
}

/// Number of recovery-phrase words to prompt for:
/// `VAULT_PASSPHRASE_WORDS` > config > 12.
pub fn passphrase_word_count(config: Option<&VaultConfig>) -> usize {
    if let Ok(value) = std::env::var("VAULT_PASSPHRASE_WORDS") {
        if let Ok(count) = value.trim().parse::<usize>() {
            if count > 0 {
                return count;
            }
        }
    }
    if let Some(config) = config {
        if config.passphrase.words > 0 {
            return config.passphrase.words;
        }
    }
    DEFAULT_WORD_COUNT
}

/// Whether passphrase prompts can be shown.
pub fn is_interactive() -> bool {
    std::io::stdin().is_terminal() && env_passphrase().is_none()
}

fn env_passphrase() -> Option<String> {
    std::env::var("VAULT_PASSPHRASE")
        .ok()
        .filter(|value| !value.trim().is_empty())
}

/// Obtain the passphrase: `VAULT_PASSPHRASE` (whitespace-joined words)
/// if set, otherwise one hidden prompt per word.
pub fn acquire_passphrase(word_count: usize) -> anyhow::Result<Passphrase> {
    if let Some(mut value) = env_passphrase() {
        let result = Passphrase::from_phrase(&value);
        value.zeroize();
        return match result {
            Ok(passphrase) => Ok(passphrase),
            Err(e) => Err(anyhow::anyhow!("VAULT_PASSPHRASE: {}", e)),
        };
    }

    if !std::io::stdin().is_terminal() {
        return Err(anyhow::anyhow!(
            "Interactive passphrase input required. Set VAULT_PASSPHRASE or run on a TTY."
        ));
    }

    prompt_passphrase_words(word_count)
}

fn prompt_passphrase_words(word_count: usize) -> anyhow::Result<Passphrase> {
    println!(
        "Enter your {}-word recovery phrase one word at a time.",
        word_count
    );

    let theme = ColorfulTheme::default();
    let mut words: Vec<String> = Vec::with_capacity(word_count);

    for index in 1..=word_count {
        loop {
            let word = Password::with_theme(&theme)
                .with_prompt(format!("Word {}/{}", index, word_count))
                .interact()
                .map_err(|e| anyhow::anyhow!("Failed to read passphrase word: {}", e))?;
            if word.trim().is_empty() {
                eprintln!("Word cannot be empty.");
                continue;
            }
            words.push(word);
            break;
        }
    }

    let passphrase = Passphrase::from_words(&words)
        .map_err(|e| anyhow::anyhow!("Invalid passphrase: {}", e));
    for word in words.iter_mut() {
        word.zeroize();
    }
    passphrase
}
