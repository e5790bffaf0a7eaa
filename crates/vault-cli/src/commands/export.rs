//! `vault export` - decrypt the vault and print the document JSON.
//!
//! Secret item values stay enveloped in the output; export never
//! decrypts individual secrets.

use crate::cli::Cli;
use crate::config;
use crate::helpers::{passphrase_word_count, resolve_vault_path};
use crate::session::unlock_with_retry;

pub fn run(cli: &Cli, path: Option<&String>, compact: bool) -> anyhow::Result<()> {
    let target = resolve_vault_path(cli, path)?;
    let word_count = passphrase_word_count(config::load_config()?.as_ref());

    let session = unlock_with_retry(&target, word_count)?;

    let output = if compact {
        session.document.to_json()?
    } else {
        session.document.to_json_pretty()?
    };
    println!("{}", output);
    Ok(())
}
