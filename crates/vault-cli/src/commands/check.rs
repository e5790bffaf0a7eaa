//! `vault check` - verify the vault decrypts and parses.

use crate::cli::Cli;
use crate::config;
use crate::helpers::{passphrase_word_count, resolve_vault_path};
use crate::session::unlock_with_retry;

pub fn run(cli: &Cli, path: Option<&String>) -> anyhow::Result<()> {
    let target = resolve_vault_path(cli, path)?;
    let word_count = passphrase_word_count(config::load_config()?.as_ref());

    // unlock_with_retry exits with the auth code if the envelope does
    // not verify, so reaching this point is the check passing.
    let session = unlock_with_retry(&target, word_count)?;

    if !cli.quiet {
        println!("Integrity check: OK");
        println!("- envelope: OK");
        println!("- document: OK ({} entries)", session.document.entries.len());
    }
    Ok(())
}
