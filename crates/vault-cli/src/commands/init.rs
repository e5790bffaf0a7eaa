//! `vault init` - create a new empty encrypted vault.

use crate::cli::Cli;
use crate::config::{self, VaultConfig};
use crate::helpers::{acquire_passphrase, passphrase_word_count, resolve_init_path};
use crate::session::Session;

pub fn run(cli: &Cli, path: Option<&String>) -> anyhow::Result<()> {
    let target = resolve_init_path(cli, path)?;
    if target.exists() {
        return Err(anyhow::anyhow!(
            "A vault already exists at {}. Refusing to overwrite it.",
            target.display()
        ));
    }

    let existing_config = config::load_config()?;
    let word_count = passphrase_word_count(existing_config.as_ref());

    if !cli.quiet {
        println!("Creating a new vault at {}", target.display());
    }
    let passphrase = acquire_passphrase(word_count)?;

    let mut session = Session::create(target.clone(), passphrase);
    session.save()?;

    // First init records the vault location so later commands can run
    // without a path argument. An existing config is left alone.
    if existing_config.is_none() {
        let config_path = config::default_config_path()?;
        config::write_config(&config_path, &VaultConfig::new(target.clone(), word_count))?;
    }

    if !cli.quiet {
        println!("Initialized new vault at {}", target.display());
    }
    Ok(())
}
