//! `vault backup` - copy the encrypted vault file as-is.

use crate::cli::Cli;
use crate::helpers::resolve_vault_path;

pub fn run(cli: &Cli, destination: &str) -> anyhow::Result<()> {
    let source = resolve_vault_path(cli, None)?;
    let count = std::fs::copy(&source, destination).map_err(|e| {
        anyhow::anyhow!(
            "Failed to copy vault from {} to {}: {}",
            source.display(),
            destination,
            e
        )
    })?;
    if count == 0 {
        return Err(anyhow::anyhow!("Backup failed: zero bytes written"));
    }
    if !cli.quiet {
        println!("Backed up vault to {}", destination);
    }
    Ok(())
}
