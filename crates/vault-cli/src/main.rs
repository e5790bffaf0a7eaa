//! Vault CLI - a single-file encrypted password vault.
//!
//! This is the command-line interface for pswrd-vault. It provides a
//! user-friendly interface to the core library functionality.

mod cli;
mod commands;
mod config;
mod constants;
mod errors;
mod helpers;
mod session;

use clap::Parser;

use cli::{Cli, Commands};
use vault_core::VERSION;

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    match &cli.command {
        Some(Commands::Init { path }) => commands::init::run(&cli, path.as_ref()),
        Some(Commands::Open { path }) => commands::open::run(&cli, path.as_ref()),
        Some(Commands::Export { path, compact }) => {
            commands::export::run(&cli, path.as_ref(), *compact)
        }
        Some(Commands::Check { path }) => commands::check::run(&cli, path.as_ref()),
        Some(Commands::Backup { destination }) => commands::backup::run(&cli, destination),
        Some(Commands::Completions { shell }) => {
            commands::misc::completions(*shell);
            Ok(())
        }
        None => {
            println!("pswrd-vault v{}", VERSION);
            println!("\nRun `vault --help` for usage information.");
            Ok(())
        }
    }
}
