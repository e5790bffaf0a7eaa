use clap::{Parser, Subcommand};
use clap_complete::Shell;

use vault_core::VERSION;

/// pswrd-vault - a single-file encrypted password vault
#[derive(Parser)]
#[command(name = "vault")]
#[command(author, version = VERSION, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path to the vault file
    #[arg(short, long, global = true, env = "VAULT_PATH")]
    pub vault: Option<String>,

    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Quiet mode (minimal output)
    #[arg(short, long, global = true)]
    pub quiet: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Initialize a new encrypted vault
    Init {
        /// Path where the vault will be created
        #[arg(value_name = "PATH")]
        path: Option<String>,
    },

    /// Unlock the vault and manage entries interactively
    Open {
        /// Path to the vault file
        #[arg(value_name = "PATH")]
        path: Option<String>,
    },

    /// Decrypt the vault and print the document JSON
    Export {
        /// Path to the vault file
        #[arg(value_name = "PATH")]
        path: Option<String>,

        /// Print compact single-line JSON
        #[arg(long)]
        compact: bool,
    },

    /// Verify the vault decrypts and parses
    Check {
        /// Path to the vault file
        #[arg(value_name = "PATH")]
        path: Option<String>,
    },

    /// Copy the encrypted vault file as-is
    Backup {
        /// Destination path
        #[arg(value_name = "DEST")]
        destination: String,
    },

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_name = "SHELL")]
        shell: Shell,
    },
}
