use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(
    name = "nixready",
    version,
    about = "Nix developer-environment readiness checker"
)]
pub struct Cli {
    #[arg(long, global = true, help = "Output machine-readable JSON")]
    pub json: bool,
    #[arg(long, global = true, help = "Assume yes for install prompts")]
    pub yes: bool,
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Full readiness test: nix.conf policy plus direnv shell hooks
    Check { app_name: String },
    /// Validate nix.conf against the required-attribute policy
    Conf { app_name: String },
    /// Check direnv and wire its activation hook into shell dotfiles
    Hooks,
}
