//! Command-line interface for strictly_xo.

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use strictly_xo::Difficulty;

/// Strictly XO - tic-tac-toe client with an authoritative move resolver
#[derive(Parser, Debug)]
#[command(name = "strictly_xo")]
#[command(about = "Tic-tac-toe in the terminal, resolved by a server", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Subcommand to run
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Run the terminal client
    Play {
        /// Resolver service URL (overrides config and environment)
        #[arg(long)]
        server_url: Option<String>,

        /// Resolve moves in-process instead of over HTTP
        #[arg(long, conflicts_with = "server_url")]
        offline: bool,

        /// Path to the client config file
        #[arg(short, long, default_value = "strictly_xo.toml")]
        config: PathBuf,

        /// Preselected bot difficulty
        #[arg(long)]
        difficulty: Option<Difficulty>,
    },

    /// Run the HTTP resolver service
    Serve {
        /// Port to bind to
        #[arg(short, long, default_value = "3000")]
        port: u16,

        /// Host to bind to
        #[arg(long, default_value = "127.0.0.1")]
        host: String,
    },
}
