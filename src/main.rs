//! Strictly XO - unified CLI
//!
//! Terminal client and the resolver service it talks to.

#![warn(missing_docs)]

mod cli;
mod tui;

use anyhow::{Context, Result};
use clap::Parser;
use cli::{Cli, Command};
use std::path::PathBuf;
use std::sync::Arc;
use strictly_xo::{
    ClientConfig, Difficulty, HttpResolver, MoveCoordinator, RefereeResolver, Resolver,
};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    match cli.command {
        Command::Play {
            server_url,
            offline,
            config,
            difficulty,
        } => run_play(server_url, offline, config, difficulty).await,
        Command::Serve { port, host } => run_server(host, port).await,
    }
}

/// Run the terminal client
async fn run_play(
    server_url: Option<String>,
    offline: bool,
    config_path: PathBuf,
    difficulty: Option<Difficulty>,
) -> Result<()> {
    let mut config = ClientConfig::load(Some(&config_path))?;
    if let Some(url) = server_url {
        config = config.with_server_url(url);
    }
    if let Some(level) = difficulty {
        config = config.with_difficulty(level);
    }

    tui::init_file_logging(config.log_file())
        .with_context(|| format!("Failed to open log file {}", config.log_file().display()))?;

    let resolver: Arc<dyn Resolver> = if offline {
        info!("Offline play, resolving moves in-process");
        Arc::new(RefereeResolver::new())
    } else {
        info!(server_url = %config.server_url(), "Resolving moves over HTTP");
        Arc::new(HttpResolver::new(config.server_url(), config.request_timeout())?)
    };

    let coordinator = MoveCoordinator::new(resolver, config.pacing());
    tui::run_tui(coordinator, *config.difficulty()).await
}

/// Run the HTTP resolver service
async fn run_server(host: String, port: u16) -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    info!(%host, port, "Starting Strictly XO resolver service");
    strictly_xo::serve(host, port).await?;
    Ok(())
}
