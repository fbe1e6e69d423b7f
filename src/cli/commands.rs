//! CLI command implementations
//!
//! Both commands load the config, open the store, and optionally reseed it.
//! `serve` then blocks on the HTTP server until shutdown.

use std::path::Path;

use tracing_subscriber::EnvFilter;

use super::args::{Cli, Command};
use super::config::Config;
use super::errors::{CliError, CliResult};
use crate::http_server::HttpServer;
use crate::service::SocialService;
use crate::store::Store;

/// Parse arguments, set up logging and run the chosen command
pub fn run() -> CliResult<()> {
    init_logging();
    let cli = Cli::parse_args();
    run_command(cli.command)
}

/// Dispatch a parsed command
pub fn run_command(command: Command) -> CliResult<()> {
    match command {
        Command::Serve { config, port, seed } => serve(&config, port, seed),
        Command::Seed { config } => seed(&config),
    }
}

/// Install the global tracing subscriber. `RUST_LOG` overrides the `info` default.
pub fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    // A second call (tests, embedding) keeps the first subscriber.
    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();
}

/// Open the configured store, reseeding it first when `seed` is set
fn open_store(config: &Config, seed: bool) -> CliResult<Store> {
    let store = Store::open(&config.database_path).map_err(|e| {
        CliError::store_error(format!(
            "Failed to open store at {}: {}",
            config.database_path, e
        ))
    })?;

    if seed {
        store.reset_and_seed(&config.seed_users)?;
        tracing::info!(users = config.seed_users.len(), "store reset and seeded");
    }

    Ok(store)
}

/// Start the HTTP API server
pub fn serve(config_path: &Path, port: Option<u16>, seed: bool) -> CliResult<()> {
    let mut config = Config::load(config_path)?;
    if let Some(port) = port {
        config.server.port = port;
        config.validate()?;
    }

    let store = open_store(&config, seed)?;
    let server = HttpServer::new(config.server.clone(), SocialService::new(store));

    let rt = tokio::runtime::Runtime::new()
        .map_err(|e| CliError::serve_failed(format!("Failed to create tokio runtime: {}", e)))?;

    rt.block_on(async {
        server
            .start()
            .await
            .map_err(|e| CliError::serve_failed(format!("HTTP server failed: {}", e)))
    })
}

/// Drop all data and insert the configured seed users
pub fn seed(config_path: &Path) -> CliResult<()> {
    let config = Config::load(config_path)?;
    open_store(&config, true)?;
    Ok(())
}
