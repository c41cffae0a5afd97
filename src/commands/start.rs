use anyhow::Result;
use colored::Colorize;
use school_booking::{config, init_tracing, server};
use std::path::Path;
use tracing::info;

/// Execute the start command
///
/// Loads configuration, applies command-line overrides and serves until shutdown.
pub async fn execute(config_path: &Path, host: Option<String>, port: Option<u16>) -> Result<()> {
    let mut cfg = config::load_config(config_path)?;

    if let Some(host) = host {
        cfg.server.host = host;
    }
    if let Some(port) = port {
        cfg.server.port = port;
    }
    config::validate_config(&cfg)?;

    init_tracing(&cfg.server.log_level, &cfg.server.log_format);

    println!(
        "{} http://{}:{}",
        "Starting booking site on".green(),
        cfg.server.host,
        cfg.server.port
    );
    info!(config = %config_path.display(), "Configuration loaded");

    server::start_server(cfg).await
}
