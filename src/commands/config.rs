use anyhow::Result;
use colored::Colorize;
use school_booking::{
    config::{self, Config},
    logging::mask_secret,
};
use std::path::Path;
use tracing::info;

/// Execute the config show command
///
/// Displays the effective configuration with the admin password masked
pub fn show(config_path: &Path) -> Result<()> {
    println!("{}", "Loading configuration...".yellow());
    info!("Loading configuration for display");

    let cfg = config::load_config(config_path)?;
    let sanitized = sanitize_secrets(&cfg);

    println!("{}", "Current Configuration:".green().bold());
    println!();

    let toml_string = toml::to_string_pretty(&sanitized)?;
    println!("{}", toml_string);

    Ok(())
}

/// Execute the config validate command
pub fn validate(config_path: &Path) -> Result<()> {
    println!("{}", "Validating configuration...".yellow());

    let cfg = config::load_config(config_path)?;

    println!("{}", "✓ Configuration is valid".green());
    println!();
    println!("{}", "Summary:".bold());
    println!("  Listen: {}:{}", cfg.server.host, cfg.server.port);
    println!("  Database: {}", cfg.database.path);
    println!(
        "  Admin access: {}",
        if cfg.admin.password.is_some() { "configured" } else { "disabled" }
    );

    info!("Configuration validation successful");
    Ok(())
}

fn sanitize_secrets(cfg: &Config) -> Config {
    let mut sanitized = cfg.clone();
    sanitized.admin.password = sanitized.admin.password.as_deref().map(mask_secret);
    sanitized
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sanitize_secrets() {
        let mut cfg = Config::default();
        cfg.admin.password = Some("demo-password".to_string());

        let sanitized = sanitize_secrets(&cfg);
        assert_eq!(sanitized.admin.password.as_deref(), Some("de***"));
        assert_eq!(cfg.admin.password.as_deref(), Some("demo-password"));
    }

    #[test]
    fn test_sanitized_config_serializes() {
        let toml_string = toml::to_string_pretty(&sanitize_secrets(&Config::default())).unwrap();
        assert!(toml_string.contains("[server]"));
        assert!(!toml_string.contains("password"));
    }
}
