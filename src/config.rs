use serde::{Deserialize, Serialize};
use std::path::Path;

/// Environment variable prefix, e.g. `SCHOOL_BOOKING__ADMIN__PASSWORD`
pub const ENV_PREFIX: &str = "SCHOOL_BOOKING";

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Config {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    #[serde(default)]
    pub admin: AdminConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub log_level: String,
    pub log_format: String,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DatabaseConfig {
    /// SQLite file path
    pub path: String,
    pub max_connections: u32,
}

/// Admin access settings
///
/// Without a password the admin pages reject every request.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct AdminConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server: ServerConfig {
                host: "127.0.0.1".to_string(),
                port: 5000,
                log_level: "info".to_string(),
                log_format: "text".to_string(),
            },
            database: DatabaseConfig {
                path: "bookings.db".to_string(),
                max_connections: 5,
            },
            admin: AdminConfig::default(),
        }
    }
}

/// Load configuration from defaults, an optional TOML file and the environment
pub fn load_config(path: &Path) -> anyhow::Result<Config> {
    let defaults = Config::default();

    let config = config::Config::builder()
        .set_default("server.host", defaults.server.host)?
        .set_default("server.port", i64::from(defaults.server.port))?
        .set_default("server.log_level", defaults.server.log_level)?
        .set_default("server.log_format", defaults.server.log_format)?
        .set_default("database.path", defaults.database.path)?
        .set_default("database.max_connections", i64::from(defaults.database.max_connections))?
        .add_source(config::File::from(path).required(false))
        .add_source(config::Environment::with_prefix(ENV_PREFIX).separator("__"))
        .build()?;

    let cfg: Config = config.try_deserialize()?;
    validate_config(&cfg)?;

    Ok(cfg)
}

pub fn validate_config(cfg: &Config) -> anyhow::Result<()> {
    if cfg.server.port == 0 {
        anyhow::bail!("Server port must be non-zero");
    }

    match cfg.server.log_format.as_str() {
        "text" | "json" => {}
        other => anyhow::bail!("Invalid log format '{}', expected 'text' or 'json'", other),
    }

    if cfg.database.path.trim().is_empty() {
        anyhow::bail!("Database path cannot be empty");
    }

    if cfg.database.max_connections == 0 {
        anyhow::bail!("Database max_connections must be at least 1");
    }

    if let Some(password) = &cfg.admin.password {
        if password.is_empty() {
            anyhow::bail!("Admin password cannot be empty; omit it to disable admin access");
        }
    }

    Ok(())
}
