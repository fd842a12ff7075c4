//! Configuration management

use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;

use crate::constants::DEFAULT_SESSION_TTL_SECONDS;

#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    pub app: AppSettings,
    pub database: DatabaseSettings,
    pub session: SessionSettings,
    pub logging: LoggingSettings,
    #[serde(default)]
    pub bootstrap: BootstrapSettings,
}

#[derive(Debug, Deserialize, Clone)]
pub struct AppSettings {
    pub env: String,
    pub host: String,
    pub port: u16,
    pub name: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DatabaseSettings {
    pub url: String,
    pub max_connections: u32,
    pub min_connections: u32,
}

#[derive(Debug, Deserialize, Clone)]
pub struct SessionSettings {
    /// Lifetime of a login session in seconds.
    pub ttl_seconds: i64,
    /// Adds the `Secure` attribute to cookies. Enable behind TLS.
    pub secure_cookie: bool,
}

#[derive(Debug, Deserialize, Clone)]
pub struct LoggingSettings {
    /// `json` or `pretty`
    pub format: String,
    /// Directory for a daily rolling log file; stdout only when unset.
    pub directory: Option<String>,
}

/// Platform admin created at startup when no account with this email
/// exists yet. Both email and password must be set.
#[derive(Debug, Deserialize, Clone, Default)]
pub struct BootstrapSettings {
    pub admin_email: Option<String>,
    pub admin_password: Option<String>,
    pub admin_name: Option<String>,
}

impl AppConfig {
    /// Defaults, then `config/default`, then `config/{APP_ENV}`, then
    /// `ROSTER_*` environment variables (`__` separates nested keys).
    pub fn load() -> Result<Self, ConfigError> {
        let env = std::env::var("APP_ENV").unwrap_or_else(|_| "development".into());
        let config = Config::builder()
            .set_default("app.env", env.as_str())?
            .set_default("app.host", "127.0.0.1")?
            .set_default("app.port", 8080)?
            .set_default("app.name", "roster-server")?
            .set_default("database.url", "sqlite://roster.db?mode=rwc")?
            .set_default("database.max_connections", 5)?
            .set_default("database.min_connections", 1)?
            .set_default("session.ttl_seconds", DEFAULT_SESSION_TTL_SECONDS)?
            .set_default("session.secure_cookie", false)?
            .set_default("logging.format", "pretty")?
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name(&format!("config/{}", env)).required(false))
            .add_source(
                Environment::with_prefix("ROSTER")
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;
        config.try_deserialize()
    }

    pub fn is_production(&self) -> bool {
        self.app.env == "production"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_complete() {
        let config = AppConfig::load().expect("defaults should deserialize");
        assert!(!config.app.name.is_empty());
        assert!(config.database.max_connections >= config.database.min_connections);
        assert!(config.session.ttl_seconds > 0);
    }
}
