//! Server configuration loading.
//!
//! Configuration comes from a TOML file (`medlink.toml` by default) with
//! environment overrides for secrets: `MEDLINK_JWT_SECRET` replaces the token
//! signing secret and `DATABASE_URL` replaces the database URL, so neither
//! has to live in the file.

use std::path::Path;

use serde::{Deserialize, Serialize};

use medlink_auth::AuthConfig;

/// Root server configuration.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Listener settings.
    pub server: ListenConfig,

    /// Database settings. When no URL is configured the server falls back to
    /// the in-memory backend (development only: state dies with the process).
    pub database: DatabaseConfig,

    /// Logging settings.
    pub logging: LoggingConfig,

    /// Auth module configuration.
    pub auth: AuthConfig,
}

/// Listener settings.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ListenConfig {
    /// Bind address.
    pub host: String,

    /// Bind port.
    pub port: u16,

    /// Origins allowed to send credentialed cross-origin requests.
    pub client_urls: Vec<String>,
}

impl Default for ListenConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 3000,
            client_urls: Vec::new(),
        }
    }
}

/// Database settings.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct DatabaseConfig {
    /// PostgreSQL connection URL.
    pub url: Option<String>,
}

/// Logging settings.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level filter (overridden by `RUST_LOG` when set).
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

/// Errors that can occur while loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigLoadError {
    /// The configuration file could not be read.
    #[error("failed to read config file {path}: {source}")]
    Io {
        /// Path that failed to load.
        path: String,
        /// Underlying IO error.
        source: std::io::Error,
    },

    /// The configuration file could not be parsed.
    #[error("failed to parse config file {path}: {source}")]
    Parse {
        /// Path that failed to parse.
        path: String,
        /// Underlying TOML error.
        source: toml::de::Error,
    },
}

/// Loads configuration from the given path and applies env overrides.
///
/// A missing file at the default path yields the default configuration; a
/// missing file at an explicitly requested path is an error.
///
/// # Errors
///
/// Returns a `ConfigLoadError` for unreadable or unparseable files.
pub fn load_config(path: &str, explicit: bool) -> Result<ServerConfig, ConfigLoadError> {
    let mut config = if Path::new(path).exists() {
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigLoadError::Io {
            path: path.to_string(),
            source,
        })?;
        toml::from_str(&contents).map_err(|source| ConfigLoadError::Parse {
            path: path.to_string(),
            source,
        })?
    } else if explicit {
        return Err(ConfigLoadError::Io {
            path: path.to_string(),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "config file not found"),
        });
    } else {
        ServerConfig::default()
    };

    if let Ok(secret) = std::env::var("MEDLINK_JWT_SECRET") {
        config.auth.token.secret = secret;
    }
    if let Ok(url) = std::env::var("DATABASE_URL") {
        config.database.url = Some(url);
    }

    Ok(config)
}
