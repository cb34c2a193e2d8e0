//! # Server Configuration
//!
//! ## Sources (later wins)
//! 1. Built-in defaults (this file)
//! 2. `mostrador.toml` in the working directory, if present
//! 3. Environment variables: `MOSTRADOR_PORT`, `MOSTRADOR_STORAGE__BACKEND`,
//!    `MOSTRADOR_POLICY__STOCK`, ... (`__` separates nested keys)
//!
//! ```toml
//! host = "127.0.0.1"
//! port = 3001
//! request_timeout_secs = 30
//!
//! [storage]
//! backend = "sqlite"          # sqlite | memory
//! database_path = "./mostrador.db"
//! max_connections = 5
//!
//! [policy]
//! stock = "reject"            # reject | clamp | allow
//! closed_register = "reject"  # reject | ignore
//! ```

use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;

use config::builder::{ConfigBuilder, DefaultState};
use config::{Config, Environment, File, FileFormat};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

use mostrador_db::{DbConfig, ProcessorPolicy, StorageBackend};

const CONFIG_FILE: &str = "mostrador";
const ENV_PREFIX: &str = "MOSTRADOR";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Upper bound for one request, storage work included.
    pub request_timeout_secs: u64,
    pub storage: StorageConfig,
    #[serde(default)]
    pub policy: ProcessorPolicy,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    #[serde(default)]
    pub backend: StorageBackend,
    /// Defaults to the platform data directory.
    #[serde(default)]
    pub database_path: Option<PathBuf>,
    pub max_connections: u32,
}

impl ServerConfig {
    /// Defaults, then `mostrador.toml`, then `MOSTRADOR_*` variables.
    pub fn load() -> Result<Self, ConfigError> {
        let config = defaults()?
            .add_source(File::with_name(CONFIG_FILE).required(false))
            .add_source(
                Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("_")
                    .separator("__"),
            )
            .build()?;

        Self::finish(config)
    }

    /// Defaults overlaid with a TOML document.
    pub fn from_toml(toml: &str) -> Result<Self, ConfigError> {
        let config = defaults()?
            .add_source(File::from_str(toml, FileFormat::Toml))
            .build()?;

        Self::finish(config)
    }

    fn finish(config: Config) -> Result<Self, ConfigError> {
        let server: ServerConfig = config.try_deserialize()?;
        server.validate()?;
        Ok(server)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.request_timeout_secs == 0 {
            return Err(ConfigError::InvalidValue {
                key: "request_timeout_secs".to_string(),
                reason: "must be at least 1".to_string(),
            });
        }
        if self.storage.max_connections == 0 {
            return Err(ConfigError::InvalidValue {
                key: "storage.max_connections".to_string(),
                reason: "must be at least 1".to_string(),
            });
        }
        self.socket_addr()?;
        Ok(())
    }

    pub fn socket_addr(&self) -> Result<SocketAddr, ConfigError> {
        format!("{}:{}", self.host, self.port)
            .parse()
            .map_err(|_| ConfigError::InvalidValue {
                key: "host".to_string(),
                reason: format!("'{}' is not an IP address", self.host),
            })
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    /// Pool settings for the SQLite backend.
    pub fn db_config(&self) -> DbConfig {
        DbConfig::new(self.storage.resolved_database_path())
            .max_connections(self.storage.max_connections)
    }
}

impl StorageConfig {
    /// Configured path, else the platform data directory:
    /// - macOS: ~/Library/Application Support/com.mostrador.pos/mostrador.db
    /// - Windows: %APPDATA%/mostrador/pos/data/mostrador.db
    /// - Linux: ~/.local/share/pos/mostrador.db
    pub fn resolved_database_path(&self) -> PathBuf {
        if let Some(path) = &self.database_path {
            return path.clone();
        }

        match ProjectDirs::from("com", "mostrador", "pos") {
            Some(dirs) => dirs.data_dir().join("mostrador.db"),
            None => PathBuf::from("mostrador.db"),
        }
    }
}

fn defaults() -> Result<ConfigBuilder<DefaultState>, ConfigError> {
    Ok(Config::builder()
        .set_default("host", "127.0.0.1")?
        .set_default("port", 3001)?
        .set_default("request_timeout_secs", 30)?
        .set_default("storage.backend", StorageBackend::default().as_str())?
        .set_default("storage.max_connections", 5)?
        .set_default("policy.stock", "reject")?
        .set_default("policy.closed_register", "reject")?)
}

/// Configuration error types.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to load configuration: {0}")]
    Load(#[from] config::ConfigError),

    #[error("Invalid value for {key}: {reason}")]
    InvalidValue { key: String, reason: String },
}
