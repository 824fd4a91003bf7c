//! # Configuration Management for DaoKit
//!
//! This crate provides centralized configuration structures for all DaoKit components,
//! including the MySQL connection, the in-memory store, metrics and query defaults.
//!
//! ## TOML File Configuration
//! ```toml
//! [database]
//! host = "127.0.0.1"
//! port = 3306
//! schema = "company"
//! username = "root"
//! password = "root"
//! register_name = "mysql"
//! max_open_connections = 5
//! min_connections = 2
//! max_lifetime_seconds = 200
//!
//! [memory]
//! key_prefix = "daokit"
//!
//! [metrics]
//! namespace = ""
//! app_name = "daokit.service"
//!
//! [query]
//! default_page_size = 10
//! ```
//!
//! Load configuration:
//! ```rust,no_run
//! use config::AppConfig;
//!
//! // Load from DAOKIT_CONFIG or ./daokit.toml
//! let config = AppConfig::load()?;
//!
//! // Or load from custom path
//! let config = AppConfig::from_file("config/production.toml")?;
//! # Ok::<(), config::ConfigError>(())
//! ```

use serde::{Deserialize, Serialize};
use std::{env, path::Path};
use thiserror::Error;

const DEFAULT_CONFIG_PATH: &str = "./daokit.toml";
const CONFIG_PATH_VAR: &str = "DAOKIT_CONFIG";
const ENVIRONMENT_VAR: &str = "ENV";
const DEFAULT_ENVIRONMENT: &str = "dev";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parsing error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Environment variable error: {0}")]
    Env(#[from] env::VarError),
    #[error("Dotenvy error: {0}")]
    Dotenvy(#[from] dotenvy::Error),
    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Deployment environment name from `ENV`, `dev` when unset or empty
pub fn environment() -> String {
    match env::var(ENVIRONMENT_VAR) {
        Ok(name) if !name.is_empty() => name,
        _ => DEFAULT_ENVIRONMENT.to_string(),
    }
}

/// Complete application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    pub database: DatabaseConfig,
    #[serde(default)]
    pub memory: MemoryConfig,
    #[serde(default)]
    pub metrics: MetricsConfig,
    #[serde(default)]
    pub query: QueryConfig,
}

/// MySQL connection configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    pub host: String,
    pub port: u16,
    pub schema: String,
    pub username: String,
    pub password: String,
    pub register_name: String,
    pub max_open_connections: u32,
    /// Connections the pool keeps open even while idle
    pub min_connections: u32,
    pub max_lifetime_seconds: u64,
}

/// In-memory store configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MemoryConfig {
    pub key_prefix: String,
}

/// Metrics configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MetricsConfig {
    pub namespace: String,
    pub app_name: String,
}

/// Defaults applied by the data-access layer when assembling statements
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QueryConfig {
    pub default_page_size: i64,
}

impl AppConfig {
    /// Load configuration from TOML file specified in .env or defaults
    pub fn load() -> Result<Self, ConfigError> {
        // a missing .env file is fine, a malformed one is not
        match dotenvy::dotenv() {
            Ok(_) => {}
            Err(e) if e.not_found() => {}
            Err(e) => return Err(e.into()),
        }

        if let Ok(config_path) = env::var(CONFIG_PATH_VAR) {
            Self::from_file(&config_path)
        } else if Path::new(DEFAULT_CONFIG_PATH).exists() {
            Self::from_file(DEFAULT_CONFIG_PATH)
        } else {
            Err(ConfigError::Invalid(format!(
                "Config path must be specified in .env file as {} or in {} file",
                CONFIG_PATH_VAR, DEFAULT_CONFIG_PATH
            )))
        }
    }

    /// Load configuration from TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    /// Parse and validate configuration from TOML text
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<(), ConfigError> {
        // Database validations
        if self.database.host.is_empty() {
            return Err(ConfigError::Invalid(
                "Database host cannot be empty".to_string(),
            ));
        }
        if self.database.port == 0 {
            return Err(ConfigError::Invalid(
                "Database port cannot be zero".to_string(),
            ));
        }
        if self.database.schema.is_empty() {
            return Err(ConfigError::Invalid(
                "Database schema cannot be empty".to_string(),
            ));
        }
        if self.database.username.is_empty() {
            return Err(ConfigError::Invalid(
                "Database username cannot be empty".to_string(),
            ));
        }
        if self.database.max_open_connections == 0 {
            return Err(ConfigError::Invalid(
                "Database max_open_connections must be greater than 0".to_string(),
            ));
        }
        if self.database.min_connections > self.database.max_open_connections {
            return Err(ConfigError::Invalid(
                "Database min_connections cannot be greater than max_open_connections"
                    .to_string(),
            ));
        }

        // Memory validations
        if self.memory.key_prefix.contains(':') {
            return Err(ConfigError::Invalid(
                "Memory key_prefix cannot contain ':'".to_string(),
            ));
        }

        // Query validations
        if self.query.default_page_size <= 0 {
            return Err(ConfigError::Invalid(
                "Query default_page_size must be greater than 0".to_string(),
            ));
        }

        Ok(())
    }
}

impl DatabaseConfig {
    /// Create a new database configuration
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        host: String,
        port: u16,
        schema: String,
        username: String,
        password: String,
        register_name: String,
        max_open_connections: u32,
        min_connections: u32,
        max_lifetime_seconds: u64,
    ) -> Self {
        Self {
            host,
            port,
            schema,
            username,
            password,
            register_name,
            max_open_connections,
            min_connections,
            max_lifetime_seconds,
        }
    }

    /// Build connection string
    pub fn connection_string(&self) -> String {
        format!(
            "mysql://{}:{}@{}:{}/{}",
            self.username, self.password, self.host, self.port, self.schema
        )
    }
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 3306,
            schema: "company".to_string(),
            username: "root".to_string(),
            password: "root".to_string(),
            register_name: "mysql".to_string(),
            max_open_connections: 5,
            min_connections: 2,
            max_lifetime_seconds: 200,
        }
    }
}

impl MemoryConfig {
    pub fn new(key_prefix: String) -> Self {
        Self { key_prefix }
    }
}

impl Default for MemoryConfig {
    fn default() -> Self {
        Self {
            key_prefix: "daokit".to_string(),
        }
    }
}

impl MetricsConfig {
    pub fn new(namespace: String, app_name: String) -> Self {
        Self {
            namespace,
            app_name,
        }
    }
}

impl Default for MetricsConfig {
    fn default() -> Self {
        Self {
            namespace: String::new(),
            app_name: "daokit.service".to_string(),
        }
    }
}

impl Default for QueryConfig {
    fn default() -> Self {
        Self {
            default_page_size: 10,
        }
    }
}
