//! Configuration loading
//!
//! Precedence (highest first): command-line flags, environment variables
//! (including values pulled in from `.env` files), `~/.petstore/config.toml`,
//! built-in defaults.
//!
//! ```toml
//! [server]
//! bind = "127.0.0.1:3030"
//! cors_permissive = false
//!
//! [database]
//! url = "sqlite://petstore.db"
//! max_connections = 5
//! schema = "schema.sql"
//! ```

use std::net::SocketAddr;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Args;
use serde::{Deserialize, Serialize};

use petstore_server::db::pool::DEFAULT_MAX_CONNECTIONS;
use petstore_server::db::{create_pool_with_options, load_script, SqlitePool};

/// Database used when nothing else is configured
pub const DEFAULT_DATABASE_URL: &str = "sqlite://petstore.db";

/// Load environment variables from .env files
///
/// Priority order (highest to lowest):
/// 1. Environment variables already set
/// 2. Current directory .env
/// 3. ~/.petstore/.env
///
/// dotenvy never overwrites a variable that is already set, so loading the
/// current directory first gives it priority over the home file.
///
/// Returns the files that were read. Called before tracing is up, so the
/// caller does the logging.
pub fn load_dotenv() -> Vec<PathBuf> {
    let mut loaded_from = Vec::new();

    if let Ok(path) = dotenvy::dotenv() {
        loaded_from.push(path);
    }

    if let Some(env_file) = config_dir().map(|dir| dir.join(".env")) {
        if env_file.exists() && dotenvy::from_path(&env_file).is_ok() {
            loaded_from.push(env_file);
        }
    }

    loaded_from
}

/// Get the petstore config directory path (~/.petstore)
pub fn config_dir() -> Option<PathBuf> {
    dirs::home_dir().map(|home| home.join(".petstore"))
}

/// TOML configuration file
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct PetstoreConfig {
    #[serde(default)]
    pub server: ServerSection,

    #[serde(default)]
    pub database: DatabaseSection,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ServerSection {
    /// Address to bind the HTTP listener to
    #[serde(default)]
    pub bind: Option<SocketAddr>,

    /// Allow any CORS origin
    #[serde(default)]
    pub cors_permissive: Option<bool>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct DatabaseSection {
    /// sqlx SQLite URL
    #[serde(default)]
    pub url: Option<String>,

    #[serde(default)]
    pub max_connections: Option<u32>,

    /// Schema script run at startup; relative paths resolve against the
    /// working directory
    #[serde(default)]
    pub schema: Option<PathBuf>,
}

impl PetstoreConfig {
    /// Default config file location (~/.petstore/config.toml)
    pub fn config_path() -> Option<PathBuf> {
        config_dir().map(|dir| dir.join("config.toml"))
    }

    /// Load configuration.
    ///
    /// An explicit path must exist. The default path is optional: when it is
    /// absent the built-in defaults apply.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        let path = match explicit {
            Some(path) => path.to_path_buf(),
            None => match Self::config_path() {
                Some(path) if path.exists() => path,
                _ => {
                    tracing::debug!("No config file found, using defaults");
                    return Ok(Self::default());
                }
            },
        };

        let content = std::fs::read_to_string(&path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        let config = Self::from_toml_str(&content)
            .with_context(|| format!("Failed to parse config file {}", path.display()))?;

        tracing::info!("Loaded configuration from {}", path.display());
        Ok(config)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }
}

/// Database flags shared by every command that opens the database
#[derive(Args, Debug, Clone, Default)]
pub struct DatabaseArgs {
    /// Database URL (overrides config file)
    #[arg(long, env = "DATABASE_URL")]
    pub database_url: Option<String>,

    /// Maximum pooled connections
    #[arg(long, env = "PETSTORE_MAX_CONNECTIONS")]
    pub max_connections: Option<u32>,

    /// Schema script to run at startup (default: built-in pets table)
    #[arg(long, env = "PETSTORE_SCHEMA", value_name = "PATH")]
    pub schema: Option<PathBuf>,
}

/// Fully resolved database settings
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DatabaseSettings {
    pub url: String,
    pub max_connections: u32,
    pub schema: Option<PathBuf>,
}

impl DatabaseArgs {
    /// Fill anything not given on the command line from the config file.
    pub fn resolve(self, config: &PetstoreConfig) -> DatabaseSettings {
        let section = &config.database;
        DatabaseSettings {
            url: self
                .database_url
                .or_else(|| section.url.clone())
                .unwrap_or_else(|| DEFAULT_DATABASE_URL.to_string()),
            max_connections: self
                .max_connections
                .or(section.max_connections)
                .unwrap_or(DEFAULT_MAX_CONNECTIONS),
            schema: self.schema.or_else(|| section.schema.clone()),
        }
    }
}

impl DatabaseSettings {
    /// Read the configured schema script, or the built-in one.
    pub fn schema_script(&self) -> Result<String> {
        load_script(self.schema.as_deref()).with_context(|| match &self.schema {
            Some(path) => format!("Failed to read schema script {}", path.display()),
            None => "Failed to load built-in schema".to_string(),
        })
    }

    /// Open the connection pool.
    pub async fn connect(&self) -> Result<SqlitePool> {
        create_pool_with_options(&self.url, self.max_connections)
            .await
            .with_context(|| format!("Failed to open database {}", self.url))
    }
}
