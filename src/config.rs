//! Configuration management for the Seoga server

use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::env;
use std::path::PathBuf;

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Deserialize, Clone)]
pub struct StorageConfig {
    /// Catalog store (tabular, one row per book)
    pub books_path: PathBuf,
    /// Loan store (tabular, one row per loan event)
    pub loans_path: PathBuf,
    /// When set, derive each book's status from the loan log on load instead
    /// of resetting every book to available (the legacy behavior).
    #[serde(default)]
    pub reconcile_on_load: bool,
}

#[derive(Debug, Deserialize, Clone)]
pub struct LoggingConfig {
    pub level: String,
    pub format: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub storage: StorageConfig,
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Load configuration from files and environment variables
    pub fn load() -> Result<Self, ConfigError> {
        let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".into());

        let config = Config::builder()
            // Start with default configuration
            .add_source(File::with_name("config/default"))
            // Layer on the environment-specific file
            .add_source(File::with_name(&format!("config/{}", run_mode)).required(false))
            // Add environment variables (with prefix SEOGA_)
            .add_source(
                Environment::with_prefix("SEOGA")
                    .separator("_")
                    .try_parsing(true),
            )
            // Override store paths from BOOKS_FILE / LOANS_FILE env vars if present
            .set_override_option("storage.books_path", env::var("BOOKS_FILE").ok())?
            .set_override_option("storage.loans_path", env::var("LOANS_FILE").ok())?
            .build()?;

        config.try_deserialize()
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
        }
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            books_path: PathBuf::from("data/books.csv"),
            loans_path: PathBuf::from("data/loans.csv"),
            reconcile_on_load: false,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "pretty".to_string(),
        }
    }
}
