//! Application configuration management.
//!
//! This module handles loading and merging configuration from multiple sources
//! with a clear precedence order. Configuration can come from default values,
//! configuration files, and environment variables.

use crate::Cli;
use feed_axum::config::AxumConfig;
use feed_sqlite::config::SqliteConfig;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// The main application configuration that composes all component configs
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct AppConfig {
    /// The merchant this feed belongs to, reported by health and discovery
    #[serde(default)]
    pub merchant_id: String,

    /// Web server configuration
    #[serde(default)]
    pub server: AxumConfig,

    /// Which backend holds the catalog
    #[serde(default)]
    pub storage: StorageConfig,
}

/// The storage backend, selected by its `backend` key.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize, Default)]
#[serde(tag = "backend", rename_all = "lowercase")]
pub enum StorageConfig {
    /// A process-local catalog that is lost on exit
    #[default]
    Memory,
    /// A JSON document on disk, rewritten after every change
    File {
        /// Location of the document
        #[serde(default = "default_file_path")]
        path: PathBuf,
    },
    /// A SQLite table
    Sqlite(SqliteConfig),
}

fn default_file_path() -> PathBuf {
    PathBuf::from("data/products.json")
}

impl AppConfig {
    /// Load configuration from multiple sources with precedence:
    /// 1. Environment variables (highest priority)
    /// 2. Config file given by the CLI
    /// 3. Default values (lowest priority)
    ///
    /// Environment variables are mapped using the pattern:
    /// `APP_<SECTION>__<KEY>` maps to `<section>.<key>`
    ///
    /// # Examples
    ///
    /// ```bash
    /// export APP_MERCHANT_ID="merchant-42"
    /// export APP_SERVER__BIND_ADDRESS="0.0.0.0:3000"
    /// export APP_STORAGE__BACKEND="sqlite"
    /// export APP_STORAGE__DATABASE_PATH="/data/products.db"
    /// ```
    pub fn load(cli: &Cli) -> anyhow::Result<Self> {
        let mut config = config::Config::builder();

        // Start with default values
        config = config.add_source(config::Config::try_from(&Self::default())?);

        // Layer on config file if it is specified and exists
        if let Some(path) = &cli.config {
            if path.exists() {
                config = config.add_source(config::File::from(path.as_path()))
            } else {
                return Err(anyhow::anyhow!(
                    "Config file {} does not exist",
                    path.display()
                ));
            }
        }

        // This maps APP_STORAGE__BACKEND to storage.backend
        config = config.add_source(
            config::Environment::with_prefix("APP")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        );

        let built_config = config.build()?;
        built_config.try_deserialize().map_err(Into::into)
    }
}
