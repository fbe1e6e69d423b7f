//! Configuration file
//!
//! JSON, every field optional. A missing file means all defaults.

use std::collections::HashSet;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use super::errors::{CliError, CliResult};
use crate::http_server::HttpServerConfig;
use crate::store::{default_seed_users, SeedUser};

/// Configuration file structure
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// SQLite database file, or ":memory:"
    #[serde(default = "default_database_path")]
    pub database_path: String,

    /// HTTP listener settings
    #[serde(default)]
    pub server: HttpServerConfig,

    /// Users inserted by `seed` and `serve --seed`
    #[serde(default = "default_seed_users")]
    pub seed_users: Vec<SeedUser>,
}

fn default_database_path() -> String {
    "./microblog.db".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            database_path: default_database_path(),
            server: HttpServerConfig::default(),
            seed_users: default_seed_users(),
        }
    }
}

impl Config {
    /// Load configuration from file, or defaults if it does not exist
    pub fn load(path: &Path) -> CliResult<Self> {
        if !path.exists() {
            tracing::info!(path = %path.display(), "config file not found, using defaults");
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path)
            .map_err(|e| CliError::config_error(format!("Failed to read config: {}", e)))?;

        let config: Config = serde_json::from_str(&content)
            .map_err(|e| CliError::config_error(format!("Invalid config JSON: {}", e)))?;

        config.validate()?;

        Ok(config)
    }

    /// Validate configuration
    pub fn validate(&self) -> CliResult<()> {
        if self.database_path.trim().is_empty() {
            return Err(CliError::config_error("database_path must not be empty"));
        }

        if self.server.port == 0 {
            return Err(CliError::config_error("server.port must be > 0"));
        }

        let mut ids = HashSet::new();
        let mut names = HashSet::new();
        let mut keys = HashSet::new();
        for user in &self.seed_users {
            if user.name.is_empty() || user.api_key.is_empty() {
                return Err(CliError::config_error(format!(
                    "Seed user {} needs a name and an api_key",
                    user.id
                )));
            }
            if !ids.insert(user.id) {
                return Err(CliError::config_error(format!("Duplicate seed user id: {}", user.id)));
            }
            if !names.insert(user.name.as_str()) {
                return Err(CliError::config_error(format!(
                    "Duplicate seed user name: {}",
                    user.name
                )));
            }
            if !keys.insert(user.api_key.as_str()) {
                return Err(CliError::config_error("Duplicate seed user api_key"));
            }
        }

        Ok(())
    }
}
