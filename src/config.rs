//! Router configuration
//!
//! Loaded from `shardroute.toml`. A `.env` file next to it is read first, and
//! environment variables override file settings:
//!
//! - `SHARDROUTE_DIALECT` - SQL dialect (`mysql` or `postgresql`)
//! - `SHARDROUTE_MAX_UNITS_PER_DATA_SOURCE` - Cartesian fan-out cap

use std::path::Path;

use anyhow::Context;
use serde::{Deserialize, Serialize};
use shardroute_sql::Dialect;

/// Configuration file name
pub const CONFIG_FILE_NAME: &str = "shardroute.toml";

/// Environment variable names
pub const ENV_DIALECT: &str = "SHARDROUTE_DIALECT";
pub const ENV_MAX_UNITS: &str = "SHARDROUTE_MAX_UNITS_PER_DATA_SOURCE";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RouterConfig {
    /// Dialect deciding which pagination forms are accepted
    pub dialect: Dialect,
    pub routing: RoutingConfig,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RoutingConfig {
    /// Upper bound on table units the Cartesian merge may build per data source
    pub max_units_per_data_source: Option<usize>,
}

impl RouterConfig {
    pub fn from_toml_str(content: &str) -> anyhow::Result<Self> {
        toml::from_str(content).context("Failed to parse router configuration")
    }

    /// Load configuration from a directory, applying `.env` and environment overrides.
    pub fn load(dir: &Path) -> anyhow::Result<Self> {
        let env_path = dir.join(".env");
        if env_path.exists() {
            dotenvy::from_path(&env_path)
                .with_context(|| format!("Failed to load {}", env_path.display()))?;
        }

        let config_path = dir.join(CONFIG_FILE_NAME);
        if !config_path.exists() {
            anyhow::bail!("Configuration file not found: {}", config_path.display());
        }

        let content = std::fs::read_to_string(&config_path)
            .with_context(|| format!("Failed to read {}", config_path.display()))?;
        let mut config = Self::from_toml_str(&content)?;
        config.apply_env_overrides()?;

        tracing::debug!(
            dialect = %config.dialect,
            max_units = ?config.routing.max_units_per_data_source,
            "loaded router configuration"
        );
        Ok(config)
    }

    fn apply_env_overrides(&mut self) -> anyhow::Result<()> {
        if let Ok(dialect) = std::env::var(ENV_DIALECT) {
            if !dialect.is_empty() {
                self.dialect = dialect
                    .parse()
                    .with_context(|| format!("Invalid {}", ENV_DIALECT))?;
            }
        }

        if let Ok(max_units) = std::env::var(ENV_MAX_UNITS) {
            if !max_units.is_empty() {
                let max_units = max_units
                    .parse::<usize>()
                    .with_context(|| format!("Invalid {}", ENV_MAX_UNITS))?;
                self.routing.max_units_per_data_source = Some(max_units);
            }
        }

        Ok(())
    }

    pub fn save(&self, dir: &Path) -> anyhow::Result<()> {
        let config_path = dir.join(CONFIG_FILE_NAME);
        let content = toml::to_string_pretty(self)?;
        std::fs::write(&config_path, content)?;
        Ok(())
    }
}
