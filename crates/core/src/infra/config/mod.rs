//! Loads the TOML configuration file and normalizes it into `AppConfig`.
//!
//! The raw file is first validated against `schemas/config.schema.json` next
//! to it, then deserialized and checked for cross-field constraints (trigger
//! ordering, tick cadence, per-source deadlines).
mod defaults;
mod parse;
mod raw;
mod schema;

use std::path::Path;

use tokio::fs;

use crate::domain::model::{AppConfig, HttpServerConfig};
use parse::{normalize_log_level, parse_round, parse_sources, parse_timezone};
use raw::RawAppFile;
use schema::check_against_schema;

pub const SCHEMA_FILE: &str = "config.schema.json";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("io: {0}")]
    Io(#[from] std::io::Error),
    #[error("toml: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("invalid config: {0}")]
    Invalid(String),
}

pub struct ConfigLoader;

impl ConfigLoader {
    pub async fn load(config_path: &Path) -> Result<AppConfig, ConfigError> {
        let base_dir = config_path
            .parent()
            .ok_or_else(|| ConfigError::Invalid("config path has no parent".into()))?;
        let schema_path = base_dir.join("schemas").join(SCHEMA_FILE);

        let content = fs::read_to_string(config_path).await?;
        check_against_schema(&schema_path, &content, &config_path.display().to_string()).await?;

        Self::parse(&content)
    }

    /// Deserializes and normalizes config text without the schema pass.
    pub fn parse(content: &str) -> Result<AppConfig, ConfigError> {
        let raw: RawAppFile = toml::from_str(content)?;

        let timezone = parse_timezone(&raw.app.timezone)?;
        let log_level = normalize_log_level(&raw.logging.level)?;
        let round = parse_round(&raw.round)?;
        let sources = parse_sources(raw.sources, &round)?;

        let user_agent = raw.requests.user_agent.trim().to_string();
        if user_agent.is_empty() {
            return Err(ConfigError::Invalid("requests.user_agent cannot be empty".into()));
        }

        Ok(AppConfig {
            timezone,
            log_level,
            user_agent,
            http: HttpServerConfig {
                host: raw.http.host,
                port: raw.http.port,
            },
            round,
            rng_seed: raw.round.rng_seed,
            sources,
        })
    }
}
