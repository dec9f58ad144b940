use std::time::Duration;

use chrono_tz::Tz;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum HttpMethod {
    Get,
    Post,
}

/// Trigger offsets within each one-minute round, plus the polling cadence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoundConfig {
    pub prepare_offset_seconds: u32,
    pub finalize_offset_seconds: u32,
    pub tick: Duration,
}

/// One HTTP JSON digit provider.
#[derive(Debug, Clone)]
pub struct SourceConfig {
    pub name: String,
    pub url: String,
    pub method: HttpMethod,
    pub payload: Option<serde_json::Value>,
    /// JSON pointer (RFC 6901) to the digit inside the response body.
    pub digit_pointer: String,
    /// Reduce the extracted integer modulo this value before the range check.
    pub modulo: Option<u32>,
    pub timeout: Duration,
    /// Environment variable holding an API key, injected at `api_key_pointer`.
    pub api_key_env: Option<String>,
    pub api_key_pointer: Option<String>,
}

#[derive(Debug, Clone)]
pub struct HttpServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub timezone: Tz,
    pub log_level: String,
    pub user_agent: String,
    pub http: HttpServerConfig,
    pub round: RoundConfig,
    /// Fixed seed for the tie-break/fallback generator; `None` seeds from the OS.
    pub rng_seed: Option<u64>,
    pub sources: Vec<SourceConfig>,
}
