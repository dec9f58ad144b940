use serde::Deserialize;

use super::defaults::{
    default_finalize_offset, default_http_host, default_http_port, default_log_level,
    default_method, default_prepare_offset, default_source_timeout_ms, default_tick_millis,
    default_timezone, default_user_agent,
};
use crate::domain::model::HttpMethod;

#[derive(Debug, Deserialize)]
pub(crate) struct RawAppFile {
    #[serde(default)]
    pub app: RawApp,
    #[serde(default)]
    pub http: RawHttp,
    #[serde(default)]
    pub logging: RawLogging,
    #[serde(default)]
    pub requests: RawRequests,
    #[serde(default)]
    pub round: RawRound,
    #[serde(default)]
    pub sources: Vec<RawSource>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct RawApp {
    #[serde(default = "default_timezone")]
    pub timezone: String,
}

#[derive(Debug, Deserialize)]
pub(crate) struct RawHttp {
    #[serde(default = "default_http_host")]
    pub host: String,
    #[serde(default = "default_http_port")]
    pub port: u16,
}

#[derive(Debug, Deserialize)]
pub(crate) struct RawLogging {
    #[serde(default = "default_log_level")]
    pub level: String,
}

#[derive(Debug, Deserialize)]
pub(crate) struct RawRequests {
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

#[derive(Debug, Deserialize)]
pub(crate) struct RawRound {
    #[serde(default = "default_prepare_offset")]
    pub prepare_offset_seconds: u32,
    #[serde(default = "default_finalize_offset")]
    pub finalize_offset_seconds: u32,
    #[serde(default = "default_tick_millis")]
    pub tick_millis: u64,
    #[serde(default)]
    pub rng_seed: Option<u64>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct RawSource {
    pub name: String,
    pub url: String,
    #[serde(default = "default_method")]
    pub method: HttpMethod,
    #[serde(default)]
    pub payload: Option<serde_json::Value>,
    pub digit_pointer: String,
    #[serde(default)]
    pub modulo: Option<u32>,
    #[serde(default = "default_source_timeout_ms")]
    pub timeout_ms: u64,
    #[serde(default)]
    pub api_key_env: Option<String>,
    #[serde(default)]
    pub api_key_pointer: Option<String>,
}

impl Default for RawApp {
    fn default() -> Self {
        Self {
            timezone: default_timezone(),
        }
    }
}

impl Default for RawHttp {
    fn default() -> Self {
        Self {
            host: default_http_host(),
            port: default_http_port(),
        }
    }
}

impl Default for RawLogging {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

impl Default for RawRequests {
    fn default() -> Self {
        Self {
            user_agent: default_user_agent(),
        }
    }
}

impl Default for RawRound {
    fn default() -> Self {
        Self {
            prepare_offset_seconds: default_prepare_offset(),
            finalize_offset_seconds: default_finalize_offset(),
            tick_millis: default_tick_millis(),
            rng_seed: None,
        }
    }
}
