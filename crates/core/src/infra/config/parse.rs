use std::collections::HashSet;
use std::time::Duration;

use chrono_tz::Tz;
use tracing_subscriber::EnvFilter;

use super::ConfigError;
use super::raw::{RawRound, RawSource};
use crate::domain::model::{HttpMethod, RoundConfig, SourceConfig};
use crate::ports::source::FETCH_GRACE;

const ROUND_SECONDS: u32 = 60;

pub(crate) fn parse_timezone(s: &str) -> Result<Tz, ConfigError> {
    let s = s.trim();
    s.parse()
        .map_err(|_| ConfigError::Invalid(format!("invalid app.timezone '{s}'")))
}

pub(crate) fn normalize_log_level(s: &str) -> Result<String, ConfigError> {
    let level = s.trim().to_ascii_lowercase();
    if level.is_empty() {
        return Err(ConfigError::Invalid("logging.level cannot be empty".into()));
    }
    EnvFilter::try_new(&level)
        .map_err(|e| ConfigError::Invalid(format!("invalid logging.level '{level}': {e}")))?;
    Ok(level)
}

/// Checks trigger offsets and tick cadence. A tick below one second observes
/// every whole-second offset, and therefore lands inside each trigger window.
pub(crate) fn parse_round(raw: &RawRound) -> Result<RoundConfig, ConfigError> {
    let prepare = raw.prepare_offset_seconds;
    let finalize = raw.finalize_offset_seconds;

    if prepare >= ROUND_SECONDS || finalize >= ROUND_SECONDS {
        return Err(ConfigError::Invalid(format!(
            "round offsets must be below {ROUND_SECONDS}, got prepare={prepare} finalize={finalize}"
        )));
    }
    if prepare >= finalize {
        return Err(ConfigError::Invalid(format!(
            "round.prepare_offset_seconds ({prepare}) must be before round.finalize_offset_seconds ({finalize})"
        )));
    }
    if raw.tick_millis == 0 || raw.tick_millis >= 1_000 {
        return Err(ConfigError::Invalid(format!(
            "round.tick_millis must be between 1 and 999, got {}",
            raw.tick_millis
        )));
    }

    Ok(RoundConfig {
        prepare_offset_seconds: prepare,
        finalize_offset_seconds: finalize,
        tick: Duration::from_millis(raw.tick_millis),
    })
}

pub(crate) fn parse_sources(raw: Vec<RawSource>, round: &RoundConfig) -> Result<Vec<SourceConfig>, ConfigError> {
    if raw.is_empty() {
        return Err(ConfigError::Invalid("at least one [[sources]] entry is required".into()));
    }

    // Prepare can start just before the finalize offset; its slowest fetch plus
    // one more tick must still fit in the same minute.
    let max_timeout_ms = (u64::from(ROUND_SECONDS - round.finalize_offset_seconds) * 1_000)
        .saturating_sub(FETCH_GRACE.as_millis() as u64 + round.tick.as_millis() as u64);

    let mut names = HashSet::new();
    let mut out = Vec::with_capacity(raw.len());
    for s in raw {
        let name = s.name.trim().to_string();
        if name.is_empty() {
            return Err(ConfigError::Invalid("source name cannot be empty".into()));
        }
        if !names.insert(name.clone()) {
            return Err(ConfigError::Invalid(format!("duplicate source name '{name}'")));
        }

        let url = s.url.trim().to_string();
        if url.is_empty() {
            return Err(ConfigError::Invalid(format!("source '{name}' has empty url")));
        }
        if !is_pointer(&s.digit_pointer) {
            return Err(ConfigError::Invalid(format!(
                "source '{name}': digit_pointer '{}' is not a JSON pointer",
                s.digit_pointer
            )));
        }
        if s.modulo == Some(0) {
            return Err(ConfigError::Invalid(format!("source '{name}': modulo cannot be 0")));
        }
        if s.timeout_ms == 0 || s.timeout_ms > max_timeout_ms {
            return Err(ConfigError::Invalid(format!(
                "source '{name}': timeout_ms must be between 1 and {max_timeout_ms}, got {}",
                s.timeout_ms
            )));
        }
        if s.payload.is_some() && s.method != HttpMethod::Post {
            return Err(ConfigError::Invalid(format!(
                "source '{name}': payload requires method POST"
            )));
        }

        let api_key_env = s.api_key_env.map(|v| v.trim().to_string()).filter(|v| !v.is_empty());
        if api_key_env.is_some() {
            match s.api_key_pointer.as_deref() {
                Some(p) if p.starts_with('/') => {}
                _ => {
                    return Err(ConfigError::Invalid(format!(
                        "source '{name}': api_key_env requires an api_key_pointer into the payload"
                    )));
                }
            }
            if s.payload.is_none() {
                return Err(ConfigError::Invalid(format!(
                    "source '{name}': api_key_env requires a payload"
                )));
            }
        }

        out.push(SourceConfig {
            name,
            url,
            method: s.method,
            payload: s.payload,
            digit_pointer: s.digit_pointer,
            modulo: s.modulo,
            timeout: Duration::from_millis(s.timeout_ms),
            api_key_env,
            api_key_pointer: s.api_key_pointer,
        });
    }

    Ok(out)
}

fn is_pointer(p: &str) -> bool {
    p.is_empty() || p.starts_with('/')
}
