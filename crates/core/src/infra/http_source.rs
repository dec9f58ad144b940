//! Reqwest-backed digit provider implementing the `EntropySource` port.
//!
//! One configurable adapter covers every JSON provider: it issues a GET or a
//! POST with a JSON payload, parses the body as JSON, and pulls the digit out of
//! a JSON pointer. Providers that return wider integers (e.g. uint8) are reduced
//! with `modulo`.
use std::time::Duration;

use serde_json::Value;
use tracing::{debug, warn};

use crate::domain::digit::Digit;
use crate::domain::model::{HttpMethod, SourceConfig};
use crate::ports::source::{EntropySource, SourceError};

const RAW_BODY_LOG_CHARS: usize = 200;

pub struct HttpJsonSource {
    client: reqwest::Client,
    name: String,
    url: String,
    method: HttpMethod,
    payload: Option<Value>,
    digit_pointer: String,
    modulo: Option<u32>,
    timeout: Duration,
    disabled: Option<String>,
}

impl HttpJsonSource {
    /// Builds the adapter, resolving `api_key_env` from the process environment.
    pub fn new(client: reqwest::Client, cfg: &SourceConfig) -> Self {
        let api_key = cfg
            .api_key_env
            .as_deref()
            .and_then(|var| std::env::var(var).ok());
        Self::with_api_key(client, cfg, api_key)
    }

    /// Builds the adapter with an explicit key. A source that names an
    /// `api_key_env` but receives no usable key stays disabled: every fetch
    /// yields an absent reading without touching the network.
    pub fn with_api_key(client: reqwest::Client, cfg: &SourceConfig, api_key: Option<String>) -> Self {
        let mut payload = cfg.payload.clone();
        let mut disabled = None;

        if let Some(var) = cfg.api_key_env.as_deref() {
            match api_key.filter(|k| !k.trim().is_empty()) {
                None => {
                    warn!(source = %cfg.name, env = var, "API key not set, source disabled");
                    disabled = Some(format!("{var} is not set"));
                }
                Some(key) => {
                    let pointer = cfg.api_key_pointer.as_deref().unwrap_or_default();
                    if let Err(reason) = inject_at_pointer(&mut payload, pointer, Value::String(key)) {
                        warn!(source = %cfg.name, error = %reason, "Cannot place API key, source disabled");
                        disabled = Some(reason);
                    }
                }
            }
        }

        Self {
            client,
            name: cfg.name.clone(),
            url: cfg.url.clone(),
            method: cfg.method,
            payload,
            digit_pointer: cfg.digit_pointer.clone(),
            modulo: cfg.modulo,
            timeout: cfg.timeout,
            disabled,
        }
    }

    pub fn is_disabled(&self) -> bool {
        self.disabled.is_some()
    }

    fn classify_error(&self, e: &reqwest::Error) -> SourceError {
        if e.is_timeout() {
            SourceError::Timeout(self.timeout)
        } else {
            SourceError::Transport(e.to_string())
        }
    }
}

#[async_trait::async_trait]
impl EntropySource for HttpJsonSource {
    fn name(&self) -> &str {
        &self.name
    }

    fn timeout(&self) -> Duration {
        self.timeout
    }

    async fn fetch_digit(&self) -> Result<Digit, SourceError> {
        if let Some(reason) = &self.disabled {
            return Err(SourceError::Disabled(reason.clone()));
        }

        let request = match self.method {
            HttpMethod::Get => self.client.get(&self.url),
            HttpMethod::Post => {
                let r = self.client.post(&self.url);
                match &self.payload {
                    Some(p) => r.json(p),
                    None => r,
                }
            }
        };

        debug!(source = %self.name, url = %self.url, method = ?self.method, "Source request start");
        let resp = request
            .timeout(self.timeout)
            .send()
            .await
            .map_err(|e| self.classify_error(&e))?;

        let status = resp.status();
        if !status.is_success() {
            return Err(SourceError::Status(status.as_u16()));
        }

        let body = resp.text().await.map_err(|e| self.classify_error(&e))?;
        let value: Value = serde_json::from_str(&body).map_err(|e| {
            let raw: String = body.chars().take(RAW_BODY_LOG_CHARS).collect();
            warn!(source = %self.name, raw = %raw, "Response body is not JSON");
            SourceError::Parse(e.to_string())
        })?;

        extract_digit(&value, &self.digit_pointer, self.modulo)
    }
}

/// Pulls a digit out of `value` at `pointer`. Accepts integral numbers and
/// numeric strings; `modulo` is applied before the range check.
pub fn extract_digit(value: &Value, pointer: &str, modulo: Option<u32>) -> Result<Digit, SourceError> {
    let raw = value
        .pointer(pointer)
        .ok_or_else(|| SourceError::MissingField(pointer.to_string()))?;
    let n = as_integer(raw).ok_or_else(|| SourceError::NotANumber(raw.to_string()))?;
    let n = match modulo {
        Some(m) if m > 0 => n.rem_euclid(i64::from(m)),
        _ => n,
    };
    Digit::from_i64(n).ok_or(SourceError::OutOfRange(n))
}

fn as_integer(v: &Value) -> Option<i64> {
    match v {
        Value::Number(n) => n.as_i64().or_else(|| n.as_f64().and_then(integral)),
        Value::String(s) => {
            let s = s.trim();
            s.parse::<i64>()
                .ok()
                .or_else(|| s.parse::<f64>().ok().and_then(integral))
        }
        _ => None,
    }
}

fn integral(f: f64) -> Option<i64> {
    (f.is_finite() && f.fract() == 0.0 && f.abs() < i64::MAX as f64).then_some(f as i64)
}

fn inject_at_pointer(payload: &mut Option<Value>, pointer: &str, value: Value) -> Result<(), String> {
    let slot = payload
        .as_mut()
        .and_then(|p| p.pointer_mut(pointer))
        .ok_or_else(|| format!("payload has no field at '{pointer}' for the API key"))?;
    *slot = value;
    Ok(())
}
