//! Capability every digit provider implements.
use std::time::Duration;

use thiserror::Error;
use tracing::{debug, warn};

use crate::domain::digit::Digit;
use crate::domain::snapshot::SourceReading;

/// Slack on top of a source's own deadline before its task is abandoned.
pub const FETCH_GRACE: Duration = Duration::from_millis(250);

#[derive(Debug, Error)]
pub enum SourceError {
    #[error("deadline of {0:?} exceeded")]
    Timeout(Duration),
    #[error("transport: {0}")]
    Transport(String),
    #[error("unexpected HTTP status {0}")]
    Status(u16),
    #[error("malformed response: {0}")]
    Parse(String),
    #[error("no value at '{0}'")]
    MissingField(String),
    #[error("value is not an integer: {0}")]
    NotANumber(String),
    #[error("value {0} is outside 0..=9")]
    OutOfRange(i64),
    #[error("disabled: {0}")]
    Disabled(String),
}

#[async_trait::async_trait]
pub trait EntropySource: Send + Sync {
    fn name(&self) -> &str;

    /// Upper bound for a single `fetch` call.
    fn timeout(&self) -> Duration;

    async fn fetch_digit(&self) -> Result<Digit, SourceError>;

    /// Fetches one digit within `timeout()`. Every failure, including an
    /// exceeded deadline, collapses to an absent reading.
    async fn fetch(&self) -> SourceReading {
        let deadline = self.timeout();
        let result = match tokio::time::timeout(deadline, self.fetch_digit()).await {
            Ok(r) => r,
            Err(_) => Err(SourceError::Timeout(deadline)),
        };
        match result {
            Ok(d) => {
                debug!(source = self.name(), digit = %d, "Source reading");
                Some(d)
            }
            Err(SourceError::Disabled(reason)) => {
                debug!(source = self.name(), reason = %reason, "Source disabled");
                None
            }
            Err(e) => {
                warn!(source = self.name(), error = %e, "Source failed, reading absent");
                None
            }
        }
    }
}
