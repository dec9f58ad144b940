//! Round keys and the wall-clock trigger logic.
use std::fmt;

use chrono::{DateTime, Timelike, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::model::RoundConfig;

/// Minute-granularity round identifier, `YYYY-MM-DD HH:MM` in UTC.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RoundKey(String);

impl RoundKey {
    pub fn from_time(now: DateTime<Utc>) -> Self {
        Self(now.format("%Y-%m-%d %H:%M").to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RoundKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Whole seconds elapsed within the current round (the UTC minute).
pub fn round_offset_seconds(now: DateTime<Utc>) -> u32 {
    now.second()
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RoundAction {
    Prepare(RoundKey),
    Finalize,
}

/// Maps a wall-clock instant to the action that is due, if any.
///
/// Prepare is due for the whole window `[prepare_offset, finalize_offset)` and
/// finalize from `finalize_offset` to the end of the round. Both actions are
/// idempotent, so every tick inside a window may fire; the windows only guarantee
/// that a late tick or a prepare that overruns the finalize second still lands.
/// The tick period must stay below the gap between the offsets.
#[derive(Debug, Clone, Copy)]
pub struct RoundClock {
    prepare_offset: u32,
    finalize_offset: u32,
}

impl RoundClock {
    pub fn new(cfg: &RoundConfig) -> Self {
        Self {
            prepare_offset: cfg.prepare_offset_seconds,
            finalize_offset: cfg.finalize_offset_seconds,
        }
    }

    pub fn due(&self, now: DateTime<Utc>) -> Option<RoundAction> {
        let offset = round_offset_seconds(now);
        if offset >= self.finalize_offset {
            Some(RoundAction::Finalize)
        } else if offset >= self.prepare_offset {
            Some(RoundAction::Prepare(RoundKey::from_time(now)))
        } else {
            None
        }
    }
}
