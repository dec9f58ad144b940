use serde::Serialize;

use crate::domain::digit::Digit;
use crate::domain::round::RoundKey;

/// A source's contribution to one round: a digit, or `None` when the source
/// failed, timed out, or returned something unusable.
pub type SourceReading = Option<Digit>;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NamedReading {
    pub source: String,
    pub reading: SourceReading,
}

/// Frozen per-source readings for one round. Every configured source has an
/// entry, in configuration order, absent ones included.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Snapshot {
    pub key: RoundKey,
    pub readings: Vec<NamedReading>,
}

impl Snapshot {
    pub fn new(key: RoundKey, readings: Vec<NamedReading>) -> Self {
        Self { key, readings }
    }

    pub fn all_absent<I, S>(key: RoundKey, sources: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let readings = sources
            .into_iter()
            .map(|s| NamedReading {
                source: s.into(),
                reading: None,
            })
            .collect();
        Self { key, readings }
    }

    pub fn valid_digits(&self) -> Vec<Digit> {
        self.readings.iter().filter_map(|r| r.reading).collect()
    }

    pub fn valid_count(&self) -> usize {
        self.readings.iter().filter(|r| r.reading.is_some()).count()
    }
}
