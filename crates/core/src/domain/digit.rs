//! Digits, labels and the published outcome.
use std::fmt;

use serde::{Deserialize, Serialize};

/// A single decimal digit in `0..=9`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(into = "u8")]
pub struct Digit(u8);

impl Digit {
    pub fn new(value: u8) -> Option<Self> {
        (value <= 9).then_some(Self(value))
    }

    /// Builds a digit from a wider integer, as parsed from a provider payload.
    pub fn from_i64(value: i64) -> Option<Self> {
        u8::try_from(value).ok().and_then(Self::new)
    }

    /// Reduces any index modulo 10.
    pub fn wrapping(value: usize) -> Self {
        Self((value % 10) as u8)
    }

    pub fn value(self) -> u8 {
        self.0
    }

    /// Digits 5 through 9 vote BIG, 0 through 4 vote SMALL.
    pub fn is_big(self) -> bool {
        self.0 >= 5
    }

    pub fn label(self) -> Label {
        if self.is_big() { Label::Big } else { Label::Small }
    }
}

impl From<Digit> for u8 {
    fn from(d: Digit) -> Self {
        d.0
    }
}

impl<'de> Deserialize<'de> for Digit {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let raw = u8::deserialize(deserializer)?;
        Digit::new(raw)
            .ok_or_else(|| serde::de::Error::custom(format!("digit out of range: {raw}")))
    }
}

impl fmt::Display for Digit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Label {
    Big,
    Small,
}

impl fmt::Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Label::Big => f.write_str("BIG"),
            Label::Small => f.write_str("SMALL"),
        }
    }
}

/// Published round result. Serialized untagged: a bare number for a digit,
/// `"BIG"` / `"SMALL"` for a label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Outcome {
    Digit(Digit),
    Label(Label),
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Outcome::Digit(d) => d.fmt(f),
            Outcome::Label(l) => l.fmt(f),
        }
    }
}
