//! Voting rule that turns a round's valid digits into an outcome.
//!
//! The rule is pure: the only randomness it needs (the empty-round fallback and
//! the frequency tie-break) comes in as `rand01`, drawn by the caller from a
//! `RandomSource`, so a fixed value makes every branch reproducible.
use std::collections::BTreeMap;
use std::fmt;

use crate::domain::digit::{Digit, Label, Outcome};

/// Which branch of the voting rule produced an outcome.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DecisionRule {
    /// Exactly three valid digits, all on the same side.
    UnanimousThree,
    /// More digits on one side than the other.
    Majority,
    /// Sides tied; a single most frequent digit.
    Frequency,
    /// Sides tied and several digits share the top frequency.
    FrequencyTieBreak,
}

impl fmt::Display for DecisionRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            DecisionRule::UnanimousThree => "unanimous-three",
            DecisionRule::Majority => "majority",
            DecisionRule::Frequency => "frequency",
            DecisionRule::FrequencyTieBreak => "frequency-tie-break",
        };
        f.write_str(s)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    Decided { outcome: Outcome, rule: DecisionRule },
    /// No source produced a digit; a uniformly random digit stands in.
    Fallback(Digit),
}

impl Decision {
    pub fn outcome(&self) -> Outcome {
        match self {
            Decision::Decided { outcome, .. } => *outcome,
            Decision::Fallback(d) => Outcome::Digit(*d),
        }
    }

    pub fn is_fallback(&self) -> bool {
        matches!(self, Decision::Fallback(_))
    }
}

/// Applies the voting rule. `rand01` must lie in `[0, 1)`; values outside are
/// clamped.
pub fn decide(digits: &[Digit], rand01: f64) -> Decision {
    if digits.is_empty() {
        return Decision::Fallback(Digit::wrapping(pick_index(rand01, 10)));
    }

    let big = digits.iter().filter(|d| d.is_big()).count();
    let small = digits.len() - big;

    if digits.len() == 3 && (big == 3 || small == 3) {
        return Decision::Decided {
            outcome: Outcome::Label(digits[0].label()),
            rule: DecisionRule::UnanimousThree,
        };
    }

    if big != small {
        let label = if big > small { Label::Big } else { Label::Small };
        return Decision::Decided {
            outcome: Outcome::Label(label),
            rule: DecisionRule::Majority,
        };
    }

    let candidates = most_frequent(digits);
    if let [only] = candidates.as_slice() {
        return Decision::Decided {
            outcome: Outcome::Digit(*only),
            rule: DecisionRule::Frequency,
        };
    }

    let chosen = candidates[pick_index(rand01, candidates.len())];
    Decision::Decided {
        outcome: Outcome::Digit(chosen),
        rule: DecisionRule::FrequencyTieBreak,
    }
}

/// Digits sharing the highest occurrence count, ascending.
pub fn most_frequent(digits: &[Digit]) -> Vec<Digit> {
    let mut freq: BTreeMap<Digit, usize> = BTreeMap::new();
    for d in digits {
        *freq.entry(*d).or_insert(0) += 1;
    }
    let max = freq.values().copied().max().unwrap_or(0);
    freq.into_iter()
        .filter(|(_, n)| *n == max)
        .map(|(d, _)| d)
        .collect()
}

fn pick_index(rand01: f64, len: usize) -> usize {
    let scaled = (rand01.clamp(0.0, 1.0) * len as f64).floor() as usize;
    scaled.min(len.saturating_sub(1))
}
