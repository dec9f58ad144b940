#![allow(dead_code)]

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::time::Duration;

use chrono::{DateTime, TimeZone, Utc};
use roundvote_core::app::context::AppContext;
use roundvote_core::domain::digit::Digit;
use roundvote_core::domain::model::RoundConfig;
use roundvote_core::ports::clock::Clock;
use roundvote_core::ports::random::RandomSource;
use roundvote_core::ports::source::{EntropySource, SourceError};
use tokio::sync::Mutex;

pub fn at(minute: u32, second: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 3, 5, 7, minute, second)
        .single()
        .expect("valid timestamp")
}

pub fn round_config() -> RoundConfig {
    RoundConfig {
        prepare_offset_seconds: 25,
        finalize_offset_seconds: 30,
        tick: Duration::from_millis(800),
    }
}

pub fn digit(n: u8) -> Digit {
    Digit::new(n).expect("digit in range")
}

pub struct FixedRng(pub f64);

#[async_trait::async_trait]
impl RandomSource for FixedRng {
    async fn next_f64(&self) -> f64 {
        self.0
    }
}

/// Panics on its first draw, then behaves like `FixedRng`.
pub struct FlakyRng {
    value: f64,
    tripped: AtomicBool,
}

impl FlakyRng {
    pub fn new(value: f64) -> Self {
        Self {
            value,
            tripped: AtomicBool::new(false),
        }
    }
}

#[async_trait::async_trait]
impl RandomSource for FlakyRng {
    async fn next_f64(&self) -> f64 {
        if !self.tripped.swap(true, Ordering::SeqCst) {
            panic!("rng unavailable");
        }
        self.value
    }
}

pub struct ManualClock(pub Mutex<DateTime<Utc>>);

impl ManualClock {
    pub fn new(t: DateTime<Utc>) -> Self {
        Self(Mutex::new(t))
    }
}

#[async_trait::async_trait]
impl Clock for ManualClock {
    async fn now(&self) -> DateTime<Utc> {
        *self.0.lock().await
    }
}

#[derive(Clone, Copy)]
pub enum Behavior {
    Digit(u8),
    Fail,
    Sleep(Duration, u8),
    Panic,
}

/// Scripted source: each call pops the next behavior (the last one repeats)
/// and counts invocations.
pub struct ScriptedSource {
    name: String,
    timeout: Duration,
    script: std::sync::Mutex<Vec<Behavior>>,
    pub calls: AtomicUsize,
    name_calls: AtomicUsize,
    name_limit: Option<usize>,
}

impl ScriptedSource {
    pub fn new(name: &str, script: Vec<Behavior>) -> Arc<Self> {
        Arc::new(Self::build(name, script, None))
    }

    /// A source whose `name()` panics on every call after the first.
    pub fn with_broken_name(name: &str, script: Vec<Behavior>) -> Arc<Self> {
        Arc::new(Self::build(name, script, Some(1)))
    }

    fn build(name: &str, script: Vec<Behavior>, name_limit: Option<usize>) -> Self {
        Self {
            name: name.to_string(),
            timeout: Duration::from_secs(5),
            script: std::sync::Mutex::new(script),
            calls: AtomicUsize::new(0),
            name_calls: AtomicUsize::new(0),
            name_limit,
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    fn next(&self) -> Behavior {
        let mut script = self.script.lock().expect("script lock");
        if script.len() > 1 { script.remove(0) } else { script[0] }
    }
}

#[async_trait::async_trait]
impl EntropySource for ScriptedSource {
    fn name(&self) -> &str {
        let seen = self.name_calls.fetch_add(1, Ordering::SeqCst);
        if self.name_limit.is_some_and(|limit| seen >= limit) {
            panic!("name lookup failed for {}", self.name);
        }
        &self.name
    }

    fn timeout(&self) -> Duration {
        self.timeout
    }

    async fn fetch_digit(&self) -> Result<Digit, SourceError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match self.next() {
            Behavior::Digit(n) => Ok(digit(n)),
            Behavior::Fail => Err(SourceError::Transport("connection refused".into())),
            Behavior::Sleep(d, n) => {
                tokio::time::sleep(d).await;
                Ok(digit(n))
            }
            Behavior::Panic => panic!("source blew up"),
        }
    }
}

pub fn context(
    sources: &[Arc<ScriptedSource>],
    rand01: f64,
) -> AppContext<ManualClock, FixedRng> {
    context_with_rng(sources, FixedRng(rand01))
}

pub fn context_with_rng<G: RandomSource>(
    sources: &[Arc<ScriptedSource>],
    rng: G,
) -> AppContext<ManualClock, G> {
    let sources = sources
        .iter()
        .map(|s| Arc::clone(s) as Arc<dyn EntropySource>)
        .collect();
    AppContext::new(
        round_config(),
        chrono_tz::UTC,
        ManualClock::new(at(0, 0)),
        rng,
        sources,
    )
}
