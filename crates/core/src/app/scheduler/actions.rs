use std::time::Instant;

use chrono::{DateTime, Utc};
use tracing::{debug, info, warn};

use super::aggregate::collect_snapshot;
use crate::app::context::AppContext;
use crate::domain::decision::{Decision, decide};
use crate::domain::round::RoundKey;
use crate::domain::snapshot::Snapshot;
use crate::infra::time::format_round_time;
use crate::ports::clock::Clock;
use crate::ports::random::RandomSource;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PrepareOutcome {
    /// The round already has a snapshot (or had one and was finalized).
    AlreadyPrepared(RoundKey),
    Prepared(Snapshot),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FinalizeOutcome {
    NoSnapshot,
    Finalized { key: RoundKey, decision: Decision },
}

/// Freezes a snapshot for the round containing `now`, at most once per round.
///
/// Never fails: sources that error or time out are recorded as absent, so the
/// round is always marked prepared once this returns.
pub async fn prepare<C, G>(ctx: &AppContext<C, G>, now: DateTime<Utc>) -> PrepareOutcome
where
    C: Clock,
    G: RandomSource,
{
    let key = RoundKey::from_time(now);
    if ctx.store.is_prepared(&key).await {
        debug!(round = %key, "Round already prepared");
        return PrepareOutcome::AlreadyPrepared(key);
    }

    if let Some(stale) = ctx.store.current_snapshot().await {
        warn!(round = %key, stale_round = %stale.key, "Replacing a snapshot that was never finalized");
    }

    let started = Instant::now();
    let snapshot = collect_snapshot(&ctx.sources, key.clone()).await;

    if !ctx.store.install_snapshot(snapshot.clone()).await {
        return PrepareOutcome::AlreadyPrepared(key);
    }

    info!(
        round = %key,
        local_time = %format_round_time(now, &ctx.timezone),
        valid = snapshot.valid_count(),
        sources = snapshot.readings.len(),
        readings = ?snapshot.readings,
        elapsed_ms = started.elapsed().as_millis() as u64,
        "Prepared snapshot"
    );
    PrepareOutcome::Prepared(snapshot)
}

/// Consumes the current snapshot and publishes its outcome. A no-op when no
/// snapshot is present, which makes repeated calls harmless.
pub async fn finalize<C, G>(ctx: &AppContext<C, G>) -> FinalizeOutcome
where
    C: Clock,
    G: RandomSource,
{
    let Some(snapshot) = ctx.store.current_snapshot().await else {
        return FinalizeOutcome::NoSnapshot;
    };

    let digits = snapshot.valid_digits();
    let rand01 = ctx.rng.next_f64().await;
    let decision = decide(&digits, rand01);
    ctx.store.publish(decision.outcome()).await;

    match decision {
        Decision::Fallback(d) => {
            warn!(round = %snapshot.key, digit = %d, "All sources absent, published fallback digit");
        }
        Decision::Decided { outcome, rule } => {
            info!(round = %snapshot.key, digits = ?digits, outcome = %outcome, rule = %rule, "Finalized round");
        }
    }

    FinalizeOutcome::Finalized {
        key: snapshot.key,
        decision,
    }
}
