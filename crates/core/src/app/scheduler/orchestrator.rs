use std::future::Future;

use chrono::{DateTime, Utc};
use tokio::time::MissedTickBehavior;
use tracing::{error, info, trace};

use super::actions;
use crate::app::context::AppContext;
use crate::domain::round::{RoundAction, RoundClock};
use crate::domain::snapshot::Snapshot;
use crate::ports::clock::Clock;
use crate::ports::random::RandomSource;

pub struct Scheduler;

impl Scheduler {
    /// Runs the round loop until `shutdown` resolves: every tick reads the
    /// clock, decides whether prepare or finalize is due, and runs it. Failures
    /// inside an action are logged and the loop carries on with the next tick.
    pub async fn run_forever<C, G, S>(ctx: AppContext<C, G>, shutdown: S)
    where
        C: Clock + 'static,
        G: RandomSource + 'static,
        S: Future<Output = ()> + Send,
    {
        let round_clock = RoundClock::new(&ctx.round);

        let mut interval = tokio::time::interval(ctx.round.tick);
        interval.set_missed_tick_behavior(MissedTickBehavior::Skip);

        info!(
            prepare_offset = ctx.round.prepare_offset_seconds,
            finalize_offset = ctx.round.finalize_offset_seconds,
            tick_ms = ctx.round.tick.as_millis() as u64,
            sources = ctx.sources.len(),
            "Scheduler started"
        );

        tokio::pin!(shutdown);
        loop {
            tokio::select! {
                _ = &mut shutdown => {
                    info!("Scheduler shutting down");
                    break;
                }
                _ = interval.tick() => {}
            }

            let now = ctx.clock.now().await;
            run_tick(&ctx, &round_clock, now).await;
        }
    }
}

/// Runs whatever action is due at `now` and returns it.
///
/// Each action executes in its own task and is awaited before returning, so
/// actions never overlap and a panic surfaces here as a logged error.
pub async fn run_tick<C, G>(
    ctx: &AppContext<C, G>,
    round_clock: &RoundClock,
    now: DateTime<Utc>,
) -> Option<RoundAction>
where
    C: Clock + 'static,
    G: RandomSource + 'static,
{
    let action = round_clock.due(now)?;
    trace!(action = ?action, "Scheduler tick");

    match &action {
        RoundAction::Prepare(key) => {
            if ctx.store.is_prepared(key).await {
                return Some(action);
            }
            let task_ctx = ctx.clone();
            let handle = tokio::spawn(async move { actions::prepare(&task_ctx, now).await });
            if let Err(e) = handle.await {
                error!(round = %key, error = %e, "Prepare task failed, marking round prepared with no readings");
                ctx.store
                    .install_snapshot(Snapshot::all_absent(key.clone(), ctx.source_names()))
                    .await;
            }
        }
        RoundAction::Finalize => {
            if !ctx.store.has_snapshot().await {
                return Some(action);
            }
            let task_ctx = ctx.clone();
            let handle = tokio::spawn(async move { actions::finalize(&task_ctx).await });
            if let Err(e) = handle.await {
                error!(error = %e, "Finalize task failed");
            }
        }
    }

    Some(action)
}
