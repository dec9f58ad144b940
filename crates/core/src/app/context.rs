use std::sync::Arc;

use chrono_tz::Tz;

use crate::app::state::RoundStore;
use crate::domain::model::RoundConfig;
use crate::ports::clock::Clock;
use crate::ports::random::RandomSource;
use crate::ports::source::EntropySource;

/// Bundles the runtime dependencies the scheduler needs (round timing, clock,
/// randomness source, digit sources and the shared round store).
pub struct AppContext<C, G>
where
    C: Clock,
    G: RandomSource,
{
    pub round: Arc<RoundConfig>,
    pub timezone: Tz,
    pub clock: Arc<C>,
    pub rng: Arc<G>,
    pub sources: Arc<[Arc<dyn EntropySource>]>,
    pub store: RoundStore,
    names: Arc<[String]>,
}

impl<C, G> AppContext<C, G>
where
    C: Clock,
    G: RandomSource,
{
    pub fn new(
        round: RoundConfig,
        timezone: Tz,
        clock: C,
        rng: G,
        sources: Vec<Arc<dyn EntropySource>>,
    ) -> Self {
        let names = sources.iter().map(|s| s.name().to_string()).collect();
        Self {
            round: Arc::new(round),
            timezone,
            clock: Arc::new(clock),
            rng: Arc::new(rng),
            sources: sources.into(),
            store: RoundStore::new(),
            names,
        }
    }

    /// Source names captured at construction, so recovering from a failed
    /// prepare never has to call back into the sources.
    pub fn source_names(&self) -> Vec<String> {
        self.names.to_vec()
    }
}

impl<C, G> Clone for AppContext<C, G>
where
    C: Clock,
    G: RandomSource,
{
    fn clone(&self) -> Self {
        Self {
            round: Arc::clone(&self.round),
            timezone: self.timezone,
            clock: Arc::clone(&self.clock),
            rng: Arc::clone(&self.rng),
            sources: Arc::clone(&self.sources),
            store: self.store.clone(),
            names: Arc::clone(&self.names),
        }
    }
}
