use std::sync::Arc;

use roundvote_core::app::state::RoundStore;
use roundvote_core::ports::clock::Clock;

#[derive(Clone)]
pub struct AppState {
    pub store: RoundStore,
    pub clock: Arc<dyn Clock>,
}

impl AppState {
    pub fn new(store: RoundStore, clock: Arc<dyn Clock>) -> Self {
        Self { store, clock }
    }
}
