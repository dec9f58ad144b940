// Round scheduler: a fixed-cadence tick loop that maps wall-clock offsets to
// prepare/finalize actions and runs each one isolated from the loop itself.
pub mod actions;
mod aggregate;
mod orchestrator;

pub use aggregate::collect_snapshot;
pub use orchestrator::{Scheduler, run_tick};
