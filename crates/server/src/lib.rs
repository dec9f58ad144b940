//! HTTP read surface over the shared round state.
pub mod app_state;
pub mod handlers;
pub mod models;

pub use handlers::router;
