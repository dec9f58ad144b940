mod health;
mod result;

use axum::Router;
use axum::routing::get;

use crate::app_state::AppState;

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health))
        .route("/api/result", get(result::result))
        .with_state(state)
}
