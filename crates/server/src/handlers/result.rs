use axum::Json;
use axum::extract::State;

use crate::app_state::AppState;
use crate::models::ResultResponse;

/// Current round state. Never fails and never waits on sources: it only copies
/// what the scheduler last published.
pub async fn result(State(state): State<AppState>) -> Json<ResultResponse> {
    let now = state.clock.now().await;
    let status = state.store.status(now).await;
    Json(ResultResponse::from(status))
}
