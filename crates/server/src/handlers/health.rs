use axum::Json;
use axum::extract::State;
use roundvote_core::infra::time::iso_utc;

use crate::app_state::AppState;
use crate::models::HealthResponse;

pub async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    let now = state.clock.now().await;
    Json(HealthResponse {
        ok: true,
        time: iso_utc(now),
    })
}
