//! GET /health

use axum::extract::State;
use axum::Json;

use crate::state::AppState;

/// Liveness plus the number of open browser connections.
pub async fn health_check(State(state): State<AppState>) -> Json<serde_json::Value> {
    Json(health_body(state.connections.len()))
}

fn health_body(connections: usize) -> serde_json::Value {
    serde_json::json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
        "connections": connections,
    })
}
