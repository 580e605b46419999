use crate::error::SongError;
use crate::services::get_metrics;
use crate::startup::AppState;
use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use serde_json::{json, Value};

pub async fn health_check() -> Json<Value> {
    Json(json!({ "status": "OK" }))
}

/// Readiness check: succeeds only while the store answers a ping.
pub async fn readiness_check(State(state): State<AppState>) -> impl IntoResponse {
    match state.store.ping().await {
        Ok(()) => (StatusCode::OK, Json(json!({ "status": "ready" }))),
        Err(e) => (
            StatusCode::SERVICE_UNAVAILABLE,
            Json(json!({ "status": "unavailable", "message": e.to_string() })),
        ),
    }
}

pub async fn metrics() -> impl IntoResponse {
    (
        StatusCode::OK,
        [("content-type", "text/plain; charset=utf-8")],
        get_metrics(),
    )
}

/// Size of the song list loaded at startup. Does not track later writes.
pub async fn count_songs(State(state): State<AppState>) -> Result<Json<Value>, SongError> {
    if state.startup_songs.is_empty() {
        return Err(SongError::SeedUnavailable);
    }
    Ok(Json(json!({ "length": state.startup_songs.len() })))
}
