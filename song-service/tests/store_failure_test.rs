mod common;

use axum::http::StatusCode;
use common::{FailingStore, TestApp};
use serde_json::json;
use song_service::{build_router, AppState};
use std::sync::Arc;

fn failing_app(transient: bool) -> TestApp {
    let mut app = TestApp::spawn();
    let state = AppState::new(Arc::new(FailingStore { transient }), Vec::new());
    app.router = build_router(state);
    app
}

#[tokio::test]
async fn every_song_route_degrades_to_500_with_context() {
    let app = failing_app(false);

    let cases = [
        (app.get("/song").await, "Error retrieving songs: command failed"),
        (app.get("/song/1").await, "Error retrieving song: command failed"),
        (
            app.post("/song", json!({ "id": 1 })).await,
            "Error creating song: command failed",
        ),
        (
            app.put("/song/1", json!({ "title": "B" })).await,
            "Error updating song: command failed",
        ),
        (app.delete("/song/1").await, "Error deleting song: command failed"),
    ];

    for (response, message) in cases {
        assert_eq!(response.status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(response.json(), json!({ "message": message }));
    }
}

#[tokio::test]
async fn transient_failures_are_still_500() {
    let app = failing_app(true);

    let response = app.get("/song").await;

    assert_eq!(response.status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(
        response.json()["message"],
        "Error retrieving songs: database unavailable: server selection timeout"
    );
}

#[tokio::test]
async fn readiness_fails_when_store_is_down() {
    let app = failing_app(true);

    let response = app.get("/ready").await;

    assert_eq!(response.status, StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(response.json()["status"], "unavailable");
}

#[tokio::test]
async fn health_does_not_touch_the_store() {
    let app = failing_app(false);

    assert_eq!(app.get("/health").await.status, StatusCode::OK);
}
