#![allow(dead_code)]

use async_trait::async_trait;
use axum::{
    body::{to_bytes, Body},
    http::{header, Request, StatusCode},
    Router,
};
use serde_json::Value;
use song_service::models::{Song, SongFields};
use song_service::services::{InMemorySongStore, SongStore, StoreError};
use song_service::{build_router, AppState};
use std::sync::Arc;
use tower::util::ServiceExt;

pub struct TestResponse {
    pub status: StatusCode,
    pub headers: axum::http::HeaderMap,
    pub raw: Vec<u8>,
}

impl TestResponse {
    pub fn json(&self) -> Value {
        serde_json::from_slice(&self.raw).expect("response body is not JSON")
    }
}

pub struct TestApp {
    pub router: Router,
    pub store: Arc<InMemorySongStore>,
}

impl TestApp {
    /// Empty store, one-song startup list so `/count` answers.
    pub fn spawn() -> Self {
        Self::with_state(Vec::new(), vec![song(serde_json::json!({ "id": 1, "title": "seed" }))])
    }

    pub fn with_state(stored: Vec<Song>, startup_songs: Vec<Song>) -> Self {
        let store = Arc::new(InMemorySongStore::with_songs(stored));
        let state = AppState::new(store.clone(), startup_songs);
        Self {
            router: build_router(state),
            store,
        }
    }

    pub async fn request(&self, method: &str, uri: &str, body: Option<Value>) -> TestResponse {
        let builder = Request::builder().method(method).uri(uri);
        let request = match body {
            Some(body) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string())),
            None => builder.body(Body::empty()),
        }
        .unwrap();

        send(&self.router, request).await
    }

    pub async fn get(&self, uri: &str) -> TestResponse {
        self.request("GET", uri, None).await
    }

    pub async fn post(&self, uri: &str, body: Value) -> TestResponse {
        self.request("POST", uri, Some(body)).await
    }

    pub async fn put(&self, uri: &str, body: Value) -> TestResponse {
        self.request("PUT", uri, Some(body)).await
    }

    pub async fn delete(&self, uri: &str) -> TestResponse {
        self.request("DELETE", uri, None).await
    }
}

pub async fn send(router: &Router, request: Request<Body>) -> TestResponse {
    let response = router.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let headers = response.headers().clone();
    let raw = to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap()
        .to_vec();

    TestResponse {
        status,
        headers,
        raw,
    }
}

pub fn song(value: Value) -> Song {
    Song::from_body(value).unwrap()
}

/// Store whose every call fails the same way.
pub struct FailingStore {
    pub transient: bool,
}

impl FailingStore {
    fn error(&self) -> StoreError {
        if self.transient {
            StoreError::Unavailable(anyhow::anyhow!("server selection timeout"))
        } else {
            StoreError::Query(anyhow::anyhow!("command failed"))
        }
    }
}

#[async_trait]
impl SongStore for FailingStore {
    async fn find_all(&self) -> Result<Vec<Song>, StoreError> {
        Err(self.error())
    }

    async fn find_by_id(&self, _id: i64) -> Result<Option<Song>, StoreError> {
        Err(self.error())
    }

    async fn insert(&self, _song: &Song) -> Result<(), StoreError> {
        Err(self.error())
    }

    async fn update_by_id(&self, _id: i64, _fields: &SongFields) -> Result<Option<Song>, StoreError> {
        Err(self.error())
    }

    async fn delete_by_id(&self, _id: i64) -> Result<u64, StoreError> {
        Err(self.error())
    }

    async fn replace_all(&self, _songs: &[Song]) -> Result<(), StoreError> {
        Err(self.error())
    }

    async fn ping(&self) -> Result<(), StoreError> {
        Err(self.error())
    }
}
