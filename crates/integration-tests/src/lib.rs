//! Integration tests for the BugStore API.
//!
//! Each test starts the real router on an ephemeral port, backed by a fresh
//! in-memory store, and drives it over HTTP with `reqwest`.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p bugstore-integration-tests
//! ```

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::sync::Arc;

use reqwest::{Client, Response, StatusCode};
use serde_json::Value;

use bugstore_api::db::MemoryStore;
use bugstore_api::state::AppState;

/// A running API server plus a client pointed at it.
pub struct TestContext {
    pub client: Client,
    pub base_url: String,
    /// The store behind the server, for inspecting persisted state.
    pub store: Arc<MemoryStore>,
}

impl TestContext {
    /// Start a server on `127.0.0.1:0` with an empty in-memory store.
    ///
    /// # Panics
    ///
    /// Panics if the listener cannot be bound.
    pub async fn new() -> Self {
        let store = Arc::new(MemoryStore::new());
        let state = AppState::new(store.clone());
        let app = bugstore_api::app(state);

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind test listener");
        let addr = listener.local_addr().expect("Failed to read local address");

        tokio::spawn(async move {
            axum::serve(listener, app).await.expect("Test server error");
        });

        Self {
            client: Client::new(),
            base_url: format!("http://{addr}"),
            store,
        }
    }

    /// Absolute URL for `path`.
    #[must_use]
    pub fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    /// POST a JSON body, expecting `201 Created`; returns the body and the
    /// `Location` header.
    ///
    /// # Panics
    ///
    /// Panics if the request fails or the status is not 201.
    pub async fn create(&self, path: &str, body: &Value) -> (Value, String) {
        let resp = self
            .client
            .post(self.url(path))
            .json(body)
            .send()
            .await
            .expect("Request failed");
        assert_eq!(resp.status(), StatusCode::CREATED);

        let location = resp
            .headers()
            .get(reqwest::header::LOCATION)
            .and_then(|v| v.to_str().ok())
            .expect("Missing Location header")
            .to_owned();

        (body_json(resp).await, location)
    }

    /// GET `path`.
    ///
    /// # Panics
    ///
    /// Panics if the request fails.
    pub async fn get(&self, path: &str) -> Response {
        self.client
            .get(self.url(path))
            .send()
            .await
            .expect("Request failed")
    }

    /// PUT a JSON body to `path`.
    ///
    /// # Panics
    ///
    /// Panics if the request fails.
    pub async fn put(&self, path: &str, body: &Value) -> Response {
        self.client
            .put(self.url(path))
            .json(body)
            .send()
            .await
            .expect("Request failed")
    }

    /// DELETE `path`.
    ///
    /// # Panics
    ///
    /// Panics if the request fails.
    pub async fn delete(&self, path: &str) -> Response {
        self.client
            .delete(self.url(path))
            .send()
            .await
            .expect("Request failed")
    }
}

/// Decode a response body as JSON.
///
/// # Panics
///
/// Panics if the body is not valid JSON.
pub async fn body_json(resp: Response) -> Value {
    resp.json().await.expect("Response body is not JSON")
}
