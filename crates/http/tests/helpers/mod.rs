//! Test harness for HTTP API integration tests.
//!
//! Writes fixture data files into a temp dir, loads them, and drives the
//! router in-process via `tower::ServiceExt::oneshot` (no socket).

pub mod fixtures;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use nonprofit_search_http::{router, AppContext};
use serde_json::Value;
use tempfile::TempDir;
use tower::ServiceExt;

pub struct TestHarness {
    pub app: Router,
    _temp_dir: TempDir,
}

impl TestHarness {
    /// Build a harness from the standard fixture data set.
    pub fn with_fixture_data() -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        fixtures::write_fixture_data(temp_dir.path());
        let index = nonprofit_search_core::load_dir(temp_dir.path());
        TestHarness { app: router(AppContext::new(index)), _temp_dir: temp_dir }
    }

    /// Send a GET and return the status and decoded JSON body.
    pub async fn get(&self, uri: &str) -> (StatusCode, Value) {
        let response = self
            .app
            .clone()
            .oneshot(Request::builder().uri(uri).body(Body::empty()).expect("Failed to build request"))
            .await
            .expect("Router failed");
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.expect("Failed to read body");
        let body = if bytes.is_empty() { Value::Null } else { serde_json::from_slice(&bytes).expect("Body is not JSON") };
        (status, body)
    }

    /// GET `/search` and return the organization names in response order.
    pub async fn search_names(&self, uri: &str) -> Vec<String> {
        let (status, body) = self.get(uri).await;
        assert_eq!(status, StatusCode::OK, "unexpected status for {uri}: {body}");
        body.as_array()
            .expect("Expected a JSON array")
            .iter()
            .map(|r| r["Organization Name"].as_str().unwrap_or("").to_string())
            .collect()
    }
}
