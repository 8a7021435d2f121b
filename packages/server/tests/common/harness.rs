//! Test harness driving the Axum router in-process.
//!
//! Requests go through `tower::ServiceExt::oneshot`, so the full middleware
//! stack runs without binding a socket. Collaborators are the kernel mocks.

use axum::{
    body::Body,
    http::{header::CONTENT_TYPE, Method, Request, StatusCode},
    response::Response,
    Router,
};
use http_body_util::BodyExt;
use serde_json::Value;
use server_core::kernel::TestDependencies;
use server_core::server::build_app;
use tower::ServiceExt;

pub const RICKROLL_URL: &str = "https://www.youtube.com/watch?v=dQw4w9WgXcQ";

/// Router built from mocks; the mocks stay reachable for call assertions.
pub struct TestHarness {
    pub deps: TestDependencies,
    router: Router,
}

impl TestHarness {
    pub fn new(deps: TestDependencies) -> Self {
        // Run tests with: RUST_LOG=debug cargo test -- --nocapture
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_test_writer()
            .try_init();

        let router = build_app(deps.deps());
        Self { deps, router }
    }

    pub async fn request(&self, method: Method, uri: &str, body: &str) -> TestResponse {
        let request = Request::builder()
            .method(method)
            .uri(uri)
            .header(CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap();

        let response = self.router.clone().oneshot(request).await.unwrap();
        TestResponse::read(response).await
    }

    pub async fn post_json(&self, body: Value) -> TestResponse {
        self.request(Method::POST, "/", &body.to_string()).await
    }

    pub async fn analyze(&self, video_url: &str) -> TestResponse {
        self.post_json(serde_json::json!({ "videoUrl": video_url }))
            .await
    }
}

pub struct TestResponse {
    pub status: StatusCode,
    pub headers: axum::http::HeaderMap,
    pub body: Vec<u8>,
}

impl TestResponse {
    async fn read(response: Response) -> Self {
        let status = response.status();
        let headers = response.headers().clone();
        let body = response
            .into_body()
            .collect()
            .await
            .unwrap()
            .to_bytes()
            .to_vec();
        Self {
            status,
            headers,
            body,
        }
    }

    pub fn json(&self) -> Value {
        serde_json::from_slice(&self.body).unwrap()
    }

    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).and_then(|v| v.to_str().ok())
    }

    /// Assert a failure envelope with the given status and code.
    pub fn assert_failure(&self, status: u16, code: &str) {
        assert_eq!(self.status.as_u16(), status, "body: {}", String::from_utf8_lossy(&self.body));
        let json = self.json();
        assert_eq!(json["success"], false);
        assert_eq!(json["error"]["code"], code);
        assert!(json["error"]["message"].is_string());
        assert!(json.get("data").is_none());
    }
}
