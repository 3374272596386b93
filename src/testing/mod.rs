use axum::{
    body::{to_bytes, Body},
    http::{header, HeaderMap, Method, Request, StatusCode},
    Router,
};
use serde_json::Value;
use std::sync::Arc;
use tower::ServiceExt;

use crate::config::{AppConfig, Environment};
use crate::database::{MemoryProductStore, ProductInput, ProductStore};
use crate::router;
use crate::state::AppState;

/// In-process application over a fresh in-memory store
pub struct TestApp {
    router: Router,
    pub store: Arc<MemoryProductStore>,
}

impl TestApp {
    pub fn new() -> Self {
        Self::with_config(AppConfig::for_environment(Environment::Development))
    }

    pub fn with_config(config: AppConfig) -> Self {
        let store = Arc::new(MemoryProductStore::new());
        let state = AppState::new(store.clone(), &config.api);
        Self {
            router: router::app(state, &config),
            store,
        }
    }

    /// Insert a product directly through the store
    pub async fn seed(&self, name: &str, price: f64) -> i32 {
        let input = ProductInput { name: name.to_string(), price, status: None };
        match self.store.create(input).await {
            Ok(product) => product.id,
            Err(e) => panic!("failed to seed product: {e}"),
        }
    }

    /// Send a request with an optional JSON body; a non-JSON response body
    /// comes back as `Value::Null`
    pub async fn send(&self, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
        let mut builder = Request::builder().method(method).uri(uri);
        let body = match body {
            Some(json) => {
                builder = builder.header(header::CONTENT_TYPE, "application/json");
                Body::from(json.to_string())
            }
            None => Body::empty(),
        };
        let (status, _, bytes) = self.call(builder.body(body).expect("request")).await;
        (status, serde_json::from_slice(&bytes).unwrap_or(Value::Null))
    }

    /// Send a request with raw bytes and an explicit content type
    pub async fn send_bytes(&self, method: Method, uri: &str, content_type: &str, body: &'static str) -> (StatusCode, Value) {
        let request = Request::builder()
            .method(method)
            .uri(uri)
            .header(header::CONTENT_TYPE, content_type)
            .body(Body::from(body))
            .expect("request");
        let (status, _, bytes) = self.call(request).await;
        (status, serde_json::from_slice(&bytes).unwrap_or(Value::Null))
    }

    /// Body as text, for non-JSON endpoints
    pub async fn send_raw(&self, method: Method, uri: &str) -> (StatusCode, String) {
        let request = Request::builder().method(method).uri(uri).body(Body::empty()).expect("request");
        let (status, _, bytes) = self.call(request).await;
        (status, String::from_utf8_lossy(&bytes).into_owned())
    }

    /// CORS preflight for the product collection from `origin`
    pub async fn preflight(&self, origin: &str) -> HeaderMap {
        let request = Request::builder()
            .method(Method::OPTIONS)
            .uri("/api/products")
            .header(header::ORIGIN, origin)
            .header(header::ACCESS_CONTROL_REQUEST_METHOD, "POST")
            .body(Body::empty())
            .expect("request");
        let (_, headers, _) = self.call(request).await;
        headers
    }

    async fn call(&self, request: Request<Body>) -> (StatusCode, HeaderMap, axum::body::Bytes) {
        let response = self.router.clone().oneshot(request).await.expect("infallible");
        let status = response.status();
        let headers = response.headers().clone();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.expect("response body");
        (status, headers, bytes)
    }
}
