#![allow(dead_code)]

use std::sync::Arc;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use reqwest::StatusCode;
use serde_json::Value;

use products_api_rust::config::{AppConfig, Environment};
use products_api_rust::database::MemoryProductStore;
use products_api_rust::router;
use products_api_rust::state::AppState;

pub const PRODUCTS: &str = "/api/products";

/// A server bound to a free port, backed by a fresh in-memory store.
///
/// Each `#[tokio::test]` owns its runtime, so every test starts its own
/// server; it stops when the runtime is dropped.
pub struct TestServer {
    pub port: u16,
    pub base_url: String,
    pub client: reqwest::Client,
}

impl TestServer {
    pub async fn spawn() -> Result<Self> {
        Self::spawn_with(AppConfig::for_environment(Environment::Development)).await
    }

    pub async fn spawn_with(mut config: AppConfig) -> Result<Self> {
        // Pick an unused port for isolation
        let port = portpicker::pick_unused_port().context("failed to pick free port")?;
        config.server.host = "127.0.0.1".to_string();
        config.server.port = port;
        config.api.enable_request_logging = false;

        let store = Arc::new(MemoryProductStore::new());
        let app = router::app(AppState::new(store, &config.api), &config);

        let listener = tokio::net::TcpListener::bind(("127.0.0.1", port))
            .await
            .with_context(|| format!("failed to bind port {}", port))?;
        tokio::spawn(async move {
            if let Err(e) = axum::serve(listener, app).await {
                eprintln!("test server error: {e}");
            }
        });

        let server = Self {
            port,
            base_url: format!("http://127.0.0.1:{}", port),
            client: reqwest::Client::new(),
        };
        server.wait_ready(Duration::from_secs(5)).await?;
        Ok(server)
    }

    async fn wait_ready(&self, timeout: Duration) -> Result<()> {
        let deadline = Instant::now() + timeout;
        while Instant::now() < deadline {
            if let Ok(resp) = self.client.get(self.url("/health")).send().await {
                if resp.status() == StatusCode::OK {
                    return Ok(());
                }
            }
            tokio::time::sleep(Duration::from_millis(50)).await;
        }
        anyhow::bail!("server did not become ready on {} within {:?}", self.base_url, timeout)
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    pub fn product_url(&self, id: impl std::fmt::Display) -> String {
        format!("{}{}/{}", self.base_url, PRODUCTS, id)
    }

    /// Create a product through the API and return its id
    pub async fn create_product(&self, name: &str, price: f64) -> Result<i64> {
        let resp = self
            .client
            .post(self.url(PRODUCTS))
            .json(&serde_json::json!({ "name": name, "price": price }))
            .send()
            .await?;
        anyhow::ensure!(resp.status() == StatusCode::CREATED, "create returned {}", resp.status());
        let body: Value = resp.json().await?;
        body["data"]["id"].as_i64().context("created product has no id")
    }
}

/// Messages of an `{errors: [...]}` body, in order
pub fn error_messages(body: &Value) -> Vec<String> {
    body["errors"]
        .as_array()
        .map(|errors| {
            errors
                .iter()
                .filter_map(|e| e["msg"].as_str().map(str::to_string))
                .collect()
        })
        .unwrap_or_default()
}
