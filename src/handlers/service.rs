use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use serde_json::{json, Value};

use crate::state::AppState;

/// GET / - service name, version and where things live
pub async fn root(State(state): State<AppState>) -> Json<Value> {
    let version = env!("CARGO_PKG_VERSION");

    Json(json!({
        "data": {
            "name": "Products REST API",
            "version": version,
            "store": state.store.backend(),
            "endpoints": {
                "products": format!("{}[/:id]", state.base_path),
                "health": "/health",
                "docs": "/docs",
                "openapi": ["/docs/openapi.json", "/docs/openapi.yaml"],
            }
        }
    }))
}

/// GET /health - 200 when the store answers, 503 otherwise
pub async fn health(State(state): State<AppState>) -> impl IntoResponse {
    let now = chrono::Utc::now();

    match state.store.health_check().await {
        Ok(()) => (
            StatusCode::OK,
            Json(json!({
                "data": {
                    "status": "ok",
                    "timestamp": now,
                    "store": state.store.backend()
                }
            })),
        ),
        Err(e) => {
            tracing::warn!("Health check failed: {}", e);
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(json!({
                    "error": "Base de datos no disponible",
                    "data": {
                        "status": "degraded",
                        "timestamp": now,
                        "store": state.store.backend()
                    }
                })),
            )
        }
    }
}
