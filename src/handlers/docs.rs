use axum::{
    extract::State,
    http::{header, StatusCode},
    response::{Html, IntoResponse, Response},
    Json,
};

use crate::api::openapi;
use crate::state::AppState;

/// GET /docs - Swagger UI
pub async fn ui() -> Html<String> {
    Html(openapi::swagger_ui_html("/docs/openapi.json"))
}

/// GET /docs/openapi.json
pub async fn openapi_json(State(state): State<AppState>) -> Response {
    Json(state.openapi.as_ref().clone()).into_response()
}

/// GET /docs/openapi.yaml
pub async fn openapi_yaml(State(state): State<AppState>) -> Response {
    match serde_yaml::to_string(state.openapi.as_ref()) {
        Ok(yaml) => ([(header::CONTENT_TYPE, "application/yaml")], yaml).into_response(),
        Err(e) => {
            tracing::error!("Failed to render OpenAPI YAML: {}", e);
            StatusCode::INTERNAL_SERVER_ERROR.into_response()
        }
    }
}
