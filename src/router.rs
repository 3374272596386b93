//! Route dispatch table.
//!
//! Every product route is `[rules..., error collector, handler]`: the rule
//! set is attached to the handler as a `validate_request` layer, so the
//! handler only runs when the collector found nothing to report.
//!
//! Product paths match with or without a trailing slash.

use axum::{
    handler::Handler,
    http::{header, HeaderValue, Method},
    middleware::from_fn_with_state,
    routing::{get, MethodRouter},
    Router,
};
use tower_http::{
    cors::{AllowOrigin, CorsLayer},
    limit::RequestBodyLimitLayer,
    trace::TraceLayer,
};

use crate::config::{AppConfig, SecurityConfig};
use crate::handlers::{docs, products, service};
use crate::middleware::validate_request;
use crate::state::AppState;
use crate::validation::rules;

/// Full application router
pub fn app(state: AppState, config: &AppConfig) -> Router {
    let mut router = Router::new()
        // Public
        .route("/", get(service::root))
        .route("/health", get(service::health))
        .merge(docs_routes())
        .merge(product_routes(&config.api.base_path))
        .with_state(state)
        .layer(RequestBodyLimitLayer::new(config.api.max_request_size_bytes));

    // Global middleware
    if config.security.enable_cors {
        router = router.layer(cors_layer(&config.security));
    }
    if config.api.enable_request_logging {
        router = router.layer(TraceLayer::new_for_http());
    }
    router
}

/// Method + path → rules → handler, mounted at `base_path` (non-empty)
pub fn product_routes(base_path: &str) -> Router<AppState> {
    let collection: MethodRouter<AppState> = get(products::list)
        .post(products::create.layer(from_fn_with_state(rules::CREATE_PRODUCT, validate_request)));
    let item: MethodRouter<AppState> =
        get(products::get.layer(from_fn_with_state(rules::PRODUCT_ID, validate_request)))
            .put(products::update.layer(from_fn_with_state(rules::UPDATE_PRODUCT, validate_request)))
            .patch(products::toggle_status.layer(from_fn_with_state(rules::PRODUCT_ID, validate_request)))
            .delete(products::delete.layer(from_fn_with_state(rules::PRODUCT_ID, validate_request)));

    Router::new()
        .route(base_path, collection.clone())
        .route(&format!("{}/", base_path), collection)
        .route(&format!("{}/:id", base_path), item.clone())
        .route(&format!("{}/:id/", base_path), item)
}

fn docs_routes() -> Router<AppState> {
    Router::new()
        .route("/docs", get(docs::ui))
        .route("/docs/openapi.json", get(docs::openapi_json))
        .route("/docs/openapi.yaml", get(docs::openapi_yaml))
}

/// Only listed origins get CORS headers; requests without an Origin are
/// unaffected
fn cors_layer(security: &SecurityConfig) -> CorsLayer {
    let origins: Vec<HeaderValue> = security
        .cors_origins
        .iter()
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!("Ignoring invalid CORS origin '{}'", origin);
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::PATCH, Method::DELETE])
        .allow_headers([header::CONTENT_TYPE])
}
