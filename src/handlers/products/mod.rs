//! Product handlers, one per operation.
//!
//! Routes keyed by id run behind the validation stage, so by the time a
//! handler runs the id is known to be an integer and the body has passed the
//! route's rules. Handlers then do a lookup (404 when absent) and one store
//! operation.

mod create;
mod delete;
mod get;
mod list;
mod status;
mod update;
mod utils;

pub use create::create;
pub use delete::delete;
pub use get::get;
pub use list::list;
pub use status::toggle_status;
pub use update::update;

pub const PRODUCT_NOT_FOUND: &str = "Producto no encontrado";
pub const PRODUCT_DELETED: &str = "Producto eliminado";

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::{ProductStore, SortOrder};
    use crate::testing::TestApp;
    use axum::http::{Method, StatusCode};
    use serde_json::{json, Value};

    const PRODUCTS: &str = "/api/products";

    fn error_messages(body: &Value) -> Vec<&str> {
        body["errors"]
            .as_array()
            .map(|errors| errors.iter().filter_map(|e| e["msg"].as_str()).collect())
            .unwrap_or_default()
    }

    // POST /api/products

    #[tokio::test]
    async fn create_with_empty_body_reports_four_errors() {
        let app = TestApp::new();
        let (status, body) = app.send(Method::POST, PRODUCTS, Some(json!({}))).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["errors"].as_array().map(Vec::len), Some(4));
        assert!(app.store.list_all(SortOrder::Ascending).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn create_with_zero_price_reports_one_error() {
        let app = TestApp::new();
        let (status, body) = app
            .send(Method::POST, PRODUCTS, Some(json!({"name": "Mouse - Testing", "price": 0})))
            .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(error_messages(&body), vec!["Ingrese un precio válido mayor a 0"]);
    }

    #[tokio::test]
    async fn create_with_text_price_reports_two_errors() {
        let app = TestApp::new();
        let (status, body) = app
            .send(Method::POST, PRODUCTS, Some(json!({"name": "Mouse - Testing", "price": "Hola"})))
            .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["errors"].as_array().map(Vec::len), Some(2));
        assert_eq!(body["errors"][0]["value"], "Hola");
    }

    #[tokio::test]
    async fn create_stores_product_with_active_status() {
        let app = TestApp::new();
        let (status, body) = app
            .send(Method::POST, PRODUCTS, Some(json!({"name": "Mouse - Testing", "price": 30})))
            .await;
        assert_eq!(status, StatusCode::CREATED);
        assert!(body.get("error").is_none());
        assert_eq!(body["data"]["id"], 1);
        assert_eq!(body["data"]["name"], "Mouse - Testing");
        assert_eq!(body["data"]["price"], 30.0);
        assert_eq!(body["data"]["status"], true);
    }

    #[tokio::test]
    async fn create_without_json_content_type_sees_empty_body() {
        let app = TestApp::new();
        let (status, body) = app
            .send_bytes(Method::POST, PRODUCTS, "text/plain", r#"{"name":"Mouse","price":30}"#)
            .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["errors"].as_array().map(Vec::len), Some(4));
    }

    #[tokio::test]
    async fn create_with_malformed_json_is_rejected_before_rules() {
        let app = TestApp::new();
        let (status, body) = app.send_bytes(Method::POST, PRODUCTS, "application/json", "{\"name\":").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body.get("errors").is_none());
        assert!(body["error"].is_string());
    }

    #[tokio::test]
    async fn create_ignores_client_id() {
        let app = TestApp::new();
        let (status, body) = app
            .send(Method::POST, PRODUCTS, Some(json!({"id": 99, "name": "Mouse", "price": "12.5"})))
            .await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(body["data"]["id"], 1);
        assert_eq!(body["data"]["price"], 12.5);
    }

    // GET /api/products

    #[tokio::test]
    async fn list_returns_json_data_newest_first() {
        let app = TestApp::new();
        app.seed("Mouse", 30.0).await;
        app.seed("Teclado", 45.0).await;

        let (status, body) = app.send(Method::GET, PRODUCTS, None).await;
        assert_eq!(status, StatusCode::OK);
        let ids: Vec<i64> = body["data"]
            .as_array()
            .expect("data array")
            .iter()
            .filter_map(|p| p["id"].as_i64())
            .collect();
        assert_eq!(ids, vec![2, 1]);
        assert!(body.get("errors").is_none());
    }

    #[tokio::test]
    async fn repeated_lists_are_identical() {
        let app = TestApp::new();
        app.seed("Mouse", 30.0).await;
        let (_, first) = app.send(Method::GET, PRODUCTS, None).await;
        let (_, second) = app.send(Method::GET, PRODUCTS, None).await;
        assert_eq!(first, second);
    }

    // GET /api/products/:id

    #[tokio::test]
    async fn get_missing_product_is_404() {
        let app = TestApp::new();
        let (status, body) = app.send(Method::GET, "/api/products/20000", None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"], PRODUCT_NOT_FOUND);
    }

    #[tokio::test]
    async fn get_with_invalid_id_is_400() {
        let app = TestApp::new();
        let (status, body) = app.send(Method::GET, "/api/products/not-valid-url", None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(error_messages(&body), vec!["ID no válido"]);
        assert_eq!(body["errors"][0]["location"], "params");
    }

    #[tokio::test]
    async fn get_with_out_of_range_id_is_404() {
        let app = TestApp::new();
        let (status, _) = app.send(Method::GET, "/api/products/99999999999", None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn get_existing_product() {
        let app = TestApp::new();
        let id = app.seed("Mouse", 30.0).await;
        let (status, body) = app.send(Method::GET, &format!("/api/products/{id}"), None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"]["name"], "Mouse");
    }

    // PUT /api/products/:id

    #[tokio::test]
    async fn update_with_invalid_id_reports_only_id_error() {
        let app = TestApp::new();
        let body = json!({"name": "Monitor curvo", "price": 300, "status": true});
        let (status, body) = app.send(Method::PUT, "/api/products/not-valid-url", Some(body)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(error_messages(&body), vec!["ID no válido"]);
    }

    #[tokio::test]
    async fn update_with_empty_body_reports_five_errors() {
        let app = TestApp::new();
        let id = app.seed("Mouse", 30.0).await;
        let (status, body) = app.send(Method::PUT, &format!("/api/products/{id}"), Some(json!({}))).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["errors"].as_array().map(Vec::len), Some(5));
        assert!(body.get("data").is_none());
    }

    #[tokio::test]
    async fn update_with_negative_price_is_rejected() {
        let app = TestApp::new();
        let id = app.seed("Mouse", 30.0).await;
        let body = json!({"name": "Monitor curvo", "price": -300, "status": true});
        let (status, body) = app.send(Method::PUT, &format!("/api/products/{id}"), Some(body)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(error_messages(&body), vec!["Precio no válido"]);
        assert!(body.get("data").is_none());
    }

    #[tokio::test]
    async fn update_missing_product_is_404() {
        let app = TestApp::new();
        let body = json!({"name": "Monitor curvo", "price": 300, "status": true});
        let (status, body) = app.send(Method::PUT, "/api/products/2000", Some(body)).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"], PRODUCT_NOT_FOUND);
        assert!(body.get("data").is_none());
    }

    #[tokio::test]
    async fn update_overwrites_fields() {
        let app = TestApp::new();
        let id = app.seed("Mouse", 30.0).await;
        let body = json!({"name": "Monitor curvo", "price": 300, "status": "false"});
        let (status, body) = app.send(Method::PUT, &format!("/api/products/{id}"), Some(body)).await;
        assert_eq!(status, StatusCode::OK);
        assert!(body.get("errors").is_none());
        assert_eq!(body["data"]["name"], "Monitor curvo");
        assert_eq!(body["data"]["price"], 300.0);
        assert_eq!(body["data"]["status"], false);

        let stored = app.store.get_by_key(id).await.unwrap().unwrap();
        assert_eq!(stored.name, "Monitor curvo");
        assert!(!stored.status);
    }

    // PATCH /api/products/:id

    #[tokio::test]
    async fn toggle_missing_product_is_404() {
        let app = TestApp::new();
        let (status, body) = app.send(Method::PATCH, "/api/products/2000", None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"], PRODUCT_NOT_FOUND);
    }

    #[tokio::test]
    async fn toggle_flips_status_and_ignores_body() {
        let app = TestApp::new();
        let id = app.seed("Mouse", 30.0).await;
        let uri = format!("/api/products/{id}");

        let (status, body) = app.send(Method::PATCH, &uri, None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"]["status"], false);
        assert!(body.get("error").is_none());

        let (status, body) = app.send(Method::PATCH, &uri, Some(json!({"status": false}))).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"]["status"], true);
    }

    #[tokio::test]
    async fn toggle_with_invalid_id_is_400() {
        let app = TestApp::new();
        let (status, body) = app.send(Method::PATCH, "/api/products/abc", None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(error_messages(&body), vec!["ID no válido"]);
    }

    // DELETE /api/products/:id

    #[tokio::test]
    async fn delete_with_invalid_id_is_400() {
        let app = TestApp::new();
        let (status, body) = app.send(Method::DELETE, "/api/products/not-valid", None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(error_messages(&body), vec!["ID no válido"]);
    }

    #[tokio::test]
    async fn delete_missing_product_is_404() {
        let app = TestApp::new();
        let (status, body) = app.send(Method::DELETE, "/api/products/4000", None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"], PRODUCT_NOT_FOUND);
    }

    #[tokio::test]
    async fn delete_removes_product() {
        let app = TestApp::new();
        let id = app.seed("Mouse", 30.0).await;
        let uri = format!("/api/products/{id}");

        let (status, body) = app.send(Method::DELETE, &uri, None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"], PRODUCT_DELETED);

        let (status, _) = app.send(Method::GET, &uri, None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }
}
