use serde_json::Value;
use std::sync::Arc;

use crate::api::openapi;
use crate::config::ApiConfig;
use crate::database::ProductStore;

/// Shared router state: the record store handle, mount point and API docs
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn ProductStore>,
    pub openapi: Arc<Value>,
    pub base_path: Arc<str>,
}

impl AppState {
    pub fn new(store: Arc<dyn ProductStore>, api: &ApiConfig) -> Self {
        Self {
            store,
            openapi: Arc::new(openapi::document(&api.base_path)),
            base_path: Arc::from(api.base_path.as_str()),
        }
    }
}
