use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use sqlx::FromRow;

use crate::validation::coerce;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: i32,
    pub name: String,
    pub price: f64,
    pub status: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Product {
    /// Full overwrite of the client-editable fields
    pub fn apply(&mut self, input: ProductInput) {
        self.name = input.name;
        self.price = input.price;
        if let Some(status) = input.status {
            self.status = status;
        }
    }

    pub fn toggle_status(&mut self) {
        self.status = !self.status;
    }
}

/// Client-supplied product fields, read from an already validated body.
///
/// Any `id` or timestamp in the body is ignored; those belong to the store.
#[derive(Debug, Clone, PartialEq)]
pub struct ProductInput {
    pub name: String,
    pub price: f64,
    pub status: Option<bool>,
}

impl ProductInput {
    pub fn from_body(body: &Value) -> Self {
        let field = |name: &str| body.as_object().and_then(|map| map.get(name));

        Self {
            name: coerce::to_text(field("name")),
            price: coerce::to_number(field("price")),
            status: field("status").and_then(|v| coerce::to_bool(&coerce::to_text(Some(v)))),
        }
    }

    /// Status for a new record; true unless the body says otherwise
    pub fn initial_status(&self) -> bool {
        self.status.unwrap_or(true)
    }
}
