use async_trait::async_trait;
use thiserror::Error;

use super::models::{Product, ProductInput};

/// Errors surfaced by a record store
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("record {0} no longer exists")]
    Missing(i32),

    #[error("id space exhausted")]
    IdsExhausted,

    #[error(transparent)]
    Sqlx(#[from] sqlx::Error),
}

/// Sort direction on the primary key
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortOrder {
    Ascending,
    Descending,
}

impl SortOrder {
    pub fn as_sql(&self) -> &'static str {
        match self {
            SortOrder::Ascending => "ASC",
            SortOrder::Descending => "DESC",
        }
    }
}

/// Persistence contract for products.
///
/// Handlers only ever talk to this trait; the concrete store is picked at
/// startup and shared through the router state.
#[async_trait]
pub trait ProductStore: Send + Sync {
    /// Short backend name for logs and the health endpoint
    fn backend(&self) -> &'static str;

    async fn list_all(&self, order: SortOrder) -> Result<Vec<Product>, StoreError>;

    async fn get_by_key(&self, id: i32) -> Result<Option<Product>, StoreError>;

    /// Insert a new record; the store assigns `id` and timestamps
    async fn create(&self, input: ProductInput) -> Result<Product, StoreError>;

    /// Write back name/price/status and refresh `updated_at` on the record
    async fn persist(&self, product: &mut Product) -> Result<(), StoreError>;

    async fn delete(&self, product: &Product) -> Result<(), StoreError>;

    /// Create the backing table if it is missing
    async fn sync(&self) -> Result<(), StoreError>;

    /// Drop every record and recreate the backing table
    async fn clear(&self) -> Result<(), StoreError>;

    async fn health_check(&self) -> Result<(), StoreError>;
}
